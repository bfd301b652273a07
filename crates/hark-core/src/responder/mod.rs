pub mod phone;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ResponderId;

pub use phone::Phone;

/// An on-call person with a stable identifier and a default contact address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responder {
    id: ResponderId,
    name: String,
    contact: String,
}

impl Responder {
    pub fn new(name: String, contact: String) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::BlankResponderName);
        }
        if contact.trim().is_empty() {
            return Err(DomainError::BlankResponderContact);
        }
        Ok(Self {
            id: ResponderId::new(),
            name,
            contact,
        })
    }

    pub fn id(&self) -> &ResponderId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responder_with_name_and_contact_succeeds() {
        let responder = Responder::new("alice".into(), "+41791234567".into());
        assert!(responder.is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        let result = Responder::new("  ".into(), "+41791234567".into());
        assert_eq!(result, Err(DomainError::BlankResponderName));
    }

    #[test]
    fn blank_contact_rejected() {
        let result = Responder::new("alice".into(), "".into());
        assert_eq!(result, Err(DomainError::BlankResponderContact));
    }

    #[test]
    fn responders_get_distinct_ids() {
        let a = Responder::new("alice".into(), "a@test.com".into()).unwrap();
        let b = Responder::new("alice".into(), "a@test.com".into()).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
