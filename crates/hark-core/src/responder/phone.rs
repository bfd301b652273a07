use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Phone number in E.164 form, e.g. "+12025551234".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn parse(number: &str) -> Result<Self, DomainError> {
        let Some(digits) = number.strip_prefix('+') else {
            return Err(DomainError::InvalidPhoneFormat);
        };
        let ok = (7..=15).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
            && !digits.starts_with('0');
        if !ok {
            return Err(DomainError::InvalidPhoneFormat);
        }
        Ok(Self(number.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
