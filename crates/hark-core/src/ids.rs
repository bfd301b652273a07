use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

// Uuid-backed identifier newtypes. Each renders through the canonical
// 8-4-4-4-12 hyphenated form and parses back from its textual rendering.
macro_rules! uuid_ids {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Uuid);

            impl $name {
                /// Mints a fresh random identifier.
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                pub fn parse(text: &str) -> Result<Self, DomainError> {
                    match Uuid::try_parse(text) {
                        Ok(raw) => Ok(Self(raw)),
                        Err(_) => Err(DomainError::InvalidId(stringify!($name).into())),
                    }
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    std::fmt::Display::fmt(&self.0.hyphenated(), f)
                }
            }
        )+
    };
}

uuid_ids! {
    AlertId,
    AssignmentId,
    ResponderId,
    /// Single-use acknowledgement token. Must be unguessable: v4 uuids
    /// carry 122 random bits drawn from the OS CSPRNG.
    AckToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_uuid_succeeds() {
        let id = AlertId::new();
        let parsed = AlertId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_invalid_uuid_fails() {
        let result = AckToken::parse("not-a-token");
        assert_eq!(result, Err(DomainError::InvalidId("AckToken".into())));
    }

    #[test]
    fn display_is_hyphenated_hex() {
        let rendered = AssignmentId::new().to_string();
        assert_eq!(rendered.len(), 36);
        assert_eq!(rendered.matches('-').count(), 4);
    }

    #[test]
    fn fresh_tokens_never_collide() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(AckToken::new()));
        }
    }
}
