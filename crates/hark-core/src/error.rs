use thiserror::Error;

use crate::alert::Priority;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("alert message must not be blank")]
    BlankMessage,
    #[error("responder name must not be blank")]
    BlankResponderName,
    #[error("responder contact must not be blank")]
    BlankResponderContact,
    #[error("target address must not be blank")]
    BlankTargetAddress,
    #[error("policy requires at least one level")]
    PolicyRequiresLevel,
    #[error("level requires at least one target")]
    LevelRequiresTarget,
    #[error("acknowledgement timeout must be positive")]
    TimeoutNotPositive,
    #[error("no escalation policy for priority {0}")]
    NoPolicyForPriority(Priority),
    #[error("invalid phone format")]
    InvalidPhoneFormat,
    #[error("invalid id: {0}")]
    InvalidId(String),
}
