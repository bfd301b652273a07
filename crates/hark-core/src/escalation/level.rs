use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::target::Target;

/// One step of a policy: targets paged simultaneously, plus the timeout
/// after which the next level fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationLevel {
    targets: Vec<Target>,
    ack_timeout_seconds: u64,
}

impl EscalationLevel {
    pub fn new(targets: Vec<Target>, ack_timeout_seconds: u64) -> Result<Self, DomainError> {
        if targets.is_empty() {
            return Err(DomainError::LevelRequiresTarget);
        }
        if ack_timeout_seconds == 0 {
            return Err(DomainError::TimeoutNotPositive);
        }
        Ok(Self {
            targets,
            ack_timeout_seconds,
        })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn ack_timeout_seconds(&self) -> u64 {
        self.ack_timeout_seconds
    }

    pub fn ack_timeout(&self) -> Duration {
        Duration::seconds(self.ack_timeout_seconds as i64)
    }
}
