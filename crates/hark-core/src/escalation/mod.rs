pub mod level;
pub mod target;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub use level::EscalationLevel;
pub use target::Target;

/// The ordered sequence of levels paged for alerts of a given priority.
/// Immutable once built; alerts snapshot it at raise time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationPolicy {
    levels: Vec<EscalationLevel>,
}

impl EscalationPolicy {
    pub fn new(levels: Vec<EscalationLevel>) -> Result<Self, DomainError> {
        if levels.is_empty() {
            return Err(DomainError::PolicyRequiresLevel);
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[EscalationLevel] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&EscalationLevel> {
        self.levels.get(index)
    }
}
