use chrono::{DateTime, Utc};

use crate::responder::Responder;

/// What happened to one acknowledgement attempt, whichever path it came in
/// by (responder identity or voice-callback token). Lookup misses are
/// outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AckOutcome {
    /// This attempt ended escalation.
    Acknowledged {
        responder: Responder,
        at: DateTime<Utc>,
    },
    /// Escalation had already ended; carries the original attribution, so
    /// the caller is not awarded credit.
    AlreadyAcknowledged {
        responder: Option<Responder>,
        at: Option<DateTime<Utc>>,
    },
    AlertNotFound,
    AssignmentNotFound,
    TokenNotFound,
}

impl AckOutcome {
    pub fn responder(&self) -> Option<&Responder> {
        match self {
            Self::Acknowledged { responder, .. } => Some(responder),
            Self::AlreadyAcknowledged { responder, .. } => responder.as_ref(),
            _ => None,
        }
    }
}
