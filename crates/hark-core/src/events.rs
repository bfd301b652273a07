use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alert::Priority;
use crate::ids::{AlertId, ResponderId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DomainEvent {
    AlertRaised(AlertRaised),
    LevelDispatched(LevelDispatched),
    AlertAcknowledged(AlertAcknowledged),
    AlertExhausted(AlertExhausted),
}

impl DomainEvent {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::AlertRaised(e) => e.occurred_at,
            Self::LevelDispatched(e) => e.occurred_at,
            Self::AlertAcknowledged(e) => e.occurred_at,
            Self::AlertExhausted(e) => e.occurred_at,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AlertRaised(_) => "alert.raised",
            Self::LevelDispatched(_) => "alert.level_dispatched",
            Self::AlertAcknowledged(_) => "alert.acknowledged",
            Self::AlertExhausted(_) => "alert.exhausted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRaised {
    pub alert_id: AlertId,
    pub priority: Priority,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelDispatched {
    pub alert_id: AlertId,
    pub level: usize,
    pub targets: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertAcknowledged {
    pub alert_id: AlertId,
    pub responder_id: ResponderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertExhausted {
    pub alert_id: AlertId,
    pub occurred_at: DateTime<Utc>,
}
