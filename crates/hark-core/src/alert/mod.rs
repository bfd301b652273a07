pub mod assignment;
pub mod outcome;
pub mod priority;
pub mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::escalation::EscalationPolicy;
use crate::events::{
    AlertAcknowledged, AlertExhausted, AlertRaised, DomainEvent, LevelDispatched,
};
use crate::ids::{AckToken, AlertId, AssignmentId, ResponderId};
use crate::responder::Responder;

pub use assignment::Assignment;
pub use outcome::AckOutcome;
pub use priority::Priority;
pub use status::Status;

/// One incident tracked by the engine: a policy snapshot, the assignments
/// paged so far, and the escalation state machine
/// (pending -> acknowledged | exhausted, both terminal).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    id: AlertId,
    message: String,
    priority: Priority,
    status: Status,
    policy: EscalationPolicy,
    assignments: Vec<Assignment>,
    current_level: usize,
    created_at: DateTime<Utc>,
    acknowledged_by: Option<Responder>,
    acknowledged_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Validates the message, snapshots the policy and pages level 0.
    pub fn raise(
        message: String,
        priority: Priority,
        policy: EscalationPolicy,
        now: DateTime<Utc>,
    ) -> Result<(Self, Vec<DomainEvent>), DomainError> {
        if message.trim().is_empty() {
            return Err(DomainError::BlankMessage);
        }
        let mut alert = Self {
            id: AlertId::new(),
            message,
            priority,
            status: Status::Pending,
            policy,
            assignments: Vec::new(),
            current_level: 0,
            created_at: now,
            acknowledged_by: None,
            acknowledged_at: None,
        };
        let paged = alert.page_level(0, now);
        let events = vec![
            DomainEvent::AlertRaised(AlertRaised {
                alert_id: alert.id.clone(),
                priority,
                occurred_at: now,
            }),
            DomainEvent::LevelDispatched(LevelDispatched {
                alert_id: alert.id.clone(),
                level: 0,
                targets: paged,
                occurred_at: now,
            }),
        ];
        Ok((alert, events))
    }

    /// One escalation tick. Steps to the next level (paging it) or exhausts
    /// the alert when the current level's latest deadline has passed.
    /// Returns the events of the transition taken; empty means unchanged.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Vec<DomainEvent> {
        if self.status != Status::Pending {
            return vec![];
        }
        let level_deadline = {
            let current = self.assignments_at(self.current_level);
            // An acknowledged assignment means the acknowledgement path owns
            // this alert's transition; leave it alone.
            if current.iter().any(|a| a.is_acknowledged()) {
                return vec![];
            }
            match current.iter().map(|a| a.deadline()).max() {
                Some(deadline) => deadline,
                None => return vec![],
            }
        };
        if now < level_deadline {
            return vec![];
        }
        let next = self.current_level + 1;
        if next >= self.policy.levels().len() {
            self.status = Status::Exhausted;
            return vec![DomainEvent::AlertExhausted(AlertExhausted {
                alert_id: self.id.clone(),
                occurred_at: now,
            })];
        }
        self.current_level = next;
        let paged = self.page_level(next, now);
        vec![DomainEvent::LevelDispatched(LevelDispatched {
            alert_id: self.id.clone(),
            level: next,
            targets: paged,
            occurred_at: now,
        })]
    }

    /// The sole transition into `Acknowledged`; idempotent once reached.
    /// Late attempts get the original attribution back, never credit.
    pub fn acknowledge(
        &mut self,
        assignment_id: &AssignmentId,
        at: DateTime<Utc>,
    ) -> (AckOutcome, Vec<DomainEvent>) {
        if self.status == Status::Acknowledged {
            return (
                AckOutcome::AlreadyAcknowledged {
                    responder: self.acknowledged_by.clone(),
                    at: self.acknowledged_at,
                },
                vec![],
            );
        }
        let Some(assignment) = self.assignments.iter_mut().find(|a| a.id() == assignment_id)
        else {
            return (AckOutcome::AssignmentNotFound, vec![]);
        };
        if assignment.is_acknowledged() {
            return (
                AckOutcome::AlreadyAcknowledged {
                    responder: Some(assignment.target().responder().clone()),
                    at: assignment.acknowledged_at(),
                },
                vec![],
            );
        }
        assignment.acknowledge(at);
        let responder = assignment.target().responder().clone();
        self.status = Status::Acknowledged;
        self.acknowledged_by = Some(responder.clone());
        self.acknowledged_at = Some(at);
        let events = vec![DomainEvent::AlertAcknowledged(AlertAcknowledged {
            alert_id: self.id.clone(),
            responder_id: responder.id().clone(),
            occurred_at: at,
        })];
        (AckOutcome::Acknowledged { responder, at }, events)
    }

    fn page_level(&mut self, index: usize, now: DateTime<Utc>) -> usize {
        let Some(level) = self.policy.level(index) else {
            return 0;
        };
        let timeout = level.ack_timeout();
        let targets = level.targets().to_vec();
        let count = targets.len();
        for target in targets {
            self.assignments
                .push(Assignment::dispatch(target, index, now, timeout));
        }
        count
    }

    pub fn assignment_by_token(&self, token: &AckToken) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.token() == token)
    }

    pub fn assignment_for_responder(&self, responder_id: &ResponderId) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.target().responder().id() == responder_id)
    }

    pub fn assignments_at(&self, level: usize) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.level() == level).collect()
    }

    pub fn id(&self) -> &AlertId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn acknowledged_by(&self) -> Option<&Responder> {
        self.acknowledged_by.as_ref()
    }

    pub fn acknowledged_at(&self) -> Option<DateTime<Utc>> {
        self.acknowledged_at
    }
}
