use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::escalation::Target;
use crate::ids::{AckToken, AssignmentId};

/// The record that one target was paged about one alert at one level.
/// Carries the single-use token a voice callback presents to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    id: AssignmentId,
    target: Target,
    level: usize,
    dispatched_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
    token: AckToken,
    acknowledged_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub(crate) fn dispatch(
        target: Target,
        level: usize,
        dispatched_at: DateTime<Utc>,
        ack_timeout: Duration,
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            target,
            level,
            dispatched_at,
            deadline: dispatched_at + ack_timeout,
            token: AckToken::new(),
            acknowledged_at: None,
        }
    }

    // First acknowledgement wins; the timestamp never moves afterwards.
    pub(crate) fn acknowledge(&mut self, at: DateTime<Utc>) {
        if self.acknowledged_at.is_none() {
            self.acknowledged_at = Some(at);
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged_at.is_some()
    }

    pub fn id(&self) -> &AssignmentId {
        &self.id
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn dispatched_at(&self) -> DateTime<Utc> {
        self.dispatched_at
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn token(&self) -> &AckToken {
        &self.token
    }

    pub fn acknowledged_at(&self) -> Option<DateTime<Utc>> {
        self.acknowledged_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::responder::Responder;

    fn make_target() -> Target {
        let responder = Responder::new("alice".into(), "alice@test.com".into()).unwrap();
        Target::new(responder, Channel::Email)
    }

    fn t0() -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn deadline_is_dispatch_plus_timeout() {
        let assignment = Assignment::dispatch(make_target(), 0, t0(), Duration::minutes(5));
        assert_eq!(assignment.deadline(), t0() + Duration::minutes(5));
    }

    #[test]
    fn fresh_assignment_is_unacknowledged() {
        let assignment = Assignment::dispatch(make_target(), 0, t0(), Duration::minutes(5));
        assert!(!assignment.is_acknowledged());
        assert!(assignment.acknowledged_at().is_none());
    }

    #[test]
    fn acknowledged_at_does_not_move_on_replay() {
        let mut assignment = Assignment::dispatch(make_target(), 0, t0(), Duration::minutes(5));
        assignment.acknowledge(t0() + Duration::minutes(2));
        assignment.acknowledge(t0() + Duration::minutes(4));
        assert_eq!(assignment.acknowledged_at(), Some(t0() + Duration::minutes(2)));
    }

    #[test]
    fn each_dispatch_mints_a_fresh_token() {
        let a = Assignment::dispatch(make_target(), 0, t0(), Duration::minutes(5));
        let b = Assignment::dispatch(make_target(), 0, t0(), Duration::minutes(5));
        assert_ne!(a.token(), b.token());
        assert_ne!(a.id(), b.id());
    }
}
