use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use hark_core::alert::Alert;
use hark_core::ids::AlertId;
use hark_ports::error::PortError;
use hark_ports::outbound::AlertRepository;
use hark_ports::types::AlertFilter;

/// In-memory alert store, the default repository. `save` replaces the
/// stored value whole, which pairs with the engine's copy-on-write
/// mutation of the alert aggregate.
#[derive(Default)]
pub struct InMemoryAlertRepository {
    alerts: RwLock<HashMap<AlertId, Alert>>,
}

impl InMemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn save(&self, alert: &Alert) -> Result<(), PortError> {
        let mut alerts = self
            .alerts
            .write()
            .map_err(|_| PortError::Persistence("alert store poisoned".into()))?;
        alerts.insert(alert.id().clone(), alert.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AlertId) -> Result<Option<Alert>, PortError> {
        let alerts = self
            .alerts
            .read()
            .map_err(|_| PortError::Persistence("alert store poisoned".into()))?;
        Ok(alerts.get(id).cloned())
    }

    async fn find_by_filter(&self, filter: &AlertFilter) -> Result<Vec<Alert>, PortError> {
        let alerts = self
            .alerts
            .read()
            .map_err(|_| PortError::Persistence("alert store poisoned".into()))?;
        let mut matching: Vec<Alert> = alerts
            .values()
            .filter(|a| filter.status.is_none_or(|s| a.status() == s))
            .cloned()
            .collect();
        matching.sort_by_key(Alert::created_at);
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use hark_core::alert::{Priority, Status};
    use hark_core::channel::Channel;
    use hark_core::escalation::{EscalationLevel, EscalationPolicy, Target};
    use hark_core::responder::Responder;

    fn t0() -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn make_alert(message: &str, created_at: DateTime<Utc>) -> Alert {
        let responder = Responder::new("alice".into(), "alice@test.com".into()).unwrap();
        let level =
            EscalationLevel::new(vec![Target::new(responder, Channel::Email)], 300).unwrap();
        let policy = EscalationPolicy::new(vec![level]).unwrap();
        let (alert, _) =
            Alert::raise(message.into(), Priority::High, policy, created_at).unwrap();
        alert
    }

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = InMemoryAlertRepository::new();
        let alert = make_alert("db down", t0());
        repo.save(&alert).await.unwrap();

        let found = repo.find_by_id(alert.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), alert.id());
        assert_eq!(found.message(), "db down");
    }

    #[tokio::test]
    async fn find_unknown_id_is_none() {
        let repo = InMemoryAlertRepository::new();
        assert!(repo.find_by_id(&AlertId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_stored_value() {
        let repo = InMemoryAlertRepository::new();
        let mut alert = make_alert("db down", t0());
        repo.save(&alert).await.unwrap();

        let assignment_id = alert.assignments()[0].id().clone();
        alert.acknowledge(&assignment_id, t0() + Duration::minutes(1));
        repo.save(&alert).await.unwrap();

        let found = repo.find_by_id(alert.id()).await.unwrap().unwrap();
        assert_eq!(found.status(), Status::Acknowledged);
    }

    #[tokio::test]
    async fn filter_by_status_and_sort_by_creation() {
        let repo = InMemoryAlertRepository::new();
        let newer = make_alert("newer", t0() + Duration::minutes(1));
        let older = make_alert("older", t0());
        let mut acked = make_alert("acked", t0() + Duration::minutes(2));
        let assignment_id = acked.assignments()[0].id().clone();
        acked.acknowledge(&assignment_id, t0() + Duration::minutes(3));

        for alert in [&newer, &older, &acked] {
            repo.save(alert).await.unwrap();
        }

        let pending = repo
            .find_by_filter(&AlertFilter {
                status: Some(Status::Pending),
            })
            .await
            .unwrap();
        let messages: Vec<_> = pending.iter().map(Alert::message).collect();
        assert_eq!(messages, vec!["older", "newer"]);

        let all = repo.find_by_filter(&AlertFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
