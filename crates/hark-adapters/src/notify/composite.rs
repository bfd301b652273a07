use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use hark_core::alert::{Alert, Assignment};
use hark_ports::error::NotifyError;
use hark_ports::outbound::Notifier;
use hark_ports::types::NotifyResult;

/// Fans one delivery out to every delegate. An individual sink's failure is
/// logged and swallowed so it cannot mask the remaining sinks.
pub struct CompositeNotifier {
    delegates: Vec<Arc<dyn Notifier>>,
}

impl CompositeNotifier {
    pub fn new(delegates: Vec<Arc<dyn Notifier>>) -> Self {
        Self { delegates }
    }
}

#[async_trait]
impl Notifier for CompositeNotifier {
    async fn notify(
        &self,
        alert: &Alert,
        assignment: &Assignment,
    ) -> Result<NotifyResult, NotifyError> {
        for delegate in &self.delegates {
            if let Err(err) = delegate.notify(alert, assignment).await {
                warn!(
                    alert_id = %alert.id(),
                    assignment_id = %assignment.id(),
                    error = %err,
                    "notification sink failed, continuing fan-out"
                );
            }
        }
        Ok(NotifyResult::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use hark_core::alert::Priority;
    use hark_core::channel::Channel;
    use hark_core::escalation::{EscalationLevel, EscalationPolicy, Target};
    use hark_core::responder::Responder;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        count: Mutex<usize>,
    }

    #[async_trait]
    impl Notifier for Recording {
        async fn notify(&self, _: &Alert, _: &Assignment) -> Result<NotifyResult, NotifyError> {
            *self.count.lock().unwrap() += 1;
            Ok(NotifyResult::default())
        }
    }

    struct Failing;

    #[async_trait]
    impl Notifier for Failing {
        async fn notify(&self, _: &Alert, _: &Assignment) -> Result<NotifyResult, NotifyError> {
            Err(NotifyError::ChannelUnavailable)
        }
    }

    fn make_alert() -> Alert {
        let responder = Responder::new("alice".into(), "alice@test.com".into()).unwrap();
        let level =
            EscalationLevel::new(vec![Target::new(responder, Channel::Email)], 300).unwrap();
        let policy = EscalationPolicy::new(vec![level]).unwrap();
        let t0: DateTime<Utc> = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let (alert, _) = Alert::raise("db down".into(), Priority::High, policy, t0).unwrap();
        alert
    }

    #[tokio::test]
    async fn failing_sink_does_not_mask_the_others() {
        let reached = Arc::new(Recording::default());
        let composite = CompositeNotifier::new(vec![
            Arc::new(Failing),
            reached.clone(),
            Arc::new(Failing),
        ]);

        let alert = make_alert();
        let result = composite.notify(&alert, &alert.assignments()[0]).await;

        assert!(result.is_ok());
        assert_eq!(*reached.count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_composite_is_a_noop() {
        let composite = CompositeNotifier::new(vec![]);
        let alert = make_alert();
        assert!(composite.notify(&alert, &alert.assignments()[0]).await.is_ok());
    }
}
