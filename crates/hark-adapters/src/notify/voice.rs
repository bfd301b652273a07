use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::info;

use hark_core::alert::{Alert, Assignment};
use hark_core::channel::Channel;
use hark_core::ids::AssignmentId;
use hark_core::responder::Phone;
use hark_ports::error::NotifyError;
use hark_ports::outbound::{Notifier, VoiceGateway};
use hark_ports::types::{CallInstruction, CallRequest, NotifyResult};

/// Application-supplied choice of instruction for one assignment's call:
/// typically the hosted prompt URL, or an inline script document.
pub type InstructionProvider = Arc<dyn Fn(&Alert, &Assignment) -> CallInstruction + Send + Sync>;

/// Pages voice targets by placing an outbound call through the gateway.
/// Assignments for any other channel are ignored; voice addresses must be
/// E.164. Placed call ids are kept for observability.
pub struct VoiceNotifier<G: VoiceGateway> {
    gateway: G,
    from: String,
    instructions: InstructionProvider,
    placed_calls: DashMap<AssignmentId, String>,
}

impl<G: VoiceGateway> VoiceNotifier<G> {
    pub fn new(gateway: G, from: String, instructions: InstructionProvider) -> Self {
        Self {
            gateway,
            from,
            instructions,
            placed_calls: DashMap::new(),
        }
    }

    /// The provider call id recorded for an assignment, if a call was placed.
    pub fn call_id(&self, assignment_id: &AssignmentId) -> Option<String> {
        self.placed_calls
            .get(assignment_id)
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl<G: VoiceGateway> Notifier for VoiceNotifier<G> {
    async fn notify(
        &self,
        alert: &Alert,
        assignment: &Assignment,
    ) -> Result<NotifyResult, NotifyError> {
        let target = assignment.target();
        if target.channel() != Channel::Voice {
            return Ok(NotifyResult::default());
        }
        let to = Phone::parse(target.address())
            .map_err(|_| NotifyError::InvalidTarget(target.address().to_string()))?;
        let request = CallRequest {
            from: self.from.clone(),
            to: to.as_str().to_string(),
            instruction: (self.instructions)(alert, assignment),
        };
        let call_id = self.gateway.place_call(&request).await?;
        info!(
            alert_id = %alert.id(),
            assignment_id = %assignment.id(),
            call_id = %call_id,
            to = %request.to,
            "outbound call placed"
        );
        self.placed_calls
            .insert(assignment.id().clone(), call_id.clone());
        Ok(NotifyResult {
            external_id: Some(call_id),
            ..NotifyResult::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use hark_core::alert::Priority;
    use hark_core::escalation::{EscalationLevel, EscalationPolicy, Target};
    use hark_core::responder::Responder;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockGateway {
        requests: Mutex<Vec<CallRequest>>,
    }

    #[async_trait]
    impl VoiceGateway for MockGateway {
        async fn place_call(&self, request: &CallRequest) -> Result<String, NotifyError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("CA0123456789".into())
        }
    }

    fn t0() -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn make_alert(channel: Channel, address: &str) -> Alert {
        let responder = Responder::new("Dana".into(), address.into()).unwrap();
        let level =
            EscalationLevel::new(vec![Target::new(responder, channel)], 300).unwrap();
        let policy = EscalationPolicy::new(vec![level]).unwrap();
        let (alert, _) = Alert::raise("db down".into(), Priority::Critical, policy, t0()).unwrap();
        alert
    }

    fn hosted_provider() -> InstructionProvider {
        Arc::new(|alert, assignment| {
            CallInstruction::Hosted(format!(
                "https://hooks.example.com/prompt?alertId={}&token={}",
                alert.id(),
                assignment.token()
            ))
        })
    }

    fn notifier(gateway: MockGateway) -> VoiceNotifier<MockGateway> {
        VoiceNotifier::new(gateway, "+12025550000".into(), hosted_provider())
    }

    #[tokio::test]
    async fn non_voice_target_is_ignored() {
        let voice = notifier(MockGateway::default());
        let alert = make_alert(Channel::Email, "dana@test.com");

        let result = voice.notify(&alert, &alert.assignments()[0]).await.unwrap();

        assert!(result.external_id.is_none());
        assert!(voice.gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_address_is_rejected_without_a_call() {
        let voice = notifier(MockGateway::default());
        let alert = make_alert(Channel::Voice, "extension 12");

        let result = voice.notify(&alert, &alert.assignments()[0]).await;

        assert!(matches!(result, Err(NotifyError::InvalidTarget(_))));
        assert!(voice.gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn voice_target_places_call_with_hosted_url() {
        let voice = notifier(MockGateway::default());
        let alert = make_alert(Channel::Voice, "+12025551234");
        let assignment = &alert.assignments()[0];

        let result = voice.notify(&alert, assignment).await.unwrap();

        assert_eq!(result.external_id.as_deref(), Some("CA0123456789"));
        let requests = voice.gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].from, "+12025550000");
        assert_eq!(requests[0].to, "+12025551234");
        let CallInstruction::Hosted(url) = &requests[0].instruction else {
            panic!("expected hosted instruction");
        };
        assert!(url.contains(&alert.id().to_string()));
        assert!(url.contains(&assignment.token().to_string()));
    }

    #[tokio::test]
    async fn call_id_is_recorded_per_assignment() {
        let voice = notifier(MockGateway::default());
        let alert = make_alert(Channel::Voice, "+12025551234");
        let assignment = &alert.assignments()[0];

        voice.notify(&alert, assignment).await.unwrap();

        assert_eq!(voice.call_id(assignment.id()).as_deref(), Some("CA0123456789"));
        assert!(voice.call_id(&AssignmentId::new()).is_none());
    }

    #[tokio::test]
    async fn inline_instruction_passes_through() {
        let provider: InstructionProvider =
            Arc::new(|_, _| CallInstruction::Inline("<Response/>".into()));
        let voice = VoiceNotifier::new(MockGateway::default(), "+12025550000".into(), provider);
        let alert = make_alert(Channel::Voice, "+12025551234");

        voice.notify(&alert, &alert.assignments()[0]).await.unwrap();

        let requests = voice.gateway.requests.lock().unwrap();
        assert_eq!(
            requests[0].instruction,
            CallInstruction::Inline("<Response/>".into())
        );
    }
}
