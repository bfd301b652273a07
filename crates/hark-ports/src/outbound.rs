use async_trait::async_trait;

use hark_core::alert::{Alert, Assignment};
use hark_core::events::DomainEvent;
use hark_core::ids::AlertId;

use crate::error::{NotifyError, PortError};
use crate::types::{AlertFilter, CallRequest, NotifyResult};

/// Store-by-identifier abstraction over alert persistence. `save` replaces
/// any stored value under the same id; implementations must be safe to call
/// from the raise, advance and webhook paths concurrently.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn save(&self, alert: &Alert) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &AlertId) -> Result<Option<Alert>, PortError>;
    async fn find_by_filter(&self, filter: &AlertFilter) -> Result<Vec<Alert>, PortError>;
}

/// Best-effort delivery of one assignment. A failure here never fails the
/// dispatch that produced it; escalation on timeout is the recovery path.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alert: &Alert, assignment: &Assignment)
        -> Result<NotifyResult, NotifyError>;
}

/// The voice-provider client boundary: place one outbound call and return
/// the provider's call identifier.
#[async_trait]
pub trait VoiceGateway: Send + Sync {
    async fn place_call(&self, request: &CallRequest) -> Result<String, NotifyError>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError>;
}
