use async_trait::async_trait;
use chrono::{DateTime, Utc};

use hark_core::alert::{AckOutcome, Alert};
use hark_core::ids::{AckToken, AlertId};

use crate::error::PortError;

/// The surface the voice-callback dialogue drives: resolve an alert, and
/// present a single-use token to end its escalation. Implemented by the
/// on-call engine; consumed as a trait object by the webhook transport.
#[async_trait]
pub trait AckGateway: Send + Sync {
    async fn find_alert(&self, alert_id: &AlertId) -> Result<Option<Alert>, PortError>;

    async fn acknowledge_by_token(
        &self,
        alert_id: &AlertId,
        token: &AckToken,
        at: DateTime<Utc>,
    ) -> Result<AckOutcome, PortError>;
}
