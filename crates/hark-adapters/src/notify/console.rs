use async_trait::async_trait;
use tracing::info;

use hark_core::alert::{Alert, Assignment};
use hark_core::channel::Channel;
use hark_ports::error::NotifyError;
use hark_ports::outbound::Notifier;
use hark_ports::types::NotifyResult;

/// Log sink for paged assignments. With a channel filter set it
/// early-returns on assignments addressed to other channels.
#[derive(Default)]
pub struct ConsoleNotifier {
    only: Option<Channel>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_channel(channel: Channel) -> Self {
        Self {
            only: Some(channel),
        }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(
        &self,
        alert: &Alert,
        assignment: &Assignment,
    ) -> Result<NotifyResult, NotifyError> {
        if self.only.is_some_and(|c| c != assignment.target().channel()) {
            return Ok(NotifyResult::default());
        }
        info!(
            alert_id = %alert.id(),
            priority = %alert.priority(),
            level = assignment.level(),
            responder = assignment.target().responder().name(),
            address = assignment.target().address(),
            deadline = %assignment.deadline(),
            "paging responder"
        );
        Ok(NotifyResult::default())
    }
}
