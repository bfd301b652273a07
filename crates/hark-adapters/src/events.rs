use async_trait::async_trait;
use tracing::info;

use hark_core::events::DomainEvent;
use hark_ports::error::PortError;
use hark_ports::outbound::EventPublisher;

/// Writes domain events to the log; the default publisher when nothing
/// durable is attached.
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError> {
        for event in &events {
            info!(
                event = event.event_type(),
                occurred_at = %event.occurred_at(),
                "domain event"
            );
        }
        Ok(())
    }
}
