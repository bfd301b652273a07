use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use hark_core::alert::{AckOutcome, Alert, Assignment, Priority, Status};
use hark_core::error::DomainError;
use hark_core::escalation::EscalationPolicy;
use hark_core::ids::{AckToken, AlertId, AssignmentId, ResponderId};
use hark_ports::error::PortError;
use hark_ports::inbound::AckGateway;
use hark_ports::outbound::{AlertRepository, EventPublisher, Notifier};
use hark_ports::types::AlertFilter;

use crate::error::AppError;

/// The routing and escalation engine. Holds the priority -> policy table,
/// owns alert lifecycle against the repository, and fans dispatched
/// assignments out through the notifier.
///
/// Every read-inspect-mutate-persist sequence on one alert runs under that
/// alert's guard; notification delivery happens strictly after the guard is
/// released so a slow sink cannot stall the raise, advance or webhook paths.
pub struct OncallService<A, N, EP>
where
    A: AlertRepository,
    N: Notifier,
    EP: EventPublisher,
{
    alerts: A,
    notifier: N,
    events: EP,
    policies: HashMap<Priority, EscalationPolicy>,
    locks: DashMap<AlertId, Arc<Mutex<()>>>,
}

impl<A, N, EP> OncallService<A, N, EP>
where
    A: AlertRepository,
    N: Notifier,
    EP: EventPublisher,
{
    pub fn new(
        alerts: A,
        notifier: N,
        events: EP,
        policies: HashMap<Priority, EscalationPolicy>,
    ) -> Self {
        Self {
            alerts,
            notifier,
            events,
            policies,
            locks: DashMap::new(),
        }
    }

    /// Creates a pending alert from the policy registered for `priority`
    /// and pages its first level.
    pub async fn raise_alert(
        &self,
        message: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Alert, AppError> {
        let policy = self
            .policies
            .get(&priority)
            .ok_or(DomainError::NoPolicyForPriority(priority))?;
        let (alert, events) = Alert::raise(message.to_owned(), priority, policy.clone(), now)?;
        self.alerts.save(&alert).await?;
        self.events.publish(events).await?;
        let paged: Vec<Assignment> = alert.assignments_at(0).into_iter().cloned().collect();
        self.deliver(&alert, &paged).await;
        Ok(alert)
    }

    pub async fn get_alert(&self, id: &AlertId) -> Result<Option<Alert>, AppError> {
        Ok(self.alerts.find_by_id(id).await?)
    }

    /// Alerts matching the filter, oldest first.
    pub async fn list_alerts(&self, filter: AlertFilter) -> Result<Vec<Alert>, AppError> {
        let mut alerts = self.alerts.find_by_filter(&filter).await?;
        alerts.sort_by_key(Alert::created_at);
        Ok(alerts)
    }

    /// Acknowledgement entered from a dashboard: any assignment paging this
    /// responder ends the escalation.
    pub async fn acknowledge_by_responder(
        &self,
        alert_id: &AlertId,
        responder_id: &ResponderId,
        at: DateTime<Utc>,
    ) -> Result<AckOutcome, AppError> {
        let lock = self.lock_for(alert_id);
        let _guard = lock.lock().await;
        let Some(alert) = self.alerts.find_by_id(alert_id).await? else {
            return Ok(AckOutcome::AlertNotFound);
        };
        let Some(assignment_id) = alert
            .assignment_for_responder(responder_id)
            .map(|a| a.id().clone())
        else {
            return Ok(AckOutcome::AssignmentNotFound);
        };
        self.complete_acknowledgement(alert, &assignment_id, at).await
    }

    /// Acknowledgement entered from a voice callback carrying a single-use
    /// token.
    pub async fn acknowledge_by_token(
        &self,
        alert_id: &AlertId,
        token: &AckToken,
        at: DateTime<Utc>,
    ) -> Result<AckOutcome, AppError> {
        let lock = self.lock_for(alert_id);
        let _guard = lock.lock().await;
        let Some(alert) = self.alerts.find_by_id(alert_id).await? else {
            return Ok(AckOutcome::AlertNotFound);
        };
        let Some(assignment_id) = alert.assignment_by_token(token).map(|a| a.id().clone()) else {
            return Ok(AckOutcome::TokenNotFound);
        };
        self.complete_acknowledgement(alert, &assignment_id, at).await
    }

    /// One escalation tick over every pending alert. Returns the alerts
    /// that changed state (escalated or exhausted) on this tick.
    pub async fn advance(&self, now: DateTime<Utc>) -> Result<Vec<Alert>, AppError> {
        let pending = self
            .alerts
            .find_by_filter(&AlertFilter {
                status: Some(Status::Pending),
            })
            .await?;
        let mut changed = Vec::new();
        for alert in pending {
            if let Some((updated, paged)) = self.advance_alert(alert.id(), now).await? {
                self.deliver(&updated, &paged).await;
                changed.push(updated);
            }
        }
        Ok(changed)
    }

    // Runs one alert's tick under its guard; the returned assignments are
    // delivered by the caller once the guard is gone.
    async fn advance_alert(
        &self,
        id: &AlertId,
        now: DateTime<Utc>,
    ) -> Result<Option<(Alert, Vec<Assignment>)>, AppError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;
        let Some(mut alert) = self.alerts.find_by_id(id).await? else {
            return Ok(None);
        };
        let level_before = alert.current_level();
        let events = alert.advance(now);
        if events.is_empty() {
            return Ok(None);
        }
        self.alerts.save(&alert).await?;
        self.events.publish(events).await?;
        let paged = if alert.status() == Status::Pending && alert.current_level() > level_before {
            alert
                .assignments_at(alert.current_level())
                .into_iter()
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        Ok(Some((alert, paged)))
    }

    // Caller holds the alert's guard.
    async fn complete_acknowledgement(
        &self,
        mut alert: Alert,
        assignment_id: &AssignmentId,
        at: DateTime<Utc>,
    ) -> Result<AckOutcome, AppError> {
        let (outcome, events) = alert.acknowledge(assignment_id, at);
        if !events.is_empty() {
            self.alerts.save(&alert).await?;
            self.events.publish(events).await?;
        }
        Ok(outcome)
    }

    async fn deliver(&self, alert: &Alert, assignments: &[Assignment]) {
        for assignment in assignments {
            if let Err(err) = self.notifier.notify(alert, assignment).await {
                tracing::warn!(
                    alert_id = %alert.id(),
                    assignment_id = %assignment.id(),
                    error = %err,
                    "notification delivery failed"
                );
            }
        }
    }

    fn lock_for(&self, id: &AlertId) -> Arc<Mutex<()>> {
        self.locks.entry(id.clone()).or_default().clone()
    }
}

#[async_trait]
impl<A, N, EP> AckGateway for OncallService<A, N, EP>
where
    A: AlertRepository,
    N: Notifier,
    EP: EventPublisher,
{
    async fn find_alert(&self, alert_id: &AlertId) -> Result<Option<Alert>, PortError> {
        self.alerts.find_by_id(alert_id).await
    }

    async fn acknowledge_by_token(
        &self,
        alert_id: &AlertId,
        token: &AckToken,
        at: DateTime<Utc>,
    ) -> Result<AckOutcome, PortError> {
        match OncallService::acknowledge_by_token(self, alert_id, token, at).await {
            Ok(outcome) => Ok(outcome),
            Err(AppError::Port(err)) => Err(err),
            Err(AppError::Domain(err)) => Err(PortError::Persistence(err.to_string())),
        }
    }
}
