use chrono::{DateTime, Utc};

use hark_core::alert::AckOutcome;
use hark_core::ids::{AckToken, AlertId};
use hark_ports::inbound::AckGateway;

use super::script::{VoiceDocument, VoiceScripts};

/// Serves the interactive prompt for one paged assignment. An identifier
/// that does not parse or resolve yields the matching missing-entity
/// document; the dialogue never errors out on the caller.
pub async fn prompt(
    gateway: &dyn AckGateway,
    scripts: &VoiceScripts,
    alert_id: &str,
    token: &str,
) -> VoiceDocument {
    let Ok(alert_id) = AlertId::parse(alert_id) else {
        return scripts.alert_missing();
    };
    let Ok(token) = AckToken::parse(token) else {
        return scripts.assignment_missing();
    };
    let alert = match gateway.find_alert(&alert_id).await {
        Ok(Some(alert)) => alert,
        _ => return scripts.alert_missing(),
    };
    let Some(assignment) = alert.assignment_by_token(&token) else {
        return scripts.assignment_missing();
    };
    scripts.prompt(&alert, assignment)
}

/// Consumes the gathered digit: "1" acknowledges through the token path,
/// "2" repeats the prompt, anything else (blank included) is invalid input.
pub async fn acknowledge(
    gateway: &dyn AckGateway,
    scripts: &VoiceScripts,
    alert_id: &str,
    token: &str,
    digits: &str,
    at: DateTime<Utc>,
) -> VoiceDocument {
    let Ok(alert_id) = AlertId::parse(alert_id) else {
        return scripts.alert_missing();
    };
    let Ok(token) = AckToken::parse(token) else {
        return scripts.assignment_missing();
    };
    let alert = match gateway.find_alert(&alert_id).await {
        Ok(Some(alert)) => alert,
        _ => return scripts.alert_missing(),
    };
    let Some(assignment) = alert.assignment_by_token(&token) else {
        return scripts.assignment_missing();
    };
    match digits.trim() {
        "1" => {
            let outcome = match gateway.acknowledge_by_token(&alert_id, &token, at).await {
                Ok(outcome) => outcome,
                Err(_) => return scripts.alert_missing(),
            };
            let name = outcome.responder().map(|r| r.name().to_owned());
            match outcome {
                AckOutcome::Acknowledged { .. } => scripts.accepted(name.as_deref()),
                AckOutcome::AlreadyAcknowledged { .. } => {
                    scripts.already_handled(name.as_deref())
                }
                AckOutcome::AlertNotFound => scripts.alert_missing(),
                AckOutcome::AssignmentNotFound | AckOutcome::TokenNotFound => {
                    scripts.assignment_missing()
                }
            }
        }
        "2" => scripts.prompt(&alert, assignment),
        _ => scripts.invalid_input(&alert_id, &token),
    }
}
