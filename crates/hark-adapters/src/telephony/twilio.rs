use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use hark_ports::error::NotifyError;
use hark_ports::outbound::VoiceGateway;
use hark_ports::types::{CallInstruction, CallRequest};

use crate::config::TwilioSettings;

const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Twilio REST client for outbound calls. A configured instance is injected
/// wherever calls are placed; there is no process-wide client state.
pub struct TwilioGateway {
    http: reqwest::Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioGateway {
    pub fn new(settings: &TwilioSettings) -> Self {
        Self::with_api_base(settings, DEFAULT_API_BASE)
    }

    pub fn with_api_base(settings: &TwilioSettings, api_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            account_sid: settings.account_sid.clone(),
            auth_token: settings.auth_token.clone(),
        }
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base, self.account_sid
        )
    }
}

#[derive(Debug, Deserialize)]
struct CallResponse {
    sid: String,
}

// Twilio takes the instruction either as a URL it will fetch or as the
// literal TwiML, mutually exclusive form fields.
fn call_params(request: &CallRequest) -> Vec<(&'static str, String)> {
    let instruction = match &request.instruction {
        CallInstruction::Hosted(url) => ("Url", url.clone()),
        CallInstruction::Inline(document) => ("Twiml", document.clone()),
    };
    vec![
        ("From", request.from.clone()),
        ("To", request.to.clone()),
        instruction,
    ]
}

#[async_trait]
impl VoiceGateway for TwilioGateway {
    async fn place_call(&self, request: &CallRequest) -> Result<String, NotifyError> {
        debug!(to = %request.to, "placing outbound call");
        let response = self
            .http
            .post(self.calls_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&call_params(request))
            .send()
            .await
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::CallRejected(format!("{status}: {body}")));
        }

        let call: CallResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))?;
        Ok(call.sid)
    }
}
