use tracing::debug;

const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
const ENV_FROM_NUMBER: &str = "TWILIO_FROM_NUMBER";
const ENV_WEBHOOK_BASE: &str = "TWILIO_ACK_WEBHOOK_BASE";

const DEFAULT_WEBHOOK_BASE: &str = "https://example.com/oncall/twilio";

/// Voice-provider wiring read from the environment. `from_env` yields
/// `None` while the credential triple is incomplete; callers then run
/// without the voice adapter installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioSettings {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub webhook_base: String,
}

impl TwilioSettings {
    pub fn from_env() -> Option<Self> {
        let account_sid = std::env::var(ENV_ACCOUNT_SID).ok()?;
        let auth_token = std::env::var(ENV_AUTH_TOKEN).ok()?;
        let from_number = std::env::var(ENV_FROM_NUMBER).ok()?;
        let webhook_base = std::env::var(ENV_WEBHOOK_BASE)
            .unwrap_or_else(|_| DEFAULT_WEBHOOK_BASE.to_string());
        debug!(from = %from_number, "voice adapter configured from environment");
        Some(Self {
            account_sid,
            auth_token,
            from_number,
            webhook_base,
        })
    }
}
