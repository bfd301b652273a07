use hark_core::alert::{Alert, Assignment};
use hark_core::ids::{AckToken, AlertId};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const VOICE: &str = "alice";

/// An XML voice-response document, ready to be served back to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDocument(String);

impl VoiceDocument {
    pub fn as_xml(&self) -> &str {
        &self.0
    }

    pub fn into_xml(self) -> String {
        self.0
    }
}

/// Builds the voice documents driving the interactive phone prompt, and the
/// callback URLs they point back at.
#[derive(Debug, Clone)]
pub struct VoiceScripts {
    base_url: String,
}

impl VoiceScripts {
    /// `base_url` is the public prefix under which the `/prompt` and
    /// `/acknowledge` endpoints are mounted; a trailing slash is tolerated.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn prompt_url(&self, alert_id: &AlertId, token: &AckToken) -> String {
        self.callback_url("prompt", alert_id, token)
    }

    pub fn acknowledge_url(&self, alert_id: &AlertId, token: &AckToken) -> String {
        self.callback_url("acknowledge", alert_id, token)
    }

    fn callback_url(&self, suffix: &str, alert_id: &AlertId, token: &AckToken) -> String {
        format!(
            "{}/{suffix}?alertId={alert_id}&token={token}",
            self.base_url
        )
    }

    /// The interactive prompt: gather one keypad digit within ten seconds
    /// and post it to the acknowledge endpoint; on silence, say so and loop
    /// back to the prompt.
    pub fn prompt(&self, alert: &Alert, assignment: &Assignment) -> VoiceDocument {
        let announcement = format!(
            "{} alert: {}. Press 1 to acknowledge. Press 2 to repeat this message.",
            alert.priority().as_str(),
            alert.message(),
        );
        let action = self.acknowledge_url(alert.id(), assignment.token());
        let repeat = self.prompt_url(alert.id(), assignment.token());
        VoiceDocument(format!(
            "{XML_HEADER}<Response>\n  <Gather numDigits=\"1\" timeout=\"10\" method=\"POST\" action=\"{}\">\n    <Say voice=\"{VOICE}\">{}</Say>\n  </Gather>\n  <Say voice=\"{VOICE}\">We did not receive any input.</Say>\n  <Redirect method=\"POST\">{}</Redirect>\n</Response>\n",
            xml_escape(&action),
            xml_escape(&announcement),
            xml_escape(&repeat),
        ))
    }

    pub fn accepted(&self, responder_name: Option<&str>) -> VoiceDocument {
        let thanks = match responder_name {
            Some(name) => format!("Thank you, {name}."),
            None => "Thank you.".to_string(),
        };
        self.farewell(&format!("{thanks} The alert is acknowledged. Goodbye."))
    }

    pub fn already_handled(&self, responder_name: Option<&str>) -> VoiceDocument {
        let message = match responder_name {
            Some(name) => format!("This alert was already acknowledged by {name}. Goodbye."),
            None => "This alert was already acknowledged. Goodbye.".to_string(),
        };
        self.farewell(&message)
    }

    pub fn invalid_input(&self, alert_id: &AlertId, token: &AckToken) -> VoiceDocument {
        let repeat = self.prompt_url(alert_id, token);
        VoiceDocument(format!(
            "{XML_HEADER}<Response>\n  <Say voice=\"{VOICE}\">Sorry, we did not understand that response.</Say>\n  <Redirect method=\"POST\">{}</Redirect>\n</Response>\n",
            xml_escape(&repeat),
        ))
    }

    pub fn alert_missing(&self) -> VoiceDocument {
        self.farewell("We could not find the alert you were called about. Please contact the operations team. Goodbye.")
    }

    pub fn assignment_missing(&self) -> VoiceDocument {
        self.farewell("We could not find the page you were called about. Please contact the operations team. Goodbye.")
    }

    fn farewell(&self, message: &str) -> VoiceDocument {
        VoiceDocument(format!(
            "{XML_HEADER}<Response>\n  <Say voice=\"{VOICE}\">{}</Say>\n  <Hangup/>\n</Response>\n",
            xml_escape(message),
        ))
    }
}

/// Escapes the five XML-significant characters. Applied to every piece of
/// text or attribute value embedded in a document, alert messages included.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
