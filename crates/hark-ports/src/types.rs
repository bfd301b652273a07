use std::collections::HashMap;

use hark_core::alert::Status;

/// Filter criteria for enumerating alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertFilter {
    pub status: Option<Status>,
}

/// Delivery metadata returned by notifiers.
#[derive(Debug, Clone, Default)]
pub struct NotifyResult {
    pub external_id: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// What the voice provider should do once the callee picks up: fetch its
/// instructions from a hosted URL, or run an inline script document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallInstruction {
    Hosted(String),
    Inline(String),
}

/// An outbound call request handed to the voice gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub from: String,
    pub to: String,
    pub instruction: CallInstruction,
}
