pub mod alert;
pub mod channel;
pub mod error;
pub mod escalation;
pub mod events;
pub mod ids;
pub mod responder;
