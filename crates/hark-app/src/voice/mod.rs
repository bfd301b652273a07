pub mod script;
pub mod webhook;

pub use script::{VoiceDocument, VoiceScripts};
