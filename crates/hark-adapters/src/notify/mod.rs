pub mod composite;
pub mod console;
pub mod voice;

pub use composite::CompositeNotifier;
pub use console::ConsoleNotifier;
pub use voice::{InstructionProvider, VoiceNotifier};
