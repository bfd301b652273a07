pub mod error;
pub mod oncall_service;
pub mod voice;
