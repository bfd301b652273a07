pub mod config;
pub mod events;
pub mod http;
pub mod notify;
pub mod persistence;
pub mod telephony;
