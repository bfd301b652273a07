use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::error::DomainError;
use crate::responder::Responder;

/// A (responder, channel, address) triple inside an escalation level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    responder: Responder,
    channel: Channel,
    address: String,
}

impl Target {
    /// The address defaults to the responder's contact.
    pub fn new(responder: Responder, channel: Channel) -> Self {
        let address = responder.contact().to_string();
        Self {
            responder,
            channel,
            address,
        }
    }

    pub fn with_address(
        responder: Responder,
        channel: Channel,
        address: String,
    ) -> Result<Self, DomainError> {
        if address.trim().is_empty() {
            return Err(DomainError::BlankTargetAddress);
        }
        Ok(Self {
            responder,
            channel,
            address,
        })
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}
