#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contact_relay::{DispatchError, Mailer, OutboundMessage, Relay};

pub const FROM: &str = "forms@parfumis.com";

/// Mailer that keeps every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: OutboundMessage) -> Result<(), DispatchError> {
        self.sent.lock().expect("mailer lock").push(message);
        if self.fail {
            Err(DispatchError::Task("smtp unavailable".into()))
        } else {
            Ok(())
        }
    }
}

pub fn relay_with(mailer: Arc<RecordingMailer>) -> Relay {
    Relay::new(mailer, FROM)
}
