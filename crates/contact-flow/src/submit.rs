use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{CONTACT_REASON_KEY, Flow};

/// The record posted to the relay: `contactReason` followed by every step
/// answer in step order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionPayload(Map<String, Value>);

impl SubmissionPayload {
    pub fn build(reason: &str, flow: &Flow, answers: &BTreeMap<String, String>) -> Self {
        let mut fields = Map::new();
        fields.insert(CONTACT_REASON_KEY.into(), Value::String(reason.to_string()));
        for step in &flow.steps {
            if let Some(value) = answers.get(&step.name) {
                fields.insert(step.name.clone(), Value::String(value.clone()));
            }
        }
        Self(fields)
    }

    pub fn reason(&self) -> Option<&str> {
        self.0.get(CONTACT_REASON_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Response body of the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
}

impl Acknowledgement {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not reach the relay: {0}")]
    Network(String),
    #[error("relay answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unreadable relay acknowledgement: {0}")]
    Decode(String),
    #[error("relay rejected the submission: {0}")]
    Rejected(String),
}

/// Delivers a finished answer-set to the relay.
pub trait Submitter {
    fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<Acknowledgement, TransportError>;
}

impl<T: Submitter + ?Sized> Submitter for &T {
    fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<Acknowledgement, TransportError> {
        (**self).submit(endpoint, payload)
    }
}
