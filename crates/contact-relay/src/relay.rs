use std::sync::Arc;

use axum::http::{Method, StatusCode};
use contact_flow::{Acknowledgement, CONTACT_REASON_KEY, DEFAULT_REASON};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::{mailer::Mailer, message::build_message, recipients::recipient_for};

/// One invocation of the relay, independent of the HTTP framework.
#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub method: Method,
    /// The `type` query parameter.
    pub reason: Option<String>,
    pub body: String,
}

impl RelayRequest {
    pub fn post(reason: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            reason: reason.map(str::to_string),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Text(&'static str),
    Json(Acknowledgement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl RelayResponse {
    fn text(status: StatusCode, text: &'static str) -> Self {
        Self {
            status,
            body: ResponseBody::Text(text),
        }
    }

    fn json(status: StatusCode, ack: Acknowledgement) -> Self {
        Self {
            status,
            body: ResponseBody::Json(ack),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Reason-code of a submission: the `type` parameter, else the body's
/// `contactReason`, else `general`. Blank values count as absent.
pub fn resolve_reason(query: Option<&str>, record: &Map<String, Value>) -> String {
    query
        .filter(|reason| !reason.is_empty())
        .or_else(|| {
            record
                .get(CONTACT_REASON_KEY)
                .and_then(Value::as_str)
                .filter(|reason| !reason.is_empty())
        })
        .unwrap_or(DEFAULT_REASON)
        .to_string()
}

/// Forwards contact submissions to the mailbox responsible for their reason.
#[derive(Clone)]
pub struct Relay {
    mailer: Arc<dyn Mailer>,
    from: String,
}

impl Relay {
    pub fn new(mailer: Arc<dyn Mailer>, from: impl Into<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
        }
    }

    pub async fn handle(&self, request: RelayRequest) -> RelayResponse {
        if request.method != Method::POST {
            warn!(method = %request.method, "rejecting non-POST submission");
            return RelayResponse::text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
        }

        let record = match serde_json::from_str::<Value>(&request.body) {
            Ok(Value::Object(record)) => record,
            Ok(_) => {
                warn!("submission body is not a JSON object");
                return RelayResponse::text(StatusCode::BAD_REQUEST, "Invalid JSON");
            }
            Err(err) => {
                warn!(error = %err, "submission body is not valid JSON");
                return RelayResponse::text(StatusCode::BAD_REQUEST, "Invalid JSON");
            }
        };

        let reason = resolve_reason(request.reason.as_deref(), &record);
        let rule = recipient_for(&reason);
        let message = build_message(&self.from, rule, &reason, &record);
        info!(%reason, to = rule.mailbox, "forwarding contact submission");

        match self.mailer.send(message).await {
            Ok(()) => RelayResponse::json(
                StatusCode::OK,
                Acknowledgement::sent("Email sent successfully."),
            ),
            Err(err) => {
                error!(error = %err, %reason, "Email sending error");
                RelayResponse::json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Acknowledgement::failed("Failed to send email."),
                )
            }
        }
    }
}
