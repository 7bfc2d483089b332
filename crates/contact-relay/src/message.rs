use serde_json::{Map, Value};

use crate::recipients::RecipientRule;

/// A mail ready to hand to a [`crate::Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub reply_to: Option<String>,
}

/// Compose the mail forwarding `record` for `reason`.
pub fn build_message(
    from: &str,
    rule: RecipientRule,
    reason: &str,
    record: &Map<String, Value>,
) -> OutboundMessage {
    OutboundMessage {
        from: from.to_string(),
        to: rule.mailbox.to_string(),
        subject: subject_line(rule, reason),
        text: body_text(record),
        reply_to: record
            .get("email")
            .and_then(Value::as_str)
            .filter(|email| !email.trim().is_empty())
            .map(|email| email.trim().to_string()),
    }
}

/// `"Issue Report: Issue Form"` for the issue reason.
pub fn subject_line(rule: RecipientRule, reason: &str) -> String {
    format!("{}: {} Form", rule.subject, capitalize(reason))
}

pub fn body_text(record: &Map<String, Value>) -> String {
    let dump = serde_json::to_string_pretty(record)
        .unwrap_or_else(|_| Value::Object(record.clone()).to_string());
    format!("You received a new submission:\n\n{dump}")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
