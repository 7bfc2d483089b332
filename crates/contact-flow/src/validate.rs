use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Step, StepKind};

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("date pattern")
});
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d)?$").expect("time pattern"));

/// A rejected answer. The session is left untouched when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    pub step: String,
    pub code: String,
    pub message: String,
}

/// Check the control value of `step` and return the value to store.
///
/// `None` means the control holds nothing, e.g. a radio group with no button
/// checked.
pub fn validate_step(step: &Step, value: Option<&str>) -> Result<String, ValidationError> {
    if step.kind == StepKind::Radio {
        let Some(selected) = value else {
            return Err(base_error(step, "Please select an option.", "no_selection"));
        };
        if !step.has_option(selected) {
            return Err(base_error(
                step,
                "Please choose one of the listed options.",
                "invalid_option",
            ));
        }
        return Ok(selected.to_string());
    }

    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(base_error(step, "Please fill in this field.", "empty"));
    }

    match step.kind {
        StepKind::Select if !step.has_option(trimmed) => Err(base_error(
            step,
            "Please choose one of the listed options.",
            "invalid_option",
        )),
        StepKind::Number if !is_finite_number(trimmed) => {
            Err(base_error(step, "Please enter a number.", "not_a_number"))
        }
        StepKind::Date if !DATE_PATTERN.is_match(trimmed) => Err(base_error(
            step,
            "Please enter a date as YYYY-MM-DD.",
            "invalid_date",
        )),
        StepKind::Time if !TIME_PATTERN.is_match(trimmed) => Err(base_error(
            step,
            "Please enter a time as HH:MM.",
            "invalid_time",
        )),
        _ => Ok(trimmed.to_string()),
    }
}

fn is_finite_number(text: &str) -> bool {
    text.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

fn base_error(step: &Step, message: &str, code: &str) -> ValidationError {
    ValidationError {
        step: step.name.clone(),
        code: code.into(),
        message: message.into(),
    }
}
