use serde_json::{Value, json};

use crate::{
    catalog::{FlowCatalog, ReasonOption, Step, StepKind},
    session::{Session, Stage},
};

/// Labels of the navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLabel {
    Next,
    Submit,
    Back,
}

impl NavLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavLabel::Next => "Next",
            NavLabel::Submit => "Submit",
            NavLabel::Back => "Back",
        }
    }
}

/// Position shown by the progress bar; `current` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub current: usize,
    pub total: usize,
}

/// Everything a front-end needs to draw the current screen.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPayload {
    /// Reason buttons; no navigation buttons are shown here.
    Initial {
        question: String,
        options: Vec<ReasonOption>,
    },
    Step {
        /// Label of the chosen reason, shown as the heading.
        title: String,
        question: String,
        kind: StepKind,
        name: String,
        options: Vec<String>,
        /// Prefilled control value.
        value: Option<String>,
        progress: RenderProgress,
        primary: NavLabel,
        secondary: NavLabel,
    },
}

impl RenderPayload {
    pub fn is_initial(&self) -> bool {
        matches!(self, RenderPayload::Initial { .. })
    }

    /// The action the Enter key triggers, if the screen has one.
    pub fn primary(&self) -> Option<NavLabel> {
        match self {
            RenderPayload::Initial { .. } => None,
            RenderPayload::Step { primary, .. } => Some(*primary),
        }
    }
}

/// What the control of `step` holds when it is drawn: the saved answer, or
/// the first option of a select, which always has something selected.
pub fn control_value(step: &Step, session: &Session) -> Option<String> {
    session
        .answer(&step.name)
        .map(str::to_string)
        .or_else(|| match step.kind {
            StepKind::Select => step.options.first().cloned(),
            _ => None,
        })
}

/// Build the payload for whatever screen `session` is on.
pub fn build_render_payload(catalog: &FlowCatalog, session: &Session) -> RenderPayload {
    match session.stage() {
        Stage::Step { reason, index } => step_payload(catalog, session, reason, *index)
            .unwrap_or_else(|| initial_payload(catalog)),
        Stage::Initial => initial_payload(catalog),
    }
}

pub(crate) fn initial_payload(catalog: &FlowCatalog) -> RenderPayload {
    RenderPayload::Initial {
        question: catalog.initial.question.clone(),
        options: catalog.initial.options.clone(),
    }
}

pub(crate) fn step_payload(
    catalog: &FlowCatalog,
    session: &Session,
    reason: &str,
    index: usize,
) -> Option<RenderPayload> {
    let flow = catalog.flow(reason)?;
    let step = flow.step(index)?;
    let total = flow.steps.len();
    let primary = if index + 1 == total {
        NavLabel::Submit
    } else {
        NavLabel::Next
    };

    Some(RenderPayload::Step {
        title: catalog.label(reason).unwrap_or_default().to_string(),
        question: step.question.clone(),
        kind: step.kind,
        name: step.name.clone(),
        options: step.options.clone(),
        value: control_value(step, session),
        progress: RenderProgress {
            current: index + 1,
            total,
        },
        primary,
        secondary: NavLabel::Back,
    })
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    match payload {
        RenderPayload::Initial { question, options } => json!({
            "screen": "initial",
            "question": question,
            "options": options
                .iter()
                .map(|option| json!({ "label": option.label, "value": option.value }))
                .collect::<Vec<_>>(),
            "actions": [],
        }),
        RenderPayload::Step {
            title,
            question,
            kind,
            name,
            options,
            value,
            progress,
            primary,
            secondary,
        } => json!({
            "screen": "step",
            "title": title,
            "question": question,
            "type": kind.as_str(),
            "name": name,
            "options": options,
            "value": value,
            "progress": {
                "current": progress.current,
                "total": progress.total,
            },
            "actions": [primary.as_str(), secondary.as_str()],
        }),
    }
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    match payload {
        RenderPayload::Initial { question, options } => {
            lines.push(question.clone());
            for (position, option) in options.iter().enumerate() {
                lines.push(format!("  {}) {}", position + 1, option.label));
            }
        }
        RenderPayload::Step {
            title,
            question,
            kind,
            options,
            value,
            progress,
            primary,
            secondary,
            ..
        } => {
            if !title.is_empty() {
                lines.push(title.clone());
            }
            lines.push(format!(
                "[{}/{}] {}",
                progress.current, progress.total, question
            ));
            if kind.is_choice() {
                for (position, option) in options.iter().enumerate() {
                    let marker = if value.as_deref() == Some(option.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    lines.push(format!(" {marker}{}) {}", position + 1, option));
                }
            } else if let Some(value) = value {
                lines.push(format!("  Current value: {}", value));
            }
            lines.push(format!("[{}] [{}]", primary.as_str(), secondary.as_str()));
        }
    }
    lines.join("\n")
}
