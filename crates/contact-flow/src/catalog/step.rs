use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input control used to collect a step's answer.
///
/// Names follow the HTML input types the contact page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Text,
    Tel,
    Email,
    Date,
    Time,
    Radio,
    Select,
    Textarea,
    Number,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Text => "text",
            StepKind::Tel => "tel",
            StepKind::Email => "email",
            StepKind::Date => "date",
            StepKind::Time => "time",
            StepKind::Radio => "radio",
            StepKind::Select => "select",
            StepKind::Textarea => "textarea",
            StepKind::Number => "number",
        }
    }

    /// Radio and select steps answer with one of their options.
    pub fn is_choice(&self) -> bool {
        matches!(self, StepKind::Radio | StepKind::Select)
    }
}

/// A single question of a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Step {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Answer key in the submitted record.
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Step {
    pub fn new(question: impl Into<String>, kind: StepKind, name: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            kind,
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option == value)
    }
}
