use std::collections::BTreeMap;

use crate::catalog::CONTACT_REASON_KEY;

/// Where the user currently is in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Stage {
    /// The "why are you contacting us" screen; no flow is bound.
    #[default]
    Initial,
    /// Answering step `index` of the flow chosen by `reason`.
    Step { reason: String, index: usize },
}

/// Transient progress of one user through the contact wizard.
///
/// A step index only exists together with a chosen reason, so a session can
/// never point into a flow that was not selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    stage: Stage,
    answers: BTreeMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.stage {
            Stage::Initial => None,
            Stage::Step { reason, .. } => Some(reason),
        }
    }

    /// Current step, `-1` while the reason is not chosen yet.
    pub fn step_index(&self) -> isize {
        match self.stage {
            Stage::Initial => -1,
            Stage::Step { index, .. } => index as isize,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.stage {
            Stage::Initial => None,
            Stage::Step { index, .. } => Some(index),
        }
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    pub fn answer(&self, name: &str) -> Option<&str> {
        self.answers.get(name).map(String::as_str)
    }

    pub(crate) fn reset(&mut self) {
        self.stage = Stage::Initial;
        self.answers.clear();
    }

    pub(crate) fn begin(&mut self, reason: &str) {
        self.answers.clear();
        self.answers
            .insert(CONTACT_REASON_KEY.to_string(), reason.to_string());
        self.stage = Stage::Step {
            reason: reason.to_string(),
            index: 0,
        };
    }

    pub(crate) fn move_to(&mut self, next: usize) {
        if let Stage::Step { index, .. } = &mut self.stage {
            *index = next;
        }
    }

    pub(crate) fn save(&mut self, name: &str, value: String) {
        self.answers.insert(name.to_string(), value);
    }
}
