use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::{Flow, FlowCatalog, Step},
    render::{self, RenderPayload},
    session::Session,
    submit::{Acknowledgement, SubmissionPayload, Submitter, TransportError},
    validate::{ValidationError, validate_step},
};

/// Result of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the given step.
    Moved(usize),
    /// The last step was answered and the relay accepted the submission.
    Submitted(Acknowledgement),
}

/// Result of `retreat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved(usize),
    /// Backed out of the first step; the session was reset.
    Restarted,
}

/// Messages shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ThankYou,
    SubmitFailed,
    Invalid(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::ThankYou => "Thank you for contacting us. We will get back to you soon.",
            Notice::SubmitFailed => {
                "There was an error submitting your form. Please try again later."
            }
            Notice::Invalid(message) => message,
        }
    }
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("unknown contact reason '{0}'")]
    UnknownReason(String),
    #[error("a contact reason was already chosen")]
    NotAtInitialScreen,
    #[error("no step is active")]
    NoActiveStep,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl FlowError {
    /// The notice a front-end should show for this failure, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            FlowError::Validation(error) => Some(Notice::Invalid(error.message.clone())),
            FlowError::Transport(_) => Some(Notice::SubmitFailed),
            _ => None,
        }
    }
}

/// Drives one user through the contact flows.
///
/// The engine owns the session; front-ends feed it control values and draw
/// whatever `render` returns.
pub struct FlowEngine<S> {
    catalog: FlowCatalog,
    session: Session,
    submitter: S,
}

impl<S: Submitter> FlowEngine<S> {
    pub fn new(catalog: FlowCatalog, submitter: S) -> Self {
        Self {
            catalog,
            session: Session::new(),
            submitter,
        }
    }

    pub fn catalog(&self) -> &FlowCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn current_flow(&self) -> Option<&Flow> {
        self.session
            .reason()
            .and_then(|reason| self.catalog.flow(reason))
    }

    pub fn current_step(&self) -> Option<&Step> {
        let index = self.session.current_index()?;
        self.current_flow()?.step(index)
    }

    /// Value the current control is drawn with.
    pub fn control_value(&self) -> Option<String> {
        self.current_step()
            .and_then(|step| render::control_value(step, &self.session))
    }

    /// Reset to the initial screen.
    pub fn start(&mut self) -> RenderPayload {
        debug!("contact wizard reset to initial screen");
        self.session.reset();
        self.render()
    }

    pub fn choose_reason(&mut self, code: &str) -> Result<RenderPayload, FlowError> {
        if self.session.reason().is_some() {
            return Err(FlowError::NotAtInitialScreen);
        }
        if self.catalog.flow(code).is_none() {
            return Err(FlowError::UnknownReason(code.to_string()));
        }
        debug!(reason = code, "contact reason chosen");
        self.session.begin(code);
        Ok(self.render())
    }

    pub fn render(&self) -> RenderPayload {
        render::build_render_payload(&self.catalog, &self.session)
    }

    /// Render step `index` of the bound flow.
    pub fn render_step(&self, index: usize) -> Result<RenderPayload, FlowError> {
        let reason = self.session.reason().ok_or(FlowError::NoActiveStep)?;
        render::step_payload(&self.catalog, &self.session, reason, index)
            .ok_or(FlowError::NoActiveStep)
    }

    /// Validate `value` against the current step and store it on success.
    pub fn validate_and_save(&mut self, value: Option<&str>) -> Result<(), FlowError> {
        let step = self.current_step().ok_or(FlowError::NoActiveStep)?;
        let name = step.name.clone();
        let stored = validate_step(step, value).inspect_err(|error| {
            debug!(step = %name, code = %error.code, "answer rejected");
        })?;
        self.session.save(&name, stored);
        Ok(())
    }

    pub fn advance(&mut self, value: Option<&str>) -> Result<Advance, FlowError> {
        self.validate_and_save(value)?;
        let index = self.session.current_index().ok_or(FlowError::NoActiveStep)?;
        let last = self
            .current_flow()
            .map(Flow::last_index)
            .ok_or(FlowError::NoActiveStep)?;

        if index >= last {
            return self.submit().map(Advance::Submitted);
        }

        self.session.move_to(index + 1);
        debug!(step = index + 1, "moved to next step");
        Ok(Advance::Moved(index + 1))
    }

    pub fn retreat(&mut self) -> Result<Retreat, FlowError> {
        let index = self.session.current_index().ok_or(FlowError::NoActiveStep)?;
        if index == 0 {
            self.start();
            return Ok(Retreat::Restarted);
        }
        self.session.move_to(index - 1);
        debug!(step = index - 1, "moved to previous step");
        Ok(Retreat::Moved(index - 1))
    }

    /// Answer-set the engine would submit right now.
    pub fn payload(&self) -> Option<SubmissionPayload> {
        let reason = self.session.reason()?;
        let flow = self.catalog.flow(reason)?;
        Some(SubmissionPayload::build(
            reason,
            flow,
            self.session.answers(),
        ))
    }

    /// Send the answers to the relay. On success the session is reset; on
    /// failure it is kept so the user can retry.
    pub fn submit(&mut self) -> Result<Acknowledgement, FlowError> {
        let endpoint = self
            .current_flow()
            .map(|flow| flow.endpoint.clone())
            .ok_or(FlowError::NoActiveStep)?;
        let payload = self.payload().ok_or(FlowError::NoActiveStep)?;

        let ack = self
            .submitter
            .submit(&endpoint, &payload)
            .inspect_err(|error| warn!(%endpoint, %error, "submission failed"))?;
        if !ack.success {
            warn!(%endpoint, message = %ack.message, "relay refused submission");
            return Err(TransportError::Rejected(ack.message).into());
        }

        debug!(%endpoint, "submission acknowledged");
        self.start();
        Ok(ack)
    }

    /// Enter activates the primary button; the initial screen has none.
    pub fn press_enter(&mut self, value: Option<&str>) -> Result<Option<Advance>, FlowError> {
        if self.session.current_index().is_none() {
            return Ok(None);
        }
        self.advance(value).map(Some)
    }
}
