use contact_flow::{FlowCatalog, Notice, RenderPayload, Step, StepKind, render_json_ui, render_text};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: screens and notices only.
    Clean,
    /// Verbose output: also relay acknowledgements and input hints.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// How each screen is drawn.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScreenFormat {
    Text,
    Json,
}

/// Prints screens and notices for the text wizard.
pub struct WizardPresenter {
    verbosity: Verbosity,
    format: ScreenFormat,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, format: ScreenFormat) -> Self {
        Self { verbosity, format }
    }

    pub fn show_screen(&self, payload: &RenderPayload) {
        match self.format {
            ScreenFormat::Text => println!("{}", render_text(payload)),
            ScreenFormat::Json => println!("{}", render_json_ui(payload)),
        }
        if self.verbosity.is_verbose()
            && let Some(hint) = input_hint(payload)
        {
            println!("{}", hint);
        }
    }

    pub fn show_notice(&self, notice: &Notice) {
        match notice {
            Notice::ThankYou => println!("{}", notice.message()),
            Notice::SubmitFailed | Notice::Invalid(_) => eprintln!("{}", notice.message()),
        }
    }

    pub fn show_acknowledgement(&self, message: &str) {
        if self.verbosity.is_verbose() {
            println!("Relay: {}", message);
        }
    }

    pub fn show_unknown_reason(&self) {
        eprintln!("Please choose one of the listed reasons.");
    }

    pub fn show_error_detail(&self, detail: &str) {
        if self.verbosity.is_verbose() {
            eprintln!("  Detail: {}", detail);
        }
    }
}

fn input_hint(payload: &RenderPayload) -> Option<String> {
    match payload {
        RenderPayload::Initial { .. } => {
            Some("(enter a number, label or reason code; ':exit' to quit)".to_string())
        }
        RenderPayload::Step { kind, .. } => {
            let hint = match kind {
                StepKind::Radio | StepKind::Select => "(option number or text)",
                StepKind::Date => "(YYYY-MM-DD)",
                StepKind::Time => "(HH:MM)",
                StepKind::Number => "(number)",
                _ => "(text)",
            };
            Some(format!(
                "{} Enter keeps the current value, ':back' returns to the previous step, ':exit' quits",
                hint
            ))
        }
    }
}

/// Shell commands. They carry a `:` prefix so that "back" or "exit" stay
/// valid answers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WizardCommand {
    Back,
    Exit,
}

pub fn parse_command(raw: &str) -> Option<WizardCommand> {
    let command = raw.trim().strip_prefix(':')?;
    if command.eq_ignore_ascii_case("back") {
        Some(WizardCommand::Back)
    } else if command.eq_ignore_ascii_case("exit") {
        Some(WizardCommand::Exit)
    } else {
        None
    }
}

/// Map initial-screen input to a reason-code: a 1-based position, the code
/// itself or the button label.
pub fn resolve_reason(catalog: &FlowCatalog, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let options = &catalog.initial.options;
    if let Ok(position) = raw.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| options.get(index))
            .map(|option| option.value.clone());
    }
    options
        .iter()
        .find(|option| {
            option.value.eq_ignore_ascii_case(raw) || option.label.eq_ignore_ascii_case(raw)
        })
        .map(|option| option.value.clone())
}

/// Turn a typed line into the control value of `step`.
///
/// An empty line keeps `prefilled`, the way Enter submits whatever the
/// control already shows. Choice steps also accept the option's position.
pub fn control_input(step: &Step, raw: &str, prefilled: Option<String>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return prefilled;
    }
    if !step.kind.is_choice() {
        return Some(raw.to_string());
    }
    let by_position = trimmed
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| step.options.get(index));
    Some(by_position.map_or_else(|| trimmed.to_string(), Clone::clone))
}
