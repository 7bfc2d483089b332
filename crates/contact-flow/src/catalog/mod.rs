mod builtin;
pub mod step;

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use step::{Step, StepKind};

/// Answer key under which the chosen reason-code is recorded.
pub const CONTACT_REASON_KEY: &str = "contactReason";

/// Reason-code assumed when a submission does not name one.
pub const DEFAULT_REASON: &str = "general";

/// One button of the "why are you contacting us" screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReasonOption {
    pub label: String,
    /// Reason-code selecting the flow.
    pub value: String,
}

/// The screen shown before any flow is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InitialStep {
    pub question: String,
    #[serde(default = "default_initial_name")]
    pub name: String,
    pub options: Vec<ReasonOption>,
}

fn default_initial_name() -> String {
    CONTACT_REASON_KEY.to_string()
}

/// Ordered questions asked for one reason-code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Flow {
    /// Relay path the answers are posted to, relative to the relay base URL.
    pub endpoint: String,
    pub steps: Vec<Step>,
}

impl Flow {
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Every flow the contact wizard knows, keyed by reason-code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlowCatalog {
    pub initial: InitialStep,
    pub flows: BTreeMap<String, Flow>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("flow '{0}' has no steps")]
    EmptyFlow(String),
    #[error("flow '{0}' has an empty endpoint")]
    EmptyEndpoint(String),
    #[error("flow '{flow}' repeats step name '{name}'")]
    DuplicateStep { flow: String, name: String },
    #[error("flow '{flow}' uses the reserved step name '{name}'")]
    ReservedStep { flow: String, name: String },
    #[error("step '{name}' in flow '{flow}' is a {kind} step without options")]
    MissingOptions {
        flow: String,
        name: String,
        kind: &'static str,
    },
    #[error("initial option '{0}' has no matching flow")]
    UnknownReason(String),
    #[error("flow '{0}' is not offered on the initial screen")]
    Unreachable(String),
    #[error("initial screen offers no reasons")]
    NoReasons,
}

impl FlowCatalog {
    /// Parse a catalog from JSON and check its structure.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: FlowCatalog = serde_json::from_str(raw)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Reject catalogs the engine cannot walk.
    pub fn check(&self) -> Result<(), CatalogError> {
        if self.initial.options.is_empty() {
            return Err(CatalogError::NoReasons);
        }

        for option in &self.initial.options {
            if !self.flows.contains_key(&option.value) {
                return Err(CatalogError::UnknownReason(option.value.clone()));
            }
        }

        for (code, flow) in &self.flows {
            if !self
                .initial
                .options
                .iter()
                .any(|option| &option.value == code)
            {
                return Err(CatalogError::Unreachable(code.clone()));
            }
            if flow.endpoint.trim().is_empty() {
                return Err(CatalogError::EmptyEndpoint(code.clone()));
            }
            if flow.steps.is_empty() {
                return Err(CatalogError::EmptyFlow(code.clone()));
            }

            let mut seen = BTreeSet::new();
            for step in &flow.steps {
                if step.name == self.initial.name {
                    return Err(CatalogError::ReservedStep {
                        flow: code.clone(),
                        name: step.name.clone(),
                    });
                }
                if !seen.insert(step.name.as_str()) {
                    return Err(CatalogError::DuplicateStep {
                        flow: code.clone(),
                        name: step.name.clone(),
                    });
                }
                if step.kind.is_choice() && step.options.is_empty() {
                    return Err(CatalogError::MissingOptions {
                        flow: code.clone(),
                        name: step.name.clone(),
                        kind: step.kind.as_str(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn flow(&self, code: &str) -> Option<&Flow> {
        self.flows.get(code)
    }

    /// Label of the initial-screen button for `code`.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.initial
            .options
            .iter()
            .find(|option| option.value == code)
            .map(|option| option.label.as_str())
    }

    /// Reason-codes in the order the initial screen lists them.
    pub fn reasons(&self) -> impl Iterator<Item = &str> {
        self.initial.options.iter().map(|option| option.value.as_str())
    }
}

/// JSON Schema describing the catalog format.
pub fn catalog_schema() -> Value {
    schemars::schema_for!(FlowCatalog).to_value()
}
