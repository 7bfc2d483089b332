#![allow(missing_docs)]

pub mod catalog;
pub mod engine;
pub mod render;
pub mod session;
pub mod submit;
pub mod validate;

pub use catalog::{
    CONTACT_REASON_KEY, CatalogError, DEFAULT_REASON, Flow, FlowCatalog, InitialStep,
    ReasonOption, Step, StepKind, catalog_schema,
};
pub use engine::{Advance, FlowEngine, FlowError, Notice, Retreat};
pub use render::{
    NavLabel, RenderPayload, RenderProgress, build_render_payload, render_json_ui, render_text,
};
pub use session::{Session, Stage};
pub use submit::{Acknowledgement, SubmissionPayload, Submitter, TransportError};
pub use validate::{ValidationError, validate_step};
