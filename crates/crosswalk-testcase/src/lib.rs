//! Crosswalk test-case corpus
//!
//! Four entry paths into one underlying store:
//! - manual single create/edit/delete ([`add_case`], [`update_case`],
//!   [`remove_case`], [`set_outcome`])
//! - CSV bulk import with per-row skip-and-report ([`import_cases`])
//! - auto-generation of the fixed four categories per object
//!   ([`generate_for_project`])
//! - template and corpus export ([`export_template`], [`export_cases`])
//!
//! Outcome updates never feed back into reconciliation state; the two
//! subsystems are deliberately decoupled.

#![warn(unreachable_pub)]

mod autogen;
mod error;
mod import;
mod manager;

pub use autogen::{generate_for_project, GenerationReport};
pub use error::CorpusError;
pub use import::{
    export_cases, export_template, import_cases, ImportReport, SkippedRow, HEADERS,
};
pub use manager::{add_case, remove_case, set_outcome, update_case, CaseDraft, CasePatch};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
