//! Crosswalk reconciliation engine
//!
//! Compares original-system output records against converted-system output
//! records attribute-by-attribute:
//! - [`reconcile`]: the comparison run, producing a [`ReconciliationReport`]
//! - [`ReconcileConfig`]: tolerance and optional numeric epsilon
//! - [`Classification`]: operator judgment at attribute and record level
//!
//! The tolerance check is advisory. Exceeding it is surfaced prominently,
//! but operator classification is always permitted, in both directions.

#![warn(unreachable_pub)]

mod engine;
mod record;
mod report;

pub use engine::{reconcile, ReconcileConfig};
pub use record::DataRecord;
pub use report::{
    AttributeComparison, Classification, MatchStatus, ReconcileError, ReconciliationReport,
    RecordValidation,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
