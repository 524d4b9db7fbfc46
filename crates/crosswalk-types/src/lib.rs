//! Crosswalk entity types
//!
//! Strongly-typed entities for the migration lifecycle engine:
//! - [`Project`]: a migration engagement owning objects and test cases
//! - [`ProjectObject`]: one migratable unit with conversion artifacts and
//!   reconciliation state
//! - [`TestCase`]: a certification check scoped to a project or an object
//! - Closed state enums ([`ValidationStatus`], [`Outcome`], [`Category`])
//!   with their transition/parse rules
//!
//! This crate is deliberately free of I/O and async; everything here is
//! plain data plus invariants.

#![warn(unreachable_pub)]

// Core modules
mod ids;
mod object;
mod project;
mod status;
mod testcase;

// Re-exports
pub use ids::{CaseId, ObjectId, ProjectId};
pub use object::{ProjectObject, REVIEW_THRESHOLD};
pub use project::{classify_technology, ComplexityTier, Project};
pub use status::{
    allowed_transitions, validate_transition, Category, ConversionStrategy, Outcome,
    ParseEnumError, TransitionError, ValidationStatus, GENERATED_CATEGORIES,
};
pub use testcase::{TestCase, DEFAULT_STEPS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
