//! Crosswalk capability ports
//!
//! Trait seams for the external capabilities the engine consumes:
//! - [`ConversionCapability`]: source-to-target code conversion
//! - [`DocumentationCapability`]: documentation generation
//! - [`RuleExtractionCapability`]: business-rule extraction
//!
//! Plus [`SubstitutionConverter`], a deterministic stand-in implementation
//! of all three ports.

#![warn(unreachable_pub)]

mod error;
mod ports;
mod substitution;

pub use error::CapabilityError;
pub use ports::{
    ConversionCapability, ConversionOutput, DocumentationCapability, RuleExtractionCapability,
};
pub use substitution::SubstitutionConverter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
