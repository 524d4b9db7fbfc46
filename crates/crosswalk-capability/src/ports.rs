//! Capability port traits
//!
//! The conversion, documentation, and business-rule-extraction capabilities
//! are external, potentially slow, fallible services. The engine only ever
//! talks to them through these traits, so a real translation backend can be
//! swapped in without touching orchestration logic.

use crate::error::CapabilityError;
use crosswalk_types::ConversionStrategy;

/// Output of one conversion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// Converted source text
    pub converted_code: String,
    /// Self-assessed correctness in 0..=100
    pub confidence: u8,
}

impl ConversionOutput {
    /// Create a conversion output, clamping confidence to 100
    #[inline]
    #[must_use]
    pub fn new(converted_code: impl Into<String>, confidence: u8) -> Self {
        Self {
            converted_code: converted_code.into(),
            confidence: confidence.min(100),
        }
    }
}

/// Code-conversion capability
///
/// # Contract
/// Implementations must be deterministic for a fixed input tuple, return
/// confidence in 0..=100, and report failure through `CapabilityError`
/// rather than producing partial output.
#[async_trait::async_trait]
pub trait ConversionCapability: Send + Sync + std::fmt::Debug {
    /// Convert one object's source text to the target technology
    async fn convert(
        &self,
        source_code: &str,
        source_tech: &str,
        target_tech: &str,
        strategy: ConversionStrategy,
    ) -> Result<ConversionOutput, CapabilityError>;

    /// Capability name (for logging/diagnostics)
    fn name(&self) -> &'static str;
}

/// Documentation-generation capability
#[async_trait::async_trait]
pub trait DocumentationCapability: Send + Sync + std::fmt::Debug {
    /// Produce documentation text for one object
    async fn document(
        &self,
        object_name: &str,
        source_code: &str,
        source_tech: &str,
        target_tech: &str,
    ) -> Result<String, CapabilityError>;
}

/// Business-rule-extraction capability
#[async_trait::async_trait]
pub trait RuleExtractionCapability: Send + Sync + std::fmt::Debug {
    /// Extract business-rule text from one object's source
    async fn extract_rules(&self, source_code: &str) -> Result<String, CapabilityError>;
}
