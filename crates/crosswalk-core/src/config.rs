//! Engine configuration

use serde::{Deserialize, Serialize};

/// Migration engine configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout applied to each external capability call, in seconds
    pub capability_timeout_secs: u64,
    /// Default reconciliation tolerance percentage
    pub default_tolerance_pct: f64,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a capability timeout
    #[inline]
    #[must_use]
    pub fn with_capability_timeout_secs(mut self, secs: u64) -> Self {
        self.capability_timeout_secs = secs;
        self
    }

    /// With a default reconciliation tolerance
    #[inline]
    #[must_use]
    pub fn with_default_tolerance(mut self, tolerance_pct: f64) -> Self {
        self.default_tolerance_pct = tolerance_pct.max(0.0);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capability_timeout_secs: 60,
            default_tolerance_pct: 0.0,
        }
    }
}
