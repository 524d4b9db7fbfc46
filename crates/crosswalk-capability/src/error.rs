//! Capability error taxonomy
//!
//! Every capability failure is scoped to one call; the engine records it
//! against the object being processed and continues the batch.

/// Failure of an external capability call
#[derive(Debug, Clone, thiserror::Error)]
pub enum CapabilityError {
    /// Input rejected before any work was attempted
    #[error("invalid capability input: {0}")]
    InvalidInput(String),

    /// Backend is unreachable or not configured
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// Backend accepted the call but failed to produce output
    #[error("capability failed: {0}")]
    Failed(String),
}

impl CapabilityError {
    /// Whether a retry of the same call could plausibly succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_is_not_retryable() {
        assert!(!CapabilityError::InvalidInput("empty".into()).is_retryable());
        assert!(CapabilityError::Unavailable("down".into()).is_retryable());
        assert!(CapabilityError::Failed("oom".into()).is_retryable());
    }
}
