//! Deterministic substitution-based capability implementations
//!
//! A stand-in backend that rewrites well-known source-language keywords into
//! target-language sketches. Useful as the default wiring in tests and
//! demos; a real translation engine implements the same ports.

use crate::error::CapabilityError;
use crate::ports::{
    ConversionCapability, ConversionOutput, DocumentationCapability, RuleExtractionCapability,
};
use crosswalk_types::ConversionStrategy;

/// Keyword substitutions applied per source-technology family
const COBOL_SUBSTITUTIONS: [(&str, &str); 6] = [
    ("PERFORM", "call"),
    ("MOVE", "let"),
    ("DISPLAY", "println!"),
    ("EVALUATE", "match"),
    ("IF", "if"),
    ("END-IF", "}"),
];

const GENERIC_SUBSTITUTIONS: [(&str, &str); 3] = [
    ("BEGIN", "{"),
    ("END", "}"),
    ("PROCEDURE", "fn"),
];

/// Substitution-based converter
///
/// Deterministic: identical input tuples always produce identical output and
/// confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionConverter;

impl SubstitutionConverter {
    /// Create a new converter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn table(source_tech: &str) -> &'static [(&'static str, &'static str)] {
        if source_tech.to_ascii_lowercase().contains("cobol") {
            &COBOL_SUBSTITUTIONS
        } else {
            &GENERIC_SUBSTITUTIONS
        }
    }
}

#[async_trait::async_trait]
impl ConversionCapability for SubstitutionConverter {
    async fn convert(
        &self,
        source_code: &str,
        source_tech: &str,
        target_tech: &str,
        strategy: ConversionStrategy,
    ) -> Result<ConversionOutput, CapabilityError> {
        if source_code.trim().is_empty() {
            return Err(CapabilityError::InvalidInput(
                "source code is empty".to_string(),
            ));
        }

        let mut converted = source_code.to_string();
        let mut hits = 0usize;
        for (from, to) in Self::table(source_tech) {
            let before = converted.matches(from).count();
            if before > 0 {
                converted = converted.replace(from, to);
                hits += before;
            }
        }

        if matches!(strategy, ConversionStrategy::Rationalize) {
            // Rationalize drops blank lines and legacy comment lines.
            converted = converted
                .lines()
                .filter(|l| {
                    let t = l.trim();
                    !t.is_empty() && !t.starts_with('*')
                })
                .collect::<Vec<_>>()
                .join("\n");
        }

        let converted = format!(
            "// target: {target_tech} ({strategy})\n{converted}"
        );

        // Confidence scales with how much of the input the table understood.
        let tokens = source_code.split_whitespace().count().max(1);
        let ratio = (hits * 100 / tokens).min(40) as u8;
        let confidence = 55 + ratio;

        tracing::debug!(
            source_tech,
            target_tech,
            hits,
            confidence,
            "substitution conversion complete"
        );

        Ok(ConversionOutput::new(converted, confidence))
    }

    fn name(&self) -> &'static str {
        "substitution"
    }
}

#[async_trait::async_trait]
impl DocumentationCapability for SubstitutionConverter {
    async fn document(
        &self,
        object_name: &str,
        source_code: &str,
        source_tech: &str,
        target_tech: &str,
    ) -> Result<String, CapabilityError> {
        if source_code.trim().is_empty() {
            return Err(CapabilityError::InvalidInput(
                "source code is empty".to_string(),
            ));
        }
        let lines = source_code.lines().count();
        Ok(format!(
            "# {object_name}\n\nMigrated from {source_tech} to {target_tech}. \
             Original unit spans {lines} lines."
        ))
    }
}

#[async_trait::async_trait]
impl RuleExtractionCapability for SubstitutionConverter {
    async fn extract_rules(&self, source_code: &str) -> Result<String, CapabilityError> {
        let rules: Vec<String> = source_code
            .lines()
            .map(str::trim)
            .filter(|l| {
                let u = l.to_ascii_uppercase();
                u.starts_with("IF ") || u.starts_with("WHEN ") || u.starts_with("EVALUATE ")
            })
            .map(|l| format!("- {l}"))
            .collect();

        if rules.is_empty() {
            Ok("No conditional business rules detected.".to_string())
        } else {
            Ok(rules.join("\n"))
        }
    }
}
