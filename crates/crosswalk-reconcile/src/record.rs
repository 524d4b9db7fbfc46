//! Output records fed into a reconciliation run
//!
//! A record is one row of system output: an identifier plus named attribute
//! values. Attribute order is preserved so comparison reports read in the
//! same order the source system emitted them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One output record from either system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Record identifier used for pairing across systems
    pub id: String,
    /// Named attribute values, in emission order
    pub attributes: IndexMap<String, String>,
}

impl DataRecord {
    /// Create an empty record
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: IndexMap::new(),
        }
    }

    /// With one attribute value
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Number of attributes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the record has no attributes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
