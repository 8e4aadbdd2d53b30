//! Resolved option values.

use crate::core::ValueSource;

/// A raw option value together with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionValue {
    value: String,
    source: ValueSource,
}

impl OptionValue {
    /// Create a new value.
    pub fn new(value: impl Into<String>, source: ValueSource) -> Self {
        OptionValue {
            value: value.into(),
            source,
        }
    }

    /// The raw string representation.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The source that supplied this value.
    pub fn source(&self) -> ValueSource {
        self.source
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
