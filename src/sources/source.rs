//! OptionSource trait - common interface for all upstream value sources.

use std::fmt;

use crate::core::{OptionValue, ValueSource};

/// A source of option values consulted before an option's default.
pub trait OptionSource: fmt::Debug + Send + Sync {
    /// The kind of source, used for precedence and reporting.
    fn kind(&self) -> ValueSource;

    /// Look up the raw value for an option name.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Upstream sources ordered by [`ValueSource::precedence`].
///
/// The order in which sources are added does not matter: the chain is kept
/// sorted by precedence, and the first source holding a value wins.
#[derive(Debug, Default)]
pub struct SourceChain {
    sources: Vec<Box<dyn OptionSource>>,
}

impl SourceChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        SourceChain {
            sources: Vec::new(),
        }
    }

    /// Add a source to the chain.
    ///
    /// Sources of default kinds (explicit or computed values) are ignored;
    /// defaults are wired per option.
    pub fn add(&mut self, source: impl OptionSource + 'static) {
        if source.kind().is_default() {
            tracing::warn!("ignoring {} source in the lookup chain", source.kind());
            return;
        }
        self.sources.push(Box::new(source));
        self.sources.sort_by_key(|s| s.kind().precedence());
    }

    /// Builder form of [`SourceChain::add`].
    pub fn with(mut self, source: impl OptionSource + 'static) -> Self {
        self.add(source);
        self
    }

    /// Resolve `name` against the chain.
    pub fn resolve(&self, name: &str) -> Option<OptionValue> {
        self.sources.iter().find_map(|source| {
            source
                .lookup(name)
                .map(|value| OptionValue::new(value, source.kind()))
        })
    }

    /// Kinds of the sources in lookup order.
    pub fn kinds(&self) -> Vec<ValueSource> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// Number of sources in the chain.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain has no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::Properties;

    #[test]
    fn test_precedence_ignores_insertion_order() {
        let chain = SourceChain::new()
            .with(Properties::system([("opt", "from-system")]))
            .with(Properties::project([("opt", "from-project")]));

        assert_eq!(
            chain.kinds(),
            vec![ValueSource::ProjectProperty, ValueSource::SystemProperty]
        );
        assert_eq!(
            chain.resolve("opt"),
            Some(OptionValue::new("from-project", ValueSource::ProjectProperty))
        );
    }

    #[test]
    fn test_falls_through_to_lower_precedence() {
        let chain = SourceChain::new()
            .with(Properties::project([("a", "1")]))
            .with(Properties::system([("b", "2")]));

        assert_eq!(
            chain.resolve("b"),
            Some(OptionValue::new("2", ValueSource::SystemProperty))
        );
        assert_eq!(chain.resolve("c"), None);
    }

    #[test]
    fn test_empty_chain() {
        let chain = SourceChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.resolve("anything"), None);
    }
}
