//! Project and system properties.

use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::core::ValueSource;
use crate::sources::OptionSource;

/// A set of `name=value` properties of one kind.
#[derive(Debug, Clone)]
pub struct Properties {
    kind: ValueSource,
    values: HashMap<String, String>,
}

impl Properties {
    /// Project properties (`-P name=value`).
    pub fn project<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Properties::of_kind(ValueSource::ProjectProperty, values)
    }

    /// System properties (`-D name=value`).
    pub fn system<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Properties::of_kind(ValueSource::SystemProperty, values)
    }

    fn of_kind<I, K, V>(kind: ValueSource, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Properties {
            kind,
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OptionSource for Properties {
    fn kind(&self) -> ValueSource {
        self.kind
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Parse a `name=value` pair as given on the command line.
///
/// The value may be empty and may itself contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String)> {
    let Some((name, value)) = s.split_once('=') else {
        bail!("invalid property `{}`; expected `name=value`", s);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("invalid property `{}`; the name is empty", s);
    }
    Ok((name.to_string(), value.to_string()))
}
