//! Environment variables.

use std::collections::HashMap;
use std::ffi::OsString;

use crate::core::ValueSource;
use crate::sources::OptionSource;

/// A snapshot of environment variables.
///
/// An option `tests.jvms` is looked up as `tests.jvms` first and then as
/// `TESTS_JVMS`, each with the configured prefix. Without a prefix only the
/// exact name is tried, so ambient variables such as `PATH` never shadow an
/// option named `path`.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentVariables {
    prefix: String,
    vars: HashMap<String, String>,
}

impl EnvironmentVariables {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 cannot name or hold
    /// an option value and are skipped.
    pub fn capture() -> Self {
        EnvironmentVariables::from_os_vars(std::env::vars_os())
    }

    /// Use an explicit set of OS-encoded variables, skipping non-UTF-8 entries.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        EnvironmentVariables::from_vars(vars.into_iter().filter_map(|(k, v)| {
            match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (k, _) => {
                    tracing::debug!("skipping non-UTF-8 environment variable {:?}", k);
                    None
                }
            }
        }))
    }

    /// Use an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvironmentVariables {
            prefix: String::new(),
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Only consider variables carrying `prefix`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Normalize an option name into an environment variable name.
pub fn env_var_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

impl OptionSource for EnvironmentVariables {
    fn kind(&self) -> ValueSource {
        ValueSource::EnvironmentVariable
    }

    fn lookup(&self, name: &str) -> Option<String> {
        let exact = format!("{}{}", self.prefix, name);
        if let Some(value) = self.vars.get(&exact) {
            return Some(value.clone());
        }
        if self.prefix.is_empty() {
            return None;
        }

        let normalized = format!("{}{}", self.prefix, env_var_name(name));
        self.vars.get(&normalized).cloned()
    }
}
