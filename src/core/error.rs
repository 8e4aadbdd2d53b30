//! Build option error types and diagnostics.

use thiserror::Error;

use crate::core::OptionType;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while declaring, looking up or reading a build option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Build option '{name}' is already declared")]
    DuplicateName { name: String },

    #[error("Build option '{name}' not found")]
    UnknownOption { name: String, known: Vec<String> },

    #[error("Build option '{name}' is of type {actual}, it cannot be converted to {requested}.")]
    TypeMismatch {
        name: String,
        actual: OptionType,
        requested: OptionType,
    },

    #[error("Build option '{name}' is of type {option_type} and expects {expected} but was: {value}")]
    CoercionFailure {
        name: String,
        option_type: OptionType,
        expected: &'static str,
        value: String,
    },

    #[error("This build option has no value set: {name}")]
    MissingValue { name: String },
}

impl OptionError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            OptionError::DuplicateName { name } => diag.with_suggestion(format!(
                "Rename one of the declarations of `{}`",
                name
            )),

            OptionError::UnknownOption { known, .. } => {
                let diag = if known.is_empty() {
                    diag.with_context("no build options are declared")
                } else {
                    diag.with_context(format!("declared options: {}", known.join(", ")))
                };
                diag.with_suggestion(suggestions::UNKNOWN_OPTION)
            }

            OptionError::TypeMismatch { actual, .. } => diag.with_suggestion(format!(
                "Read the option with the accessor for {} values",
                actual.as_str()
            )),

            OptionError::CoercionFailure { name, .. } => diag
                .with_suggestion(format!(
                    "Check the overrides for `{}` (properties, environment, options files)",
                    name
                ))
                .with_suggestion("Run `buildopts report` to see where the value comes from".to_string()),

            OptionError::MissingValue { name } => diag.with_suggestion(format!(
                "Set `{}` with `-P {}=<value>` or in an options file",
                name, name
            )),
        }
    }
}
