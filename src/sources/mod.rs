//! Upstream option value sources.
//!
//! Sources supply an option's current value before its declared default is
//! consulted. They are combined in a [`SourceChain`] with a fixed precedence:
//! project properties, system properties, environment variables, the local
//! options file, then the shared options file.

pub mod env;
pub mod options_file;
pub mod properties;
pub mod source;

pub use env::EnvironmentVariables;
pub use options_file::{OptionsFile, BUILD_OPTIONS_FILE, LOCAL_BUILD_OPTIONS_FILE};
pub use properties::Properties;
pub use source::{OptionSource, SourceChain};
