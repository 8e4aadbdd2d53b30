//! Core data structures for buildopts.
//!
//! This module contains the option value model:
//! - Option types and value sources
//! - Resolved values and lazy providers
//! - Build options and the per-project registry

pub mod build_option;
pub mod error;
pub mod manifest;
pub mod option_type;
pub mod option_value;
pub mod project;
pub mod provider;
pub mod registry;
pub mod value_source;

pub use build_option::{BuildOption, ValueResolver};
pub use error::OptionError;
pub use manifest::{Manifest, ManifestError, MANIFEST_NAME};
pub use option_type::OptionType;
pub use option_value::OptionValue;
pub use project::{Project, ROOT_PROJECT_PATH};
pub use provider::Provider;
pub use registry::{BuildOptions, OptionDefault};
pub use value_source::ValueSource;
