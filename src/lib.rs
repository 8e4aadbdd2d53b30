//! buildopts - typed, overridable build options for multi-project builds
//!
//! This crate provides the library functionality for buildopts: declaring
//! options with defaults, resolving their values from properties, the
//! environment and options files, and reporting where each value came from.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

pub use core::{
    BuildOption, BuildOptions, Manifest, OptionDefault, OptionError, OptionType, OptionValue,
    Project, Provider, ValueSource,
};

pub use ops::{configure, ConfigureOptions, ConfiguredBuild, OptionReport};
pub use sources::SourceChain;
pub use util::context::GlobalContext;
