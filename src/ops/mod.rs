//! High-level operations.
//!
//! This module contains the implementation of buildopts commands.

pub mod configure;
pub mod option_report;

pub use configure::{configure, ConfigureOptions, ConfiguredBuild};
pub use option_report::{
    collect_options, OptionGroup, OptionGroupingSpec, OptionReport, DEFAULT_OTHER_OPTIONS,
};
