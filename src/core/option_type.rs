//! Option value kinds.

use serde::{Deserialize, Serialize};

/// The declared kind of a build option.
///
/// The kind decides which typed accessors may be used on an option and
/// how its raw string is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Free-form string (default)
    #[default]
    String,
    /// `true` or `false`
    #[serde(alias = "bool")]
    Boolean,
    /// Base-10 integer
    #[serde(alias = "int")]
    Integer,
    /// Directory, relative to the project root
    #[serde(alias = "dir")]
    Directory,
    /// Regular file, relative to the project root
    File,
}

impl OptionType {
    /// Get the lower-case type name, as shown in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::String => "string",
            OptionType::Boolean => "boolean",
            OptionType::Integer => "integer",
            OptionType::Directory => "directory",
            OptionType::File => "file",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OptionType::String => "STRING",
            OptionType::Boolean => "BOOLEAN",
            OptionType::Integer => "INTEGER",
            OptionType::Directory => "DIRECTORY",
            OptionType::File => "FILE",
        })
    }
}

impl std::str::FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(OptionType::String),
            "boolean" | "bool" => Ok(OptionType::Boolean),
            "integer" | "int" => Ok(OptionType::Integer),
            "directory" | "dir" => Ok(OptionType::Directory),
            "file" => Ok(OptionType::File),
            _ => Err(format!(
                "invalid option type '{}'; expected one of: string, boolean, integer, directory, file",
                s
            )),
        }
    }
}
