//! Build options files.
//!
//! Two files are read from the root project directory:
//! - `build-options.toml`: shared, usually checked in
//! - `build-options.local.toml`: machine-specific, usually git-ignored
//!
//! Both are plain TOML tables. Nested tables flatten into dotted names, so
//! `[tests] jvms = 4` sets the option `tests.jvms` to `"4"`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::ValueSource;
use crate::sources::OptionSource;
use crate::util::fs;

/// Default name of the shared options file.
pub const BUILD_OPTIONS_FILE: &str = "build-options.toml";

/// Default name of the local options file.
pub const LOCAL_BUILD_OPTIONS_FILE: &str = "build-options.local.toml";

/// Option values read from a TOML file.
#[derive(Debug, Clone)]
pub struct OptionsFile {
    kind: ValueSource,
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl OptionsFile {
    /// Load the shared options file. A missing file yields no values.
    pub fn shared(path: &Path) -> Result<Self> {
        OptionsFile::load(ValueSource::BuildOptionsFile, path)
    }

    /// Load the local options file. A missing file yields no values.
    pub fn local(path: &Path) -> Result<Self> {
        OptionsFile::load(ValueSource::LocalBuildOptionsFile, path)
    }

    fn load(kind: ValueSource, path: &Path) -> Result<Self> {
        let values = match fs::read_optional(path)? {
            Some(contents) => parse_options(&contents)
                .with_context(|| format!("failed to parse options file: {}", path.display()))?,
            None => {
                tracing::debug!("no options file at {}", path.display());
                BTreeMap::new()
            }
        };

        Ok(OptionsFile {
            kind,
            path: path.to_path_buf(),
            values,
        })
    }

    /// Path the file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in report labels.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Number of values in the file.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the file holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OptionSource for OptionsFile {
    fn kind(&self) -> ValueSource {
        self.kind
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Parse options file contents into flattened name/value pairs.
pub fn parse_options(contents: &str) -> Result<BTreeMap<String, String>> {
    let table: toml::Table = contents.parse()?;
    let mut values = BTreeMap::new();
    flatten("", &table, &mut values)?;
    Ok(values)
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) -> Result<()> {
    for (key, value) in table {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        let rendered = match value {
            toml::Value::Table(nested) => {
                flatten(&name, nested, out)?;
                continue;
            }
            toml::Value::String(s) => s.clone(),
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            toml::Value::Datetime(d) => d.to_string(),
            toml::Value::Array(_) => {
                bail!("option `{}` has an array value; options must be scalars", name)
            }
        };
        out.insert(name, rendered);
    }
    Ok(())
}
