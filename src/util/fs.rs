//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// Read a file to string, returning `None` if it does not exist.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read file: {}", path.display())),
    }
}

/// Get the relative path from `base` to `path`.
///
/// Relative inputs are taken to be relative to `base` already. The result
/// is purely lexical; neither path has to exist.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        return pathdiff::diff_paths(base.join(path), base).unwrap_or_else(|| path.to_path_buf());
    }
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Render a path with `/` separators, as stored in option values.
pub fn to_slash(path: &Path) -> String {
    let parts: Vec<_> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let joined = parts.join("/");
    if path.has_root() && joined.starts_with("//") {
        joined[1..].to_string()
    } else {
        joined
    }
}

/// Build a project path (`:a:b`) from a member directory relative to the root.
pub fn project_path(relative_dir: &Path) -> String {
    let segments: Vec<_> = relative_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!(":{}", segments.join(":"))
}
