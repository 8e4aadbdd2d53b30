//! Projects that own build options.

use std::path::{Path, PathBuf};

use crate::util::fs;

/// Path of the root project.
pub const ROOT_PROJECT_PATH: &str = ":";

/// A project in the build, identified by its path (`:` for the root,
/// `:libs:core` for a member) and located at a root directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Project {
    path: String,
    dir: PathBuf,
}

impl Project {
    /// Create the root project located at `dir`.
    pub fn root(dir: impl Into<PathBuf>) -> Self {
        Project {
            path: ROOT_PROJECT_PATH.to_string(),
            dir: dir.into(),
        }
    }

    /// Create a member project located at `root_dir.join(relative_dir)`.
    pub fn member(root_dir: &Path, relative_dir: &Path) -> Self {
        Project {
            path: fs::project_path(relative_dir),
            dir: root_dir.join(relative_dir),
        }
    }

    /// The project path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The project root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether this is the root project.
    pub fn is_root(&self) -> bool {
        self.path == ROOT_PROJECT_PATH
    }

    /// Name used in report headers.
    pub fn display_name(&self) -> String {
        if self.is_root() {
            ": (the root project)".to_string()
        } else {
            self.path.clone()
        }
    }

    /// Resolve a project-relative path. Purely lexical.
    pub fn resolve(&self, value: &str) -> PathBuf {
        self.dir.join(value)
    }

    /// Express `path` relative to the project root directory.
    pub fn relative_path(&self, path: &Path) -> String {
        fs::to_slash(&fs::relative_path(&self.dir, path))
    }
}
