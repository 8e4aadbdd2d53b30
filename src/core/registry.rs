//! The build options registry.
//!
//! Each project owns one [`BuildOptions`] registry. Options are declared once,
//! during configuration, and looked up by name afterwards. Declaration order
//! is preserved.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::{
    BuildOption, OptionError, OptionType, OptionValue, Project, Provider, ValueResolver,
    ValueSource,
};
use crate::sources::SourceChain;

type ComputeFn<T> = Box<dyn Fn() -> Option<T> + Send + Sync>;

/// The default of a declared option.
pub enum OptionDefault<T> {
    /// No default; the option is empty unless a source supplies a value.
    None,
    /// A fixed default, reported as an explicit value.
    Fixed(T),
    /// A default computed on first use, reported as a computed value.
    Computed(ComputeFn<T>),
}

impl<T> OptionDefault<T> {
    /// A default computed lazily. The expression may yield nothing.
    pub fn computed<F>(compute: F) -> Self
    where
        F: Fn() -> Option<T> + Send + Sync + 'static,
    {
        OptionDefault::Computed(Box::new(compute))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for OptionDefault<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionDefault::None => f.write_str("None"),
            OptionDefault::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            OptionDefault::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T> From<Option<T>> for OptionDefault<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => OptionDefault::Fixed(value),
            None => OptionDefault::None,
        }
    }
}

impl From<&str> for OptionDefault<String> {
    fn from(value: &str) -> Self {
        OptionDefault::Fixed(value.to_string())
    }
}

impl From<String> for OptionDefault<String> {
    fn from(value: String) -> Self {
        OptionDefault::Fixed(value)
    }
}

impl From<bool> for OptionDefault<bool> {
    fn from(value: bool) -> Self {
        OptionDefault::Fixed(value)
    }
}

impl From<i32> for OptionDefault<i32> {
    fn from(value: i32) -> Self {
        OptionDefault::Fixed(value)
    }
}

impl From<PathBuf> for OptionDefault<PathBuf> {
    fn from(value: PathBuf) -> Self {
        OptionDefault::Fixed(value)
    }
}

impl From<&Path> for OptionDefault<PathBuf> {
    fn from(value: &Path) -> Self {
        OptionDefault::Fixed(value.to_path_buf())
    }
}

/// Registry of the build options declared by one project.
#[derive(Debug)]
pub struct BuildOptions {
    project: Arc<Project>,
    sources: Arc<SourceChain>,
    options: IndexMap<String, Arc<BuildOption>>,
}

impl BuildOptions {
    /// Create an empty registry for `project`, resolving values through `sources`.
    pub fn new(project: Project, sources: Arc<SourceChain>) -> Self {
        BuildOptions {
            project: Arc::new(project),
            sources,
            options: IndexMap::new(),
        }
    }

    /// The owning project.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Declare a string option.
    pub fn add_option(
        &mut self,
        name: &str,
        description: &str,
        default: impl Into<OptionDefault<String>>,
    ) -> Result<Provider<String>, OptionError> {
        let default = render_default(default.into(), |v| v);
        let option = self.declare(name, description, OptionType::String, default)?;
        Ok(option.as_string_provider())
    }

    /// Declare a boolean option.
    pub fn add_boolean_option(
        &mut self,
        name: &str,
        description: &str,
        default: impl Into<OptionDefault<bool>>,
    ) -> Result<Provider<bool>, OptionError> {
        let default = render_default(default.into(), |v: bool| v.to_string());
        let option = self.declare(name, description, OptionType::Boolean, default)?;
        option.as_boolean_provider()
    }

    /// Declare an integer option.
    pub fn add_int_option(
        &mut self,
        name: &str,
        description: &str,
        default: impl Into<OptionDefault<i32>>,
    ) -> Result<Provider<i32>, OptionError> {
        let default = render_default(default.into(), |v: i32| v.to_string());
        let option = self.declare(name, description, OptionType::Integer, default)?;
        option.as_int_provider()
    }

    /// Declare a directory option. Defaults are stored relative to the project root.
    pub fn add_dir_option(
        &mut self,
        name: &str,
        description: &str,
        default: impl Into<OptionDefault<PathBuf>>,
    ) -> Result<Provider<PathBuf>, OptionError> {
        let project = Arc::clone(&self.project);
        let default = render_default(default.into(), move |p: PathBuf| project.relative_path(&p));
        let option = self.declare(name, description, OptionType::Directory, default)?;
        option.as_dir_provider()
    }

    /// Declare a file option. Defaults are stored relative to the project root.
    pub fn add_file_option(
        &mut self,
        name: &str,
        description: &str,
        default: impl Into<OptionDefault<PathBuf>>,
    ) -> Result<Provider<PathBuf>, OptionError> {
        let project = Arc::clone(&self.project);
        let default = render_default(default.into(), move |p: PathBuf| project.relative_path(&p));
        let option = self.declare(name, description, OptionType::File, default)?;
        option.as_file_provider()
    }

    /// Lazy string view of a declared option.
    pub fn option_value(&self, name: &str) -> Result<Provider<String>, OptionError> {
        Ok(self.get_option(name)?.as_string_provider())
    }

    /// Look up a declared option.
    pub fn get_option(&self, name: &str) -> Result<Arc<BuildOption>, OptionError> {
        self.options
            .get(name)
            .cloned()
            .ok_or_else(|| OptionError::UnknownOption {
                name: name.to_string(),
                known: self.options.keys().cloned().collect(),
            })
    }

    /// Whether an option is declared.
    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// All options, in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &Arc<BuildOption>> {
        self.options.values()
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether no options are declared.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn declare(
        &mut self,
        name: &str,
        description: &str,
        option_type: OptionType,
        default: Option<ValueResolver>,
    ) -> Result<Arc<BuildOption>, OptionError> {
        if self.options.contains_key(name) {
            return Err(OptionError::DuplicateName {
                name: name.to_string(),
            });
        }

        let sources = Arc::clone(&self.sources);
        let lookup_name = name.to_string();
        let mut option = BuildOption::new(name, option_type, description, Arc::clone(&self.project))
            .with_upstream(move || sources.resolve(&lookup_name));
        if let Some(default) = default {
            option = option.with_default(default);
        }

        tracing::debug!(
            "declared {} option `{}` in project `{}`",
            option_type.as_str(),
            name,
            self.project.path()
        );

        let option = Arc::new(option);
        self.options.insert(name.to_string(), Arc::clone(&option));
        Ok(option)
    }
}

/// Turn a typed default into a value expression over its string form.
fn render_default<T, R>(default: OptionDefault<T>, render: R) -> Option<ValueResolver>
where
    T: 'static,
    R: Fn(T) -> String + Send + Sync + 'static,
{
    match default {
        OptionDefault::None => None,
        OptionDefault::Fixed(value) => {
            let value = OptionValue::new(render(value), ValueSource::ExplicitValue);
            Some(Box::new(move || Some(value.clone())))
        }
        OptionDefault::Computed(compute) => Some(Box::new(move || {
            compute().map(|v| OptionValue::new(render(v), ValueSource::ComputedValue))
        })),
    }
}
