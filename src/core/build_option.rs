//! Named, typed build options.
//!
//! A [`BuildOption`] holds two lazily resolved values:
//!
//! - the *current* value, looked up through the option's upstream chain
//!   (properties, environment, options files) and falling back to the default;
//! - the *default* value, fixed or computed at declaration.
//!
//! Both expressions are wired when the option is created and run at most once,
//! on first observation. Typed accessors check the option's declared type
//! before they return a provider, and coerce the raw string only when the
//! provider is observed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::core::{OptionError, OptionType, OptionValue, Project, Provider, ValueSource};

/// A deferred value expression.
pub type ValueResolver = Box<dyn Fn() -> Option<OptionValue> + Send + Sync>;

/// A named, typed build option.
pub struct BuildOption {
    name: String,
    option_type: OptionType,
    description: String,
    project: Arc<Project>,
    value: OnceLock<Option<OptionValue>>,
    default_value: OnceLock<Option<OptionValue>>,
    upstream: Option<ValueResolver>,
    default_resolver: Option<ValueResolver>,
}

impl BuildOption {
    /// Create an option with no default and no upstream sources.
    pub fn new(
        name: impl Into<String>,
        option_type: OptionType,
        description: impl Into<String>,
        project: Arc<Project>,
    ) -> Self {
        BuildOption {
            name: name.into(),
            option_type,
            description: description.into(),
            project,
            value: OnceLock::new(),
            default_value: OnceLock::new(),
            upstream: None,
            default_resolver: None,
        }
    }

    /// Wire the default value expression.
    pub fn with_default<F>(mut self, resolve: F) -> Self
    where
        F: Fn() -> Option<OptionValue> + Send + Sync + 'static,
    {
        self.default_resolver = Some(Box::new(resolve));
        self
    }

    /// Wire the upstream lookup consulted before the default.
    pub fn with_upstream<F>(mut self, resolve: F) -> Self
    where
        F: Fn() -> Option<OptionValue> + Send + Sync + 'static,
    {
        self.upstream = Some(Box::new(resolve));
        self
    }

    /// The option name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// The option description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The project that declared this option.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Path of the declaring project.
    pub fn project_path(&self) -> &str {
        self.project.path()
    }

    /// The current value, resolved on first call.
    pub fn value(&self) -> Option<&OptionValue> {
        self.value
            .get_or_init(|| {
                let upstream = self.upstream.as_ref().and_then(|resolve| resolve());
                let resolved = upstream.or_else(|| self.default_value().cloned());
                match &resolved {
                    Some(v) => tracing::debug!(
                        "build option `{}` resolved to `{}` ({})",
                        self.name,
                        v,
                        v.source()
                    ),
                    None => tracing::debug!("build option `{}` has no value", self.name),
                }
                resolved
            })
            .as_ref()
    }

    /// The default value, resolved on first call.
    pub fn default_value(&self) -> Option<&OptionValue> {
        self.default_value
            .get_or_init(|| self.default_resolver.as_ref().and_then(|resolve| resolve()))
            .as_ref()
    }

    /// Whether a current value exists.
    pub fn is_present(&self) -> bool {
        self.value().is_some()
    }

    /// Whether the current value string equals the default value string.
    ///
    /// `false` if either value is absent.
    pub fn is_equal_to_default_value(&self) -> bool {
        match (self.value(), self.default_value()) {
            (Some(value), Some(default)) => value.value() == default.value(),
            _ => false,
        }
    }

    /// The source of the current value.
    pub fn source(&self) -> Result<ValueSource, OptionError> {
        self.value()
            .map(OptionValue::source)
            .ok_or_else(|| OptionError::MissingValue {
                name: self.name.clone(),
            })
    }

    /// Express a concrete path relative to the project root.
    pub fn relative_path(&self, path: &Path) -> String {
        self.project.relative_path(path)
    }

    /// Lazy view of the current value as a string.
    pub fn as_string_provider(self: &Arc<Self>) -> Provider<String> {
        let opt = Arc::clone(self);
        Provider::new(self.name.as_str(), move || {
            Ok(opt.value().map(|v| v.value().to_string()))
        })
    }

    /// Lazy view of the current value as a boolean.
    pub fn as_boolean_provider(self: &Arc<Self>) -> Result<Provider<bool>, OptionError> {
        self.ensure_type(OptionType::Boolean, &[OptionType::Boolean, OptionType::String])?;
        let opt = Arc::clone(self);
        Ok(self.as_string_provider().map(move |value| {
            match value.to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(opt.coercion_failure("a 'true' or 'false' value", value)),
            }
        }))
    }

    /// Lazy view of the current value as an integer.
    pub fn as_int_provider(self: &Arc<Self>) -> Result<Provider<i32>, OptionError> {
        self.ensure_type(OptionType::Integer, &[OptionType::Integer, OptionType::String])?;
        let opt = Arc::clone(self);
        Ok(self.as_string_provider().map(move |value| {
            value
                .parse::<i32>()
                .map_err(|_| opt.coercion_failure("an integer value", value))
        }))
    }

    /// Lazy view of the current value as a directory under the project root.
    pub fn as_dir_provider(self: &Arc<Self>) -> Result<Provider<PathBuf>, OptionError> {
        self.ensure_type(OptionType::Directory, &[OptionType::Directory, OptionType::String])?;
        Ok(self.path_provider())
    }

    /// Lazy view of the current value as a file under the project root.
    pub fn as_file_provider(self: &Arc<Self>) -> Result<Provider<PathBuf>, OptionError> {
        self.ensure_type(OptionType::File, &[OptionType::File, OptionType::String])?;
        Ok(self.path_provider())
    }

    fn path_provider(self: &Arc<Self>) -> Provider<PathBuf> {
        let opt = Arc::clone(self);
        self.as_string_provider()
            .map(move |value| Ok(opt.project.resolve(&value)))
    }

    fn ensure_type(&self, target: OptionType, accepted: &[OptionType]) -> Result<(), OptionError> {
        if accepted.contains(&self.option_type) {
            Ok(())
        } else {
            Err(OptionError::TypeMismatch {
                name: self.name.clone(),
                actual: self.option_type,
                requested: target,
            })
        }
    }

    fn coercion_failure(&self, expected: &'static str, value: String) -> OptionError {
        OptionError::CoercionFailure {
            name: self.name.clone(),
            option_type: self.option_type,
            expected,
            value,
        }
    }
}

impl fmt::Debug for BuildOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOption")
            .field("name", &self.name)
            .field("type", &self.option_type)
            .field("description", &self.description)
            .field("project", &self.project.path())
            .field("value", &self.value.get())
            .field("default_value", &self.default_value.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn project() -> Arc<Project> {
        Arc::new(Project::root("/work/app"))
    }

    fn option_with(
        option_type: OptionType,
        current: Option<(&str, ValueSource)>,
        default: Option<(&str, ValueSource)>,
    ) -> Arc<BuildOption> {
        let current = current.map(|(v, s)| OptionValue::new(v, s));
        let default = default.map(|(v, s)| OptionValue::new(v, s));
        Arc::new(
            BuildOption::new("opt", option_type, "an option", project())
                .with_upstream(move || current.clone())
                .with_default(move || default.clone()),
        )
    }

    #[test]
    fn test_resolution_is_lazy_and_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let opt = Arc::new(
            BuildOption::new("lazy", OptionType::String, "", project()).with_upstream(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Some(OptionValue::new("x", ValueSource::EnvironmentVariable))
            }),
        );

        let provider = opt.as_string_provider();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(provider.get().unwrap(), "x");
        assert_eq!(provider.get().unwrap(), "x");
        assert!(opt.is_present());
        assert_eq!(opt.source().unwrap(), ValueSource::EnvironmentVariable);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_falls_back_to_default() {
        let opt = option_with(
            OptionType::String,
            None,
            Some(("hello", ValueSource::ExplicitValue)),
        );
        assert_eq!(opt.as_string_provider().get().unwrap(), "hello");
        assert_eq!(opt.source().unwrap(), ValueSource::ExplicitValue);
        assert!(opt.is_equal_to_default_value());
    }

    #[test]
    fn test_boolean_coercion() {
        for (raw, expected) in [("true", true), ("false", false), ("TRUE", true), ("False", false)] {
            let opt = option_with(
                OptionType::Boolean,
                Some((raw, ValueSource::ProjectProperty)),
                None,
            );
            assert_eq!(opt.as_boolean_provider().unwrap().get().unwrap(), expected);
        }

        for raw in ["1", "", "yes"] {
            let opt = option_with(
                OptionType::Boolean,
                Some((raw, ValueSource::ProjectProperty)),
                None,
            );
            let err = opt.as_boolean_provider().unwrap().get().unwrap_err();
            assert!(matches!(err, OptionError::CoercionFailure { .. }), "{raw:?}");
            assert_eq!(
                err.to_string(),
                format!(
                    "Build option 'opt' is of type BOOLEAN and expects a 'true' or 'false' value but was: {}",
                    raw
                )
            );
        }
    }

    #[test]
    fn test_int_coercion() {
        let opt = option_with(OptionType::Integer, None, Some(("42", ValueSource::ExplicitValue)));
        assert_eq!(opt.as_string_provider().get().unwrap(), "42");
        assert_eq!(opt.as_int_provider().unwrap().get().unwrap(), 42);

        let opt = option_with(
            OptionType::Integer,
            Some(("forty", ValueSource::SystemProperty)),
            None,
        );
        let err = opt.as_int_provider().unwrap().get().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Build option 'opt' is of type INTEGER and expects an integer value but was: forty"
        );
    }

    #[test]
    fn test_string_options_accept_every_accessor() {
        let opt = option_with(OptionType::String, Some(("7", ValueSource::ProjectProperty)), None);
        assert_eq!(opt.as_int_provider().unwrap().get().unwrap(), 7);
        assert!(opt.as_boolean_provider().is_ok());
        assert!(opt.as_dir_provider().is_ok());
        assert!(opt.as_file_provider().is_ok());
    }

    #[test]
    fn test_type_mismatch_precedes_parsing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let opt = Arc::new(
            BuildOption::new("jobs", OptionType::Integer, "", project()).with_upstream(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Some(OptionValue::new("4", ValueSource::ProjectProperty))
            }),
        );

        let err = opt.as_boolean_provider().unwrap_err();
        assert_eq!(
            err,
            OptionError::TypeMismatch {
                name: "jobs".to_string(),
                actual: OptionType::Integer,
                requested: OptionType::Boolean,
            }
        );
        assert_eq!(
            err.to_string(),
            "Build option 'jobs' is of type INTEGER, it cannot be converted to BOOLEAN."
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let dir = option_with(OptionType::Directory, None, None);
        assert!(matches!(
            dir.as_boolean_provider(),
            Err(OptionError::TypeMismatch { .. })
        ));
        assert!(matches!(
            dir.as_file_provider(),
            Err(OptionError::TypeMismatch { .. })
        ));

        let boolean = option_with(OptionType::Boolean, None, None);
        assert!(matches!(
            boolean.as_int_provider(),
            Err(OptionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_path_providers_are_lexical() {
        let opt = option_with(
            OptionType::Directory,
            Some(("does/not/exist", ValueSource::LocalBuildOptionsFile)),
            None,
        );
        assert_eq!(
            opt.as_dir_provider().unwrap().get().unwrap(),
            PathBuf::from("/work/app/does/not/exist")
        );

        let file = option_with(OptionType::File, None, Some(("conf/a.txt", ValueSource::ExplicitValue)));
        assert_eq!(
            file.as_file_provider().unwrap().get().unwrap(),
            PathBuf::from("/work/app/conf/a.txt")
        );
    }

    #[test]
    fn test_equal_to_default_compares_values_only() {
        let same = option_with(
            OptionType::String,
            Some(("a", ValueSource::EnvironmentVariable)),
            Some(("a", ValueSource::ExplicitValue)),
        );
        assert!(same.is_equal_to_default_value());

        let different = option_with(
            OptionType::String,
            Some(("b", ValueSource::EnvironmentVariable)),
            Some(("a", ValueSource::ExplicitValue)),
        );
        assert!(!different.is_equal_to_default_value());

        let no_default = option_with(
            OptionType::String,
            Some(("a", ValueSource::EnvironmentVariable)),
            None,
        );
        assert!(!no_default.is_equal_to_default_value());

        let nothing = option_with(OptionType::String, None, None);
        assert!(!nothing.is_equal_to_default_value());
    }

    #[test]
    fn test_absent_value() {
        let opt = option_with(OptionType::String, None, None);
        assert!(!opt.is_present());
        assert_eq!(opt.as_string_provider().try_get().unwrap(), None);
        assert_eq!(
            opt.source().unwrap_err().to_string(),
            "This build option has no value set: opt"
        );
        assert!(matches!(
            opt.as_int_provider().unwrap().get(),
            Err(OptionError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_relative_path() {
        let opt = option_with(OptionType::Directory, None, None);
        assert_eq!(opt.relative_path(Path::new("/work/app/build/gen")), "build/gen");
    }
}
