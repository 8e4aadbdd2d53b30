//! Lazy value views.
//!
//! A [`Provider`] does no work when created. The value is produced each time
//! it is observed; the expensive part (resolving an option from its sources)
//! is memoized by the option itself, so providers stay cheap to observe and to
//! clone.

use std::fmt;
use std::sync::Arc;

use crate::core::OptionError;

type ResolveFn<T> = dyn Fn() -> Result<Option<T>, OptionError> + Send + Sync;

/// A lazily evaluated, possibly absent value.
pub struct Provider<T> {
    /// Name reported when an absent value is required.
    name: Arc<str>,
    resolve: Arc<ResolveFn<T>>,
}

impl<T> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Provider {
            name: Arc::clone(&self.name),
            resolve: Arc::clone(&self.resolve),
        }
    }
}

impl<T> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider").field("name", &self.name).finish()
    }
}

impl<T: 'static> Provider<T> {
    /// Create a provider from a resolution function.
    pub fn new<F>(name: impl Into<Arc<str>>, resolve: F) -> Self
    where
        F: Fn() -> Result<Option<T>, OptionError> + Send + Sync + 'static,
    {
        Provider {
            name: name.into(),
            resolve: Arc::new(resolve),
        }
    }

    /// Name of the option behind this provider.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Observe the value, propagating absence.
    pub fn try_get(&self) -> Result<Option<T>, OptionError> {
        (self.resolve)()
    }

    /// Observe the value, failing if it is absent.
    pub fn get(&self) -> Result<T, OptionError> {
        self.try_get()?.ok_or_else(|| OptionError::MissingValue {
            name: self.name.to_string(),
        })
    }

    /// Observe the value, falling back to `default` if it is absent.
    pub fn get_or(&self, default: T) -> Result<T, OptionError> {
        Ok(self.try_get()?.unwrap_or(default))
    }

    /// Derive a provider that transforms present values.
    pub fn map<U, F>(&self, f: F) -> Provider<U>
    where
        U: 'static,
        F: Fn(T) -> Result<U, OptionError> + Send + Sync + 'static,
    {
        let inner = self.clone();
        Provider::new(Arc::clone(&self.name), move || {
            inner.try_get()?.map(&f).transpose()
        })
    }
}
