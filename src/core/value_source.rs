//! Origins of option values.

/// Where an option's current value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueSource {
    /// A property set on the project (`-P name=value`)
    ProjectProperty,
    /// A system property (`-D name=value`)
    SystemProperty,
    /// A process environment variable
    EnvironmentVariable,
    /// The fixed default given at declaration
    ExplicitValue,
    /// A default computed lazily at declaration
    ComputedValue,
    /// The shared build options file
    BuildOptionsFile,
    /// The machine-local (usually git-ignored) build options file
    LocalBuildOptionsFile,
}

impl ValueSource {
    /// Lookup rank of an upstream source (lower wins).
    ///
    /// Defaults have no rank: they are consulted only after every upstream
    /// source came up empty.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            ValueSource::ProjectProperty => Some(0),
            ValueSource::SystemProperty => Some(1),
            ValueSource::EnvironmentVariable => Some(2),
            ValueSource::LocalBuildOptionsFile => Some(3),
            ValueSource::BuildOptionsFile => Some(4),
            ValueSource::ExplicitValue | ValueSource::ComputedValue => None,
        }
    }

    /// Whether this source is a declared default rather than an upstream lookup.
    pub fn is_default(&self) -> bool {
        self.precedence().is_none()
    }
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ValueSource::ProjectProperty => "PROJECT_PROPERTY",
            ValueSource::SystemProperty => "SYSTEM_PROPERTY",
            ValueSource::EnvironmentVariable => "ENVIRONMENT_VARIABLE",
            ValueSource::ExplicitValue => "EXPLICIT_VALUE",
            ValueSource::ComputedValue => "COMPUTED_VALUE",
            ValueSource::BuildOptionsFile => "BUILD_OPTIONS_FILE",
            ValueSource::LocalBuildOptionsFile => "LOCAL_BUILD_OPTIONS_FILE",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ValueSource; 7] = [
        ValueSource::ProjectProperty,
        ValueSource::SystemProperty,
        ValueSource::EnvironmentVariable,
        ValueSource::ExplicitValue,
        ValueSource::ComputedValue,
        ValueSource::BuildOptionsFile,
        ValueSource::LocalBuildOptionsFile,
    ];

    #[test]
    fn test_precedence_is_total_over_upstream_sources() {
        let mut upstream: Vec<_> = ALL
            .iter()
            .filter_map(|s| s.precedence().map(|p| (p, *s)))
            .collect();
        upstream.sort();
        upstream.dedup_by_key(|(p, _)| *p);

        assert_eq!(upstream.len(), 5);
        assert_eq!(upstream[0].1, ValueSource::ProjectProperty);
        assert_eq!(upstream[3].1, ValueSource::LocalBuildOptionsFile);
        assert_eq!(upstream[4].1, ValueSource::BuildOptionsFile);
    }

    #[test]
    fn test_defaults_have_no_rank() {
        assert!(ValueSource::ExplicitValue.is_default());
        assert!(ValueSource::ComputedValue.is_default());
        assert!(!ValueSource::EnvironmentVariable.is_default());
    }
}
