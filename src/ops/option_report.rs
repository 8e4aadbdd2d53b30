//! The build options report.
//!
//! Lists every declared option with its current value, color coded by where
//! the value came from:
//!
//! ```text
//! Configurable build options in : (the root project)
//!
//! debug    = true     # enable debug (type: boolean, source: environment variable)
//! greeting = hello    # a greeting
//!
//! Option values color coded: default value, computed value, overridden value, no value
//! ```
//!
//! Options can be grouped by name pattern. Options declared identically by
//! several projects are shown once, with a project count.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;

use crate::core::{BuildOption, OptionType, Project, ValueSource};
use crate::sources::{BUILD_OPTIONS_FILE, LOCAL_BUILD_OPTIONS_FILE};
use crate::util::shell::{Style, StyledOutput, StyledText};

const NORMAL: Style = Style::Normal;
const COMPUTED: Style = Style::Identifier;
const OVERRIDDEN: Style = Style::FailureHeader;
const COMMENT: Style = Style::ProgressStatus;
const EXTRAS: Style = Style::SuccessHeader;
const GROUP_HEADER: Style = Style::Header;

/// Width of the value column.
const VALUE_WIDTH: usize = 8;

/// Label used for options matching no group, unless reconfigured.
pub const DEFAULT_OTHER_OPTIONS: &str = "Other options";

/// A named group of options selected by a name pattern.
#[derive(Debug, Clone)]
pub struct OptionGroup {
    label: String,
    pattern: Regex,
}

impl OptionGroup {
    /// Create a group. The pattern must match the whole option name.
    pub fn new(label: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(OptionGroup {
            label: label.into(),
            pattern: Regex::new(&format!("^(?:{})$", pattern))?,
        })
    }

    /// The group label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the group claims an option name.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// Option grouping for the report.
#[derive(Debug, Clone)]
pub struct OptionGroupingSpec {
    groups: Vec<OptionGroup>,
    other_options: Option<String>,
}

impl Default for OptionGroupingSpec {
    fn default() -> Self {
        OptionGroupingSpec {
            groups: Vec::new(),
            other_options: Some(DEFAULT_OTHER_OPTIONS.to_string()),
        }
    }
}

impl OptionGroupingSpec {
    /// Create a grouping with no groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group; groups claim options in the order they are added.
    pub fn group(&mut self, label: &str, pattern: &str) -> Result<&mut Self, regex::Error> {
        self.groups.push(OptionGroup::new(label, pattern)?);
        Ok(self)
    }

    /// Set the label for options matching no group.
    pub fn other_options(&mut self, label: impl Into<String>) -> &mut Self {
        self.other_options = Some(label.into());
        self
    }

    /// Leave options matching no group out of grouped reports.
    pub fn omit_other_options(&mut self) -> &mut Self {
        self.other_options = None;
        self
    }

    /// The configured groups.
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// The label for ungrouped options, if they are shown.
    pub fn other_options_label(&self) -> Option<&str> {
        self.other_options.as_deref()
    }

    /// Whether any group is configured.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Identity of a report line; equal keys across projects are coalesced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct OptionKey<'a> {
    name: &'a str,
    option_type: OptionType,
    value: &'a str,
    description: &'a str,
}

/// Renders the build options report for a project.
#[derive(Debug, Clone)]
pub struct OptionReport {
    project_name: String,
    grouping: OptionGroupingSpec,
    options_file: String,
    local_options_file: String,
}

impl OptionReport {
    /// Create a report run from `project`.
    pub fn new(project: &Project) -> Self {
        OptionReport {
            project_name: project.display_name(),
            grouping: OptionGroupingSpec::default(),
            options_file: BUILD_OPTIONS_FILE.to_string(),
            local_options_file: LOCAL_BUILD_OPTIONS_FILE.to_string(),
        }
    }

    /// Use a grouping spec.
    pub fn with_grouping(mut self, grouping: OptionGroupingSpec) -> Self {
        self.grouping = grouping;
        self
    }

    /// Configure option grouping in place.
    pub fn option_groups(&mut self) -> &mut OptionGroupingSpec {
        &mut self.grouping
    }

    /// Names of the options files, as shown in source labels.
    pub fn with_file_names(mut self, options_file: &str, local_options_file: &str) -> Self {
        self.options_file = options_file.to_string();
        self.local_options_file = local_options_file.to_string();
        self
    }

    /// Render the report into a string.
    pub fn render_to_string(&self, options: &[Arc<BuildOption>], use_color: bool) -> String {
        let mut out = StyledText::new(use_color);
        self.render(options, &mut out);
        out.into_string()
    }

    /// Render the report.
    pub fn render(&self, options: &[Arc<BuildOption>], out: &mut impl StyledOutput) {
        let project_count = options
            .iter()
            .map(|o| o.project_path())
            .collect::<HashSet<_>>()
            .len();

        out.append("Configurable build options in ");
        if project_count <= 1 {
            out.append_styled(Style::Identifier, &self.project_name);
        } else {
            out.append_styled(Style::Identifier, &format!("{} projects:", project_count));
        }
        out.append("\n\n");

        let key_width = options
            .iter()
            .map(|o| o.name().chars().count())
            .max()
            .unwrap_or(1);

        let mut sorted: Vec<&Arc<BuildOption>> = options.iter().collect();
        sorted.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.project_path().cmp(b.project_path()))
        });

        let include_project_ref = project_count > 1;

        if self.grouping.is_empty() {
            self.print_option_list(&sorted, out, key_width, include_project_ref);
        } else {
            let mut ungrouped = sorted;
            for group in self.grouping.groups() {
                let (matching, rest): (Vec<_>, Vec<_>) =
                    ungrouped.into_iter().partition(|o| group.matches(o.name()));
                ungrouped = rest;

                if matching.is_empty() {
                    continue;
                }

                print_group_header(out, group.label());
                self.print_option_list(&matching, out, key_width, include_project_ref);
                out.newline();
            }

            if let Some(label) = self.grouping.other_options_label() {
                if !ungrouped.is_empty() {
                    print_group_header(out, label);
                    self.print_option_list(&ungrouped, out, key_width, include_project_ref);
                }
            }
        }

        out.newline();
        print_legend(out);
    }

    fn print_option_list(
        &self,
        options: &[&Arc<BuildOption>],
        out: &mut impl StyledOutput,
        key_width: usize,
        include_project_ref: bool,
    ) {
        let mut coalesced: IndexMap<OptionKey<'_>, Vec<&Arc<BuildOption>>> = IndexMap::new();
        for opt in options {
            let key = OptionKey {
                name: opt.name(),
                option_type: opt.option_type(),
                value: opt.value().map(|v| v.value()).unwrap_or(""),
                description: opt.description(),
            };
            coalesced.entry(key).or_default().push(opt);
        }

        for same in coalesced.values() {
            self.print_option_info(same[0], out, key_width, include_project_ref, same.len());
        }
    }

    fn print_option_info(
        &self,
        opt: &BuildOption,
        out: &mut impl StyledOutput,
        key_width: usize,
        include_project_ref: bool,
        project_refs: usize,
    ) {
        let value = opt.value();

        let (value_style, value_source) = match value {
            None => (COMMENT, None),
            Some(v) if v.source() == ValueSource::ComputedValue => {
                (COMPUTED, Some("computed value".to_string()))
            }
            Some(v) if !opt.is_equal_to_default_value() => {
                (OVERRIDDEN, Some(self.source_label(v.source())))
            }
            Some(_) => (NORMAL, None),
        };

        out.format_field(NORMAL, opt.name(), key_width);
        out.append(" = ");
        out.format_field(
            value_style,
            value.map(|v| v.value()).unwrap_or("[empty]"),
            VALUE_WIDTH,
        );
        out.append_styled(COMMENT, &format!(" # {}", opt.description()));

        let mut extra_info = Vec::new();
        if opt.option_type() != OptionType::String {
            extra_info.push(format!("type: {}", opt.option_type().as_str()));
        }
        if let Some(source) = value_source {
            extra_info.push(format!("source: {}", source));
        }
        if include_project_ref {
            if project_refs > 1 {
                extra_info.push(format!("in {} projects", project_refs));
            } else {
                extra_info.push(format!("in '{}'", opt.project_path()));
            }
        }
        if !extra_info.is_empty() {
            out.append_styled(EXTRAS, &format!(" ({})", extra_info.join(", ")));
        }
        out.newline();
    }

    fn source_label(&self, source: ValueSource) -> String {
        match source {
            ValueSource::ProjectProperty => "project property".to_string(),
            ValueSource::SystemProperty => "system property".to_string(),
            ValueSource::EnvironmentVariable => "environment variable".to_string(),
            ValueSource::ExplicitValue => "explicit value".to_string(),
            ValueSource::ComputedValue => {
                unreachable!("computed values are never reported as overridden")
            }
            ValueSource::BuildOptionsFile => format!("{} file", self.options_file),
            ValueSource::LocalBuildOptionsFile => format!("{} file", self.local_options_file),
        }
    }
}

fn print_group_header(out: &mut impl StyledOutput, label: &str) {
    out.append_styled(GROUP_HEADER, label);
    out.newline();
    out.append_styled(GROUP_HEADER, &"=".repeat(label.chars().count()));
    out.newline();
}

fn print_legend(out: &mut impl StyledOutput) {
    out.append("Option values color coded: ");
    out.append_styled(NORMAL, "default value");
    out.append(", ");
    out.append_styled(COMPUTED, "computed value");
    out.append(", ");
    out.append_styled(OVERRIDDEN, "overridden value");
    out.append(", ");
    out.append_styled(COMMENT, "no value");
    out.newline();
}

/// Collect the options of several registries for one report.
pub fn collect_options<'a, I>(registries: I) -> Vec<Arc<BuildOption>>
where
    I: IntoIterator<Item = &'a crate::core::BuildOptions>,
{
    registries
        .into_iter()
        .flat_map(|r| r.options().cloned())
        .collect()
}
