//! Static checks of layout documents.
//!
//! Validation reports problems a layout author would want to know about. It
//! never blocks rendering: every layout renders, validation only explains
//! what the renderer will do with the questionable parts.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::models::{ActionPosition, LayoutConfig, LayoutSection, VisibilityCondition};
use crate::render::RenderOptions;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document is ambiguous; hosts may misbehave
    Error,
    /// The renderer falls back or ignores something
    Warning,
}

/// Kinds of findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Two sibling sections share an id
    DuplicateSectionId,
    /// Two layout actions share an id
    DuplicateActionId,
    /// Section has no id and gets a positional key
    MissingSectionId,
    /// Section type outside the known set
    UnknownSectionType,
    /// Nesting deeper than the render depth bound
    DepthExceeded,
    /// Settings block for a different mode
    SettingsMismatch,
    /// Layout action that the floating bar does not show
    NonFloatingAction,
    /// Grid column count of zero
    ZeroColumns,
    /// Column count on a type that ignores it
    ColumnsIgnored,
    /// Data source with no inline items
    UnresolvedDataSource,
    /// Custom visibility without a rule
    MissingCustomRule,
    /// Layout without a title
    EmptyTitle,
}

impl IssueKind {
    /// Severity of this kind of finding.
    pub const fn severity(self) -> Severity {
        match self {
            Self::DuplicateSectionId | Self::DuplicateActionId => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DuplicateSectionId => "Duplicate Section Id",
            Self::DuplicateActionId => "Duplicate Action Id",
            Self::MissingSectionId => "Missing Section Id",
            Self::UnknownSectionType => "Unknown Section Type",
            Self::DepthExceeded => "Depth Exceeded",
            Self::SettingsMismatch => "Settings Mismatch",
            Self::NonFloatingAction => "Non-floating Action",
            Self::ZeroColumns => "Zero Columns",
            Self::ColumnsIgnored => "Columns Ignored",
            Self::UnresolvedDataSource => "Unresolved Data Source",
            Self::MissingCustomRule => "Missing Custom Rule",
            Self::EmptyTitle => "Empty Title",
        };
        write!(f, "{label}")
    }
}

/// One finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// Finding kind
    pub kind: IssueKind,
    /// Error or warning
    pub severity: Severity,
    /// Location in the document, e.g. `sections[1].children[0]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Human-readable message
    pub message: String,
    /// What the author can do about it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            path: None,
            message: message.into(),
            suggestion: None,
        }
    }

    fn at(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{path}] {}: {}", self.kind, self.message)?,
            None => write!(f, "{}: {}", self.kind, self.message)?,
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }
        Ok(())
    }
}

/// Validation result with errors and warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Whether the document has no errors
    pub valid: bool,
    /// Findings of error severity
    pub errors: Vec<ValidationIssue>,
    /// Findings of warning severity
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
        self.valid = self.errors.is_empty();
    }

    /// Returns true if there are no errors (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when any finding has the given kind.
    pub fn has(&self, kind: IssueKind) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|issue| issue.kind == kind)
    }

    /// Formats the report as a user-friendly message.
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("✗ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("⚠ {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Layout validator.
pub struct LayoutValidator<'a> {
    layout: &'a LayoutConfig,
    options: RenderOptions,
}

impl<'a> LayoutValidator<'a> {
    /// Creates a validator checking against the given render options.
    pub const fn new(layout: &'a LayoutConfig, options: RenderOptions) -> Self {
        Self { layout, options }
    }

    /// Runs every check.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport {
            valid: true,
            ..ValidationReport::default()
        };

        if self.layout.title.trim().is_empty() {
            report.push(ValidationIssue::new(IssueKind::EmptyTitle, "Layout has no title"));
        }

        for mode in self.layout.mismatched_settings() {
            report.push(
                ValidationIssue::new(
                    IssueKind::SettingsMismatch,
                    format!(
                        "{mode} settings are ignored by a {} layout",
                        self.layout.mode
                    ),
                )
                .with_suggestion(format!("Remove {mode}Settings or change the mode")),
            );
        }

        self.check_actions(&mut report);
        self.check_sections(&self.layout.sections, "sections", 1, &mut report);
        report
    }

    fn check_actions(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for (i, action) in self.layout.actions.iter().enumerate() {
            let path = format!("actions[{i}]");
            if !seen.insert(action.id.as_str()) {
                report.push(
                    ValidationIssue::new(
                        IssueKind::DuplicateActionId,
                        format!("Action id '{}' is used more than once", action.id),
                    )
                    .at(&path),
                );
            }
            if action.position != ActionPosition::Floating {
                report.push(
                    ValidationIssue::new(
                        IssueKind::NonFloatingAction,
                        format!(
                            "Action '{}' is positioned '{}' and is not shown in the action bar",
                            action.id,
                            action.position.as_str()
                        ),
                    )
                    .at(&path),
                );
            }
        }
    }

    fn check_sections(
        &self,
        sections: &[LayoutSection],
        parent: &str,
        depth: usize,
        report: &mut ValidationReport,
    ) {
        let mut seen = HashSet::new();
        for (i, section) in sections.iter().enumerate() {
            let path = format!("{parent}[{i}]");

            if section.id.is_empty() {
                report.push(
                    ValidationIssue::new(
                        IssueKind::MissingSectionId,
                        format!("Section has no id and is keyed 'section-{i}'"),
                    )
                    .at(&path),
                );
            } else if !seen.insert(section.id.as_str()) {
                report.push(
                    ValidationIssue::new(
                        IssueKind::DuplicateSectionId,
                        format!("Section id '{}' repeats among its siblings", section.id),
                    )
                    .at(&path)
                    .with_suggestion("Give every sibling section a unique id"),
                );
            }

            if section.section_type.is_unknown() {
                report.push(
                    ValidationIssue::new(
                        IssueKind::UnknownSectionType,
                        format!(
                            "Unknown section type '{}' renders as a placeholder",
                            section.section_type
                        ),
                    )
                    .at(&path),
                );
            }

            match section.columns {
                Some(0) if section.section_type.is_grid_family() => report.push(
                    ValidationIssue::new(
                        IssueKind::ZeroColumns,
                        "columns is 0; the default column count is used",
                    )
                    .at(&path),
                ),
                Some(_) if !section.section_type.is_grid_family() => report.push(
                    ValidationIssue::new(
                        IssueKind::ColumnsIgnored,
                        format!("'{}' sections ignore columns", section.section_type),
                    )
                    .at(&path),
                ),
                _ => {}
            }

            if let Some(content) = &section.content {
                if content.data_source.is_some() && content.items.is_empty() {
                    report.push(
                        ValidationIssue::new(
                            IssueKind::UnresolvedDataSource,
                            "dataSource has no inline items; the section renders empty until the host resolves it",
                        )
                        .at(&path),
                    );
                }
            }

            if let Some(visibility) = &section.visibility {
                let rule_missing = !matches!(
                    visibility.custom_rule.as_deref(),
                    Some(rule) if !rule.trim().is_empty()
                );
                if visibility.condition == VisibilityCondition::Custom && rule_missing {
                    report.push(
                        ValidationIssue::new(
                            IssueKind::MissingCustomRule,
                            "custom visibility without customRule is always shown",
                        )
                        .at(&path),
                    );
                }
            }

            if section.children.is_empty() {
                continue;
            }
            if depth >= self.options.max_depth {
                let omitted: usize = section.children.iter().map(LayoutSection::subtree_len).sum();
                report.push(
                    ValidationIssue::new(
                        IssueKind::DepthExceeded,
                        format!(
                            "{omitted} nested section(s) lie beyond depth {} and are not rendered",
                            self.options.max_depth
                        ),
                    )
                    .at(&path)
                    .with_suggestion("Flatten the layout or raise render.max_depth"),
                );
                continue;
            }
            self.check_sections(
                &section.children,
                &format!("{path}.children"),
                depth + 1,
                report,
            );
        }
    }
}
