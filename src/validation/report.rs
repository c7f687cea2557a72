//! Validation report types for structured error reporting.
//!
//! This module provides rich, structured validation results that can be
//! displayed to users, written as JSON, or processed programmatically.

use serde::Serialize;
use std::fmt;

/// The result of validating a session.
///
/// Contains all issues found during validation, categorized by severity.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Renders the report as a JSON document with counts and issues.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&serde_json::json!({
            "error_count": self.error_count(),
            "warning_count": self.warning_count(),
            "issues": self.issues,
        }))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    pub message: String,

    /// Where the issue occurred.
    #[serde(serialize_with = "serialize_display")]
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// The item imports, but probably not the way the author meant.
    Warning,
    /// The item cannot be imported.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Label issues
    /// Multiple labels have the same ID.
    DuplicateLabelId,
    /// A label has an empty name.
    EmptyLabelName,

    // Reference issues
    /// An annotation references a label missing from the label list.
    UnknownLabelRef,
    /// An attribute value references an attribute not declared on its label.
    UnknownAttributeRef,

    // Shape and track issues
    /// A shape or track has a type discriminant outside the known set.
    UnknownShapeType,
    /// Points contain NaN or infinite coordinates.
    PointsNotFinite,
    /// A track has no keyframes and will be skipped on import.
    TrackWithoutShapes,
    /// A track's keyframes disagree on the shape type.
    MixedTrackShapeTypes,
    /// A track records more than one keyframe for the same frame.
    DuplicateKeyframeFrame,
}

/// Context about where a validation issue occurred.
#[derive(Clone, Debug)]
pub enum IssueContext {
    /// Issue with the session as a whole.
    Session,
    /// Issue with a specific label.
    Label { id: u64 },
    /// Issue with the tag at this payload index.
    Tag { index: usize },
    /// Issue with the shape at this payload index.
    Shape { index: usize },
    /// Issue with the track at this payload index.
    Track { index: usize },
    /// Issue with one keyframe of a track.
    Keyframe { track: usize, frame: u64 },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Session => write!(f, "session"),
            IssueContext::Label { id } => write!(f, "label {}", id),
            IssueContext::Tag { index } => write!(f, "tag #{}", index),
            IssueContext::Shape { index } => write!(f, "shape #{}", index),
            IssueContext::Track { index } => write!(f, "track #{}", index),
            IssueContext::Keyframe { track, frame } => {
                write!(f, "track #{} frame {}", track, frame)
            }
        }
    }
}

fn serialize_display<S: serde::Serializer>(
    value: &IssueContext,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
