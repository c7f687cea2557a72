//! Session validation for framelabel.
//!
//! Validation reads a session without importing it and reports every
//! problem at once, where `import` stops at the first item it cannot
//! construct. It checks:
//! - Label integrity (unique ids, non-empty names)
//! - References (label ids, attribute ids declared on the label)
//! - Shape and track structure (known types, finite points, keyframes)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::{BTreeSet, HashMap};

use crate::model::{AttributeValue, Label, LabelId, Session};
use crate::objects::ShapeType;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a session and returns a report of all issues found.
pub fn validate_session(session: &Session, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    let labels = validate_labels(&session.labels, &mut report);
    validate_tags(session, &labels, &mut report);
    validate_shapes(session, &labels, &mut report);
    validate_tracks(session, &labels, &mut report);

    report
}

/// Validates the label list and returns it indexed by id.
///
/// A later label with a duplicate id replaces the earlier one, as it does
/// when the collection's label table is built.
fn validate_labels<'a>(
    labels: &'a [Label],
    report: &mut ValidationReport,
) -> HashMap<LabelId, &'a Label> {
    let mut seen: HashMap<LabelId, &Label> = HashMap::new();

    for label in labels {
        let id = label.id.as_u64();

        if seen.insert(label.id, label).is_some() {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateLabelId,
                format!("Duplicate label ID {}", id),
                IssueContext::Label { id },
            ));
        }

        if label.name.is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyLabelName,
                "Empty label name",
                IssueContext::Label { id },
            ));
        }
    }

    seen
}

fn validate_tags(
    session: &Session,
    labels: &HashMap<LabelId, &Label>,
    report: &mut ValidationReport,
) {
    for (index, tag) in session.annotations.tags.iter().enumerate() {
        let context = IssueContext::Tag { index };
        check_label_and_attributes(tag.label_id, &tag.attributes, labels, context, report);
    }
}

fn validate_shapes(
    session: &Session,
    labels: &HashMap<LabelId, &Label>,
    report: &mut ValidationReport,
) {
    for (index, shape) in session.annotations.shapes.iter().enumerate() {
        check_shape_type(&shape.shape_type, IssueContext::Shape { index }, report);
        check_points(&shape.points, IssueContext::Shape { index }, report);
        check_label_and_attributes(
            shape.label_id,
            &shape.attributes,
            labels,
            IssueContext::Shape { index },
            report,
        );
    }
}

fn validate_tracks(
    session: &Session,
    labels: &HashMap<LabelId, &Label>,
    report: &mut ValidationReport,
) {
    for (index, track) in session.annotations.tracks.iter().enumerate() {
        check_label_and_attributes(
            track.label_id,
            &track.attributes,
            labels,
            IssueContext::Track { index },
            report,
        );

        let Some(first) = track.shapes.first() else {
            report.add(ValidationIssue::warning(
                IssueCode::TrackWithoutShapes,
                "Track has no keyframes and will be skipped",
                IssueContext::Track { index },
            ));
            continue;
        };

        check_shape_type(&first.shape_type, IssueContext::Track { index }, report);

        let mut frames = BTreeSet::new();
        for record in &track.shapes {
            let context = IssueContext::Keyframe {
                track: index,
                frame: record.frame,
            };

            if record.shape_type != first.shape_type {
                report.add(ValidationIssue::warning(
                    IssueCode::MixedTrackShapeTypes,
                    format!(
                        "Keyframe type \"{}\" differs from track type \"{}\"",
                        record.shape_type, first.shape_type
                    ),
                    context.clone(),
                ));
            }

            if !frames.insert(record.frame) {
                report.add(ValidationIssue::warning(
                    IssueCode::DuplicateKeyframeFrame,
                    format!(
                        "Frame {} is recorded more than once; the last record wins",
                        record.frame
                    ),
                    context.clone(),
                ));
            }

            check_points(&record.points, context.clone(), report);
            if let Some(label) = labels.get(&track.label_id) {
                check_attributes(label, &record.attributes, context, report);
            }
        }
    }
}

fn check_shape_type(name: &str, context: IssueContext, report: &mut ValidationReport) {
    if ShapeType::from_name(name).is_none() {
        report.add(ValidationIssue::error(
            IssueCode::UnknownShapeType,
            format!("Unknown shape type \"{}\"", name),
            context,
        ));
    }
}

fn check_points(points: &[f64], context: IssueContext, report: &mut ValidationReport) {
    if points.iter().any(|p| !p.is_finite()) {
        report.add(ValidationIssue::error(
            IssueCode::PointsNotFinite,
            "Points contain NaN or infinite coordinates",
            context,
        ));
    }
}

fn check_label_and_attributes(
    label_id: LabelId,
    attributes: &[AttributeValue],
    labels: &HashMap<LabelId, &Label>,
    context: IssueContext,
    report: &mut ValidationReport,
) {
    match labels.get(&label_id) {
        Some(label) => check_attributes(label, attributes, context, report),
        None => report.add(ValidationIssue::error(
            IssueCode::UnknownLabelRef,
            format!("References non-existent label {}", label_id),
            context,
        )),
    }
}

fn check_attributes(
    label: &Label,
    attributes: &[AttributeValue],
    context: IssueContext,
    report: &mut ValidationReport,
) {
    for attribute in attributes {
        if label.attribute(attribute.spec_id).is_none() {
            report.add(ValidationIssue::warning(
                IssueCode::UnknownAttributeRef,
                format!(
                    "Attribute {} is not declared on label \"{}\"",
                    attribute.spec_id, label.name
                ),
                context.clone(),
            ));
        }
    }
}
