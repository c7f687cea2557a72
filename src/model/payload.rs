//! Import/export payload records.
//!
//! These mirror the annotation JSON exchanged with the server: a payload
//! holds tags, shapes and tracks, and a track holds its keyframe-shaped
//! records. Shape type discriminants are kept as raw strings here so that
//! an unknown type reaches the object factory and is reported there.

use serde::{Deserialize, Serialize};

use super::ids::{AttributeId, LabelId};
use super::label::Label;

/// A single attribute value as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub spec_id: AttributeId,
    pub value: String,
}

impl AttributeValue {
    pub fn new(spec_id: impl Into<AttributeId>, value: impl Into<String>) -> Self {
        Self {
            spec_id: spec_id.into(),
            value: value.into(),
        }
    }
}

/// All annotations of a job: the unit of `import` and `export`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationPayload {
    #[serde(default)]
    pub tags: Vec<TagData>,

    #[serde(default)]
    pub shapes: Vec<ShapeData>,

    #[serde(default)]
    pub tracks: Vec<TrackData>,
}

impl AnnotationPayload {
    /// Total number of tags, shapes and tracks.
    pub fn len(&self) -> usize {
        self.tags.len() + self.shapes.len() + self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A frame tag (no geometry).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagData {
    /// Server-side id, if the tag was already persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub frame: u64,

    pub label_id: LabelId,

    #[serde(default)]
    pub group: u64,

    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
}

/// A single-frame shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Shape type discriminant ("rectangle", "polygon", "polyline", "points").
    #[serde(rename = "type")]
    pub shape_type: String,

    pub frame: u64,

    pub label_id: LabelId,

    #[serde(default)]
    pub group: u64,

    #[serde(default)]
    pub occluded: bool,

    /// Omitted z-order places the shape on top of its frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_order: Option<i32>,

    #[serde(default)]
    pub points: Vec<f64>,

    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
}

/// A multi-frame track defined by its keyframes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// First frame of the track.
    pub frame: u64,

    pub label_id: LabelId,

    #[serde(default)]
    pub group: u64,

    /// Immutable (track-level) attributes.
    #[serde(default)]
    pub attributes: Vec<AttributeValue>,

    /// Keyframe records; the first record's type selects the track variant.
    #[serde(default)]
    pub shapes: Vec<TrackedShapeData>,
}

/// One keyframe of a track as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedShapeData {
    #[serde(rename = "type")]
    pub shape_type: String,

    pub frame: u64,

    #[serde(default)]
    pub points: Vec<f64>,

    #[serde(default)]
    pub occluded: bool,

    #[serde(default)]
    pub z_order: i32,

    #[serde(default)]
    pub outside: bool,

    /// Mutable attribute values that change at this keyframe.
    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
}

/// A labels-plus-annotations document, the unit the CLI reads and writes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub labels: Vec<Label>,

    #[serde(default)]
    pub annotations: AnnotationPayload,
}
