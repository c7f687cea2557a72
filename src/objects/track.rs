//! Multi-frame tracks.
//!
//! A track stores only its keyframes. Between keyframes the state of the
//! previous keyframe is held; geometric interpolation is left to whoever
//! renders the track.

use std::collections::BTreeMap;

use super::{attributes_from_wire, attributes_to_wire, ShapeType, StateData};
use crate::model::{AttributeId, ClientId, LabelId, TrackData, TrackedShapeData};

/// One recorded state of a track.
///
/// `attributes` holds only the mutable attribute values that change at
/// this keyframe.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeRecord {
    pub frame: u64,
    pub points: Vec<f64>,
    pub occluded: bool,
    pub z_order: i32,
    pub outside: bool,
    pub attributes: BTreeMap<AttributeId, String>,
}

impl KeyframeRecord {
    pub fn from_data(data: &TrackedShapeData) -> Self {
        Self {
            frame: data.frame,
            points: data.points.clone(),
            occluded: data.occluded,
            z_order: data.z_order,
            outside: data.outside,
            attributes: attributes_from_wire(&data.attributes),
        }
    }

    pub fn to_data(&self, shape_type: ShapeType) -> TrackedShapeData {
        TrackedShapeData {
            shape_type: shape_type.as_str().to_string(),
            frame: self.frame,
            points: self.points.clone(),
            occluded: self.occluded,
            z_order: self.z_order,
            outside: self.outside,
            attributes: attributes_to_wire(&self.attributes),
        }
    }
}

/// An object followed across frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub client_id: ClientId,
    pub server_id: Option<u64>,
    pub shape_type: ShapeType,
    pub frame: u64,
    pub label_id: LabelId,
    pub group: u64,
    /// Track-level (immutable) attribute values.
    pub attributes: BTreeMap<AttributeId, String>,
    pub color: &'static str,
    pub removed: bool,
    shapes: BTreeMap<u64, KeyframeRecord>,
}

impl Track {
    /// Builds a track from its payload. A later record for an already seen
    /// frame replaces the earlier one.
    pub(crate) fn new(
        data: &TrackData,
        shape_type: ShapeType,
        client_id: ClientId,
        color: &'static str,
    ) -> Self {
        let shapes = data
            .shapes
            .iter()
            .map(|s| (s.frame, KeyframeRecord::from_data(s)))
            .collect();

        Self {
            client_id,
            server_id: data.id,
            shape_type,
            frame: data.frame,
            label_id: data.label_id,
            group: data.group,
            attributes: attributes_from_wire(&data.attributes),
            color,
            removed: false,
            shapes,
        }
    }

    /// Keyframes by frame, in increasing frame order.
    pub fn keyframes(&self) -> &BTreeMap<u64, KeyframeRecord> {
        &self.shapes
    }

    /// Records (or replaces) the keyframe at `record.frame`.
    pub fn set_keyframe(&mut self, record: KeyframeRecord) {
        self.shapes.insert(record.frame, record);
    }

    /// Frame of the first and last keyframe.
    pub fn span(&self) -> Option<(u64, u64)> {
        let first = *self.shapes.keys().next()?;
        let last = *self.shapes.keys().next_back()?;
        Some((first, last))
    }

    /// State of the track at `frame`.
    ///
    /// Before the first keyframe the track reports the first keyframe's
    /// geometry as a non-keyframe `outside` state.
    pub fn get(&self, frame: u64) -> StateData {
        let mut attributes = self.attributes.clone();
        let previous = self.shapes.range(..=frame).next_back();

        let (anchor, outside, keyframe) = match previous {
            Some((&at, record)) => {
                for (_, passed) in self.shapes.range(..=frame) {
                    attributes.extend(passed.attributes.clone());
                }
                (Some(record), record.outside, at == frame)
            }
            None => {
                let first = self.shapes.values().next();
                if let Some(first) = first {
                    attributes.extend(first.attributes.clone());
                }
                (first, true, false)
            }
        };

        StateData {
            frame,
            outside,
            keyframe,
            points: anchor.map(|r| r.points.clone()).unwrap_or_default(),
            occluded: anchor.is_some_and(|r| r.occluded),
            z_order: anchor.map_or(0, |r| r.z_order),
            attributes,
        }
    }

    pub fn to_data(&self) -> TrackData {
        TrackData {
            id: self.server_id,
            frame: self.frame,
            label_id: self.label_id,
            group: self.group,
            attributes: attributes_to_wire(&self.attributes),
            shapes: self
                .shapes
                .values()
                .map(|r| r.to_data(self.shape_type))
                .collect(),
        }
    }
}
