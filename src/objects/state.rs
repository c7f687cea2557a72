//! Per-frame state snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AnnotationObject, ObjectType, ShapeType};
use crate::model::{AttributeId, ClientId, Label};

/// What an object reports about itself at one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct StateData {
    pub frame: u64,
    /// The object is not present at this frame.
    pub outside: bool,
    /// The state was recorded at this frame rather than carried over.
    pub keyframe: bool,
    pub points: Vec<f64>,
    pub occluded: bool,
    pub z_order: i32,
    /// Resolved attribute values (immutable and mutable).
    pub attributes: BTreeMap<AttributeId, String>,
}

/// Caller-facing snapshot of one object at one frame.
///
/// Produced by [`Collection::get`](crate::collection::Collection::get) and
/// consumed by [`Collection::merge`](crate::collection::Collection::merge).
/// It is a plain value: editing it does not touch the collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub client_id: ClientId,
    pub object_type: ObjectType,
    pub label: Label,
    /// `None` for tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeType>,
    pub frame: u64,
    pub outside: bool,
    pub keyframe: bool,
    #[serde(default)]
    pub points: Vec<f64>,
    pub occluded: bool,
    pub z_order: i32,
    pub group: u64,
    pub color: String,
    #[serde(default)]
    pub attributes: BTreeMap<AttributeId, String>,
}

impl ObjectState {
    /// Combines an object's identity with the state it reported for a frame.
    pub fn new(object: &AnnotationObject, label: &Label, data: StateData) -> Self {
        Self {
            client_id: object.client_id(),
            object_type: object.object_type(),
            label: label.clone(),
            shape_type: object.shape_type(),
            frame: data.frame,
            outside: data.outside,
            keyframe: data.keyframe,
            points: data.points,
            occluded: data.occluded,
            z_order: data.z_order,
            group: object.group(),
            color: object.color().to_string(),
            attributes: data.attributes,
        }
    }
}
