//! Single-frame objects: shapes and tags.

use std::collections::BTreeMap;

use super::{attributes_from_wire, attributes_to_wire, ShapeType, StateData};
use crate::model::{AttributeId, ClientId, LabelId, ShapeData, TagData};

/// A shape annotated on exactly one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub client_id: ClientId,
    pub server_id: Option<u64>,
    pub shape_type: ShapeType,
    pub frame: u64,
    pub label_id: LabelId,
    pub group: u64,
    pub occluded: bool,
    pub z_order: i32,
    pub points: Vec<f64>,
    pub attributes: BTreeMap<AttributeId, String>,
    pub color: &'static str,
    /// Tombstone: excluded from queries and export, still addressable by id.
    pub removed: bool,
}

impl Shape {
    pub(crate) fn new(
        data: &ShapeData,
        shape_type: ShapeType,
        client_id: ClientId,
        z_order: i32,
        color: &'static str,
    ) -> Self {
        Self {
            client_id,
            server_id: data.id,
            shape_type,
            frame: data.frame,
            label_id: data.label_id,
            group: data.group,
            occluded: data.occluded,
            z_order,
            points: data.points.clone(),
            attributes: attributes_from_wire(&data.attributes),
            color,
            removed: false,
        }
    }

    /// A shape is a keyframe at its own frame and visible there.
    pub fn get(&self, frame: u64) -> StateData {
        StateData {
            frame,
            outside: false,
            keyframe: true,
            points: self.points.clone(),
            occluded: self.occluded,
            z_order: self.z_order,
            attributes: self.attributes.clone(),
        }
    }

    pub fn to_data(&self) -> ShapeData {
        ShapeData {
            id: self.server_id,
            shape_type: self.shape_type.as_str().to_string(),
            frame: self.frame,
            label_id: self.label_id,
            group: self.group,
            occluded: self.occluded,
            z_order: Some(self.z_order),
            points: self.points.clone(),
            attributes: attributes_to_wire(&self.attributes),
        }
    }
}

/// A frame-level tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    pub client_id: ClientId,
    pub server_id: Option<u64>,
    pub frame: u64,
    pub label_id: LabelId,
    pub group: u64,
    pub attributes: BTreeMap<AttributeId, String>,
    pub color: &'static str,
    pub removed: bool,
}

impl Tag {
    pub(crate) fn new(data: &TagData, client_id: ClientId, color: &'static str) -> Self {
        Self {
            client_id,
            server_id: data.id,
            frame: data.frame,
            label_id: data.label_id,
            group: data.group,
            attributes: attributes_from_wire(&data.attributes),
            color,
            removed: false,
        }
    }

    pub fn get(&self, frame: u64) -> StateData {
        StateData {
            frame,
            outside: false,
            keyframe: true,
            points: Vec::new(),
            occluded: false,
            z_order: 0,
            attributes: self.attributes.clone(),
        }
    }

    pub fn to_data(&self) -> TagData {
        TagData {
            id: self.server_id,
            frame: self.frame,
            label_id: self.label_id,
            group: self.group,
            attributes: attributes_to_wire(&self.attributes),
        }
    }
}
