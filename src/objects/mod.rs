//! Annotation objects held by a collection.
//!
//! Every object is one of three kinds: a single-frame [`Shape`], a
//! multi-frame [`Track`], or a frame [`Tag`]. Shapes and tracks are further
//! specialized by [`ShapeType`]. Objects are only ever constructed by the
//! object factory in [`crate::collection`].

pub mod palette;
mod shape;
mod shape_type;
mod state;
mod track;

pub use shape::{Shape, Tag};
pub use shape_type::ShapeType;
pub use state::{ObjectState, StateData};
pub use track::{KeyframeRecord, Track};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::{AttributeId, AttributeValue, ClientId, LabelId};

/// Which kind of object a state or object is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Shape,
    Track,
    Tag,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::Shape => f.write_str("shape"),
            ObjectType::Track => f.write_str("track"),
            ObjectType::Tag => f.write_str("tag"),
        }
    }
}

/// An annotation object owned by a collection.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationObject {
    Shape(Shape),
    Track(Track),
    Tag(Tag),
}

impl AnnotationObject {
    pub fn client_id(&self) -> ClientId {
        match self {
            AnnotationObject::Shape(s) => s.client_id,
            AnnotationObject::Track(t) => t.client_id,
            AnnotationObject::Tag(t) => t.client_id,
        }
    }

    /// The object's own frame; for tracks, the first frame.
    pub fn frame(&self) -> u64 {
        match self {
            AnnotationObject::Shape(s) => s.frame,
            AnnotationObject::Track(t) => t.frame,
            AnnotationObject::Tag(t) => t.frame,
        }
    }

    pub fn label_id(&self) -> LabelId {
        match self {
            AnnotationObject::Shape(s) => s.label_id,
            AnnotationObject::Track(t) => t.label_id,
            AnnotationObject::Tag(t) => t.label_id,
        }
    }

    pub fn group(&self) -> u64 {
        match self {
            AnnotationObject::Shape(s) => s.group,
            AnnotationObject::Track(t) => t.group,
            AnnotationObject::Tag(t) => t.group,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AnnotationObject::Shape(s) => s.color,
            AnnotationObject::Track(t) => t.color,
            AnnotationObject::Tag(t) => t.color,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            AnnotationObject::Shape(_) => ObjectType::Shape,
            AnnotationObject::Track(_) => ObjectType::Track,
            AnnotationObject::Tag(_) => ObjectType::Tag,
        }
    }

    /// `None` for tags.
    pub fn shape_type(&self) -> Option<ShapeType> {
        match self {
            AnnotationObject::Shape(s) => Some(s.shape_type),
            AnnotationObject::Track(t) => Some(t.shape_type),
            AnnotationObject::Tag(_) => None,
        }
    }

    pub fn is_removed(&self) -> bool {
        match self {
            AnnotationObject::Shape(s) => s.removed,
            AnnotationObject::Track(t) => t.removed,
            AnnotationObject::Tag(t) => t.removed,
        }
    }

    /// Sets the tombstone flag.
    pub fn set_removed(&mut self, removed: bool) {
        match self {
            AnnotationObject::Shape(s) => s.removed = removed,
            AnnotationObject::Track(t) => t.removed = removed,
            AnnotationObject::Tag(t) => t.removed = removed,
        }
    }

    /// State of the object at `frame`.
    pub fn get(&self, frame: u64) -> StateData {
        match self {
            AnnotationObject::Shape(s) => s.get(frame),
            AnnotationObject::Track(t) => t.get(frame),
            AnnotationObject::Tag(t) => t.get(frame),
        }
    }
}

pub(crate) fn attributes_from_wire(values: &[AttributeValue]) -> BTreeMap<AttributeId, String> {
    values
        .iter()
        .map(|a| (a.spec_id, a.value.clone()))
        .collect()
}

pub(crate) fn attributes_to_wire(values: &BTreeMap<AttributeId, String>) -> Vec<AttributeValue> {
    values
        .iter()
        .map(|(id, value)| AttributeValue::new(*id, value.clone()))
        .collect()
}
