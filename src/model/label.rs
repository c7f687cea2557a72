//! Label and attribute definitions.
//!
//! Labels are owned by the session that loads them; the collection only
//! reads them, most importantly to learn which attributes are mutable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::{AttributeId, LabelId};

/// A label (object class) with its attribute specs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier for this label.
    pub id: LabelId,

    /// Name of the label (e.g., "car").
    pub name: String,

    /// Attribute specs, in declaration order.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Label {
    /// Creates a label without attributes.
    pub fn new(id: impl Into<LabelId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute to the label.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Looks up an attribute by id.
    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    /// Returns true if the attribute is declared on this label and mutable.
    pub fn is_mutable(&self, id: AttributeId) -> bool {
        self.attribute(id).is_some_and(|a| a.mutable)
    }
}

/// An attribute declared on a label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,

    pub name: String,

    /// Whether the value may change from keyframe to keyframe.
    #[serde(default)]
    pub mutable: bool,

    /// Allowed values, if the schema restricts them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Attribute {
    /// Creates an attribute fixed for the lifetime of an object.
    pub fn immutable(id: impl Into<AttributeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mutable: false,
            values: Vec::new(),
        }
    }

    /// Creates an attribute whose value may change per keyframe.
    pub fn mutable(id: impl Into<AttributeId>, name: impl Into<String>) -> Self {
        Self {
            mutable: true,
            ..Self::immutable(id, name)
        }
    }
}

/// Labels indexed by id, built once from the session's label list.
#[derive(Clone, Debug, Default)]
pub struct LabelTable {
    labels: BTreeMap<LabelId, Label>,
}

impl LabelTable {
    /// Builds the table. A later label with a duplicate id replaces the earlier one.
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        Self {
            labels: labels.into_iter().map(|l| (l.id, l)).collect(),
        }
    }

    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(&id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates labels in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.values()
    }
}
