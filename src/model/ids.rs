//! Newtype IDs for type-safe identification of collection elements.
//!
//! Client ids, label ids and attribute ids are all plain integers on the
//! wire; wrapping them keeps a label id from being passed where a client
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection-local identity of an annotation object.
///
/// Assigned by the collection at creation time, starting at 1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl ClientId {
    /// Creates a new ClientId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientId({})", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ClientId {
    fn from(id: u64) -> Self {
        ClientId::new(id)
    }
}

/// Identifier of a label in the label table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(pub u64);

impl LabelId {
    /// Creates a new LabelId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelId({})", self.0)
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LabelId {
    fn from(id: u64) -> Self {
        LabelId::new(id)
    }
}

/// Identifier of an attribute spec declared on a label.
///
/// Serialized as `spec_id` inside attribute values.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeId(pub u64);

impl AttributeId {
    /// Creates a new AttributeId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeId({})", self.0)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AttributeId {
    fn from(id: u64) -> Self {
        AttributeId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality() {
        assert_eq!(ClientId(1), ClientId(1));
        assert_ne!(ClientId(1), ClientId(2));
    }

    #[test]
    fn test_id_ordering() {
        assert!(ClientId(1) < ClientId(2));
        assert!(AttributeId(10) > AttributeId(5));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&LabelId(7)).unwrap();
        assert_eq!(json, "7");
        let back: AttributeId = serde_json::from_str("12").unwrap();
        assert_eq!(back, AttributeId(12));
    }
}
