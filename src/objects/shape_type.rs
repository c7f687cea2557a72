use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometry kind shared by shapes and tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Polygon,
    Polyline,
    Points,
}

impl ShapeType {
    /// All variants, in wire-name order.
    pub const ALL: [ShapeType; 4] = [
        ShapeType::Rectangle,
        ShapeType::Polygon,
        ShapeType::Polyline,
        ShapeType::Points,
    ];

    /// The discriminant used in payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::Polygon => "polygon",
            ShapeType::Polyline => "polyline",
            ShapeType::Points => "points",
        }
    }

    /// Parses a payload discriminant. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
