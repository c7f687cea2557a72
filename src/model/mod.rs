//! Value types at the serialization boundary.
//!
//! Labels and payload records are plain data: they are what `import`
//! consumes and `export` produces. The live annotation objects built from
//! them live in [`crate::objects`].

mod ids;
pub mod io_json;
mod label;
mod payload;

pub use ids::{AttributeId, ClientId, LabelId};
pub use label::{Attribute, Label, LabelTable};
pub use payload::{
    AnnotationPayload, AttributeValue, Session, ShapeData, TagData, TrackData, TrackedShapeData,
};
