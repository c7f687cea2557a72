//! Object factory: the single place annotation objects are constructed.
//!
//! Each constructor dispatches on the payload's type discriminant, checks
//! that the referenced label exists, and assigns the palette color for the
//! object's client id.

use crate::error::FramelabelError;
use crate::model::{ClientId, LabelId, LabelTable, ShapeData, TagData, TrackData};
use crate::objects::palette::color_for;
use crate::objects::{Shape, ShapeType, Tag, Track};

use super::z_index::ZIndex;

/// Read-only context handed to every constructed object.
#[derive(Clone, Copy, Debug)]
pub struct Injection<'a> {
    pub labels: &'a LabelTable,
    pub z_index: &'a ZIndex,
}

/// Builds a shape from its payload.
///
/// # Errors
/// Returns [`FramelabelError::Data`] for an unknown shape type or label.
pub fn create_shape(
    data: &ShapeData,
    client_id: ClientId,
    injection: &Injection<'_>,
) -> Result<Shape, FramelabelError> {
    let shape_type = parse_shape_type(&data.shape_type, "shape")?;
    require_label(data.label_id, injection)?;

    let z_order = data
        .z_order
        .unwrap_or_else(|| injection.z_index.next_on_top(data.frame));

    Ok(Shape::new(
        data,
        shape_type,
        client_id,
        z_order,
        color_for(client_id),
    ))
}

/// Builds a track from its payload.
///
/// The variant is chosen by the type of the first keyframe record. A track
/// without any records is not an error: it is logged and `Ok(None)` is
/// returned so the caller can skip it.
///
/// # Errors
/// Returns [`FramelabelError::Data`] for an unknown track type or label.
pub fn create_track(
    data: &TrackData,
    client_id: ClientId,
    injection: &Injection<'_>,
) -> Result<Option<Track>, FramelabelError> {
    let Some(first) = data.shapes.first() else {
        tracing::warn!(
            client_id = client_id.as_u64(),
            frame = data.frame,
            "track without any shapes found; it was ignored"
        );
        return Ok(None);
    };

    let shape_type = parse_shape_type(&first.shape_type, "track")?;
    require_label(data.label_id, injection)?;

    Ok(Some(Track::new(
        data,
        shape_type,
        client_id,
        color_for(client_id),
    )))
}

/// Builds a tag from its payload.
///
/// # Errors
/// Returns [`FramelabelError::Data`] for an unknown label.
pub fn create_tag(
    data: &TagData,
    client_id: ClientId,
    injection: &Injection<'_>,
) -> Result<Tag, FramelabelError> {
    require_label(data.label_id, injection)?;
    Ok(Tag::new(data, client_id, color_for(client_id)))
}

fn parse_shape_type(name: &str, kind: &str) -> Result<ShapeType, FramelabelError> {
    ShapeType::from_name(name)
        .ok_or_else(|| FramelabelError::Data(format!("unexpected type of {kind} \"{name}\"")))
}

fn require_label(label_id: LabelId, injection: &Injection<'_>) -> Result<(), FramelabelError> {
    if injection.labels.get(label_id).is_none() {
        return Err(FramelabelError::Data(format!("unknown label id {label_id}")));
    }
    Ok(())
}
