#![allow(dead_code)]

use framelabel::model::{
    AnnotationPayload, Attribute, AttributeValue, Label, Session, ShapeData, TagData, TrackData,
    TrackedShapeData,
};

pub const CAR: u64 = 1;
pub const PERSON: u64 = 2;

/// Attribute ids declared on the car label.
pub const MODEL: u64 = 10;
pub const PARKED: u64 = 11;

pub fn labels() -> Vec<Label> {
    vec![
        Label::new(CAR, "car")
            .with_attribute(Attribute::immutable(MODEL, "model"))
            .with_attribute(Attribute::mutable(PARKED, "parked")),
        Label::new(PERSON, "person"),
    ]
}

pub fn rect(frame: u64, label: u64) -> ShapeData {
    ShapeData {
        id: None,
        shape_type: "rectangle".into(),
        frame,
        label_id: label.into(),
        group: 0,
        occluded: false,
        z_order: Some(0),
        points: vec![frame as f64, 0.0, frame as f64 + 20.0, 20.0],
        attributes: vec![
            AttributeValue::new(MODEL, "sedan"),
            AttributeValue::new(PARKED, "no"),
        ],
    }
}

pub fn polygon(frame: u64, label: u64) -> ShapeData {
    ShapeData {
        shape_type: "polygon".into(),
        points: vec![0.0, 0.0, 10.0, 0.0, 5.0, 8.0],
        ..rect(frame, label)
    }
}

pub fn tag(frame: u64, label: u64) -> TagData {
    TagData {
        id: None,
        frame,
        label_id: label.into(),
        group: 0,
        attributes: vec![],
    }
}

pub fn keyframe(frame: u64, outside: bool) -> TrackedShapeData {
    TrackedShapeData {
        shape_type: "rectangle".into(),
        frame,
        points: vec![frame as f64, 0.0, frame as f64 + 20.0, 20.0],
        occluded: false,
        z_order: 0,
        outside,
        attributes: vec![],
    }
}

pub fn rect_track(label: u64, keyframes: Vec<TrackedShapeData>) -> TrackData {
    TrackData {
        id: None,
        frame: keyframes.first().map_or(0, |k| k.frame),
        label_id: label.into(),
        group: 0,
        attributes: vec![AttributeValue::new(MODEL, "sedan")],
        shapes: keyframes,
    }
}

pub fn session(annotations: AnnotationPayload) -> Session {
    Session {
        labels: labels(),
        annotations,
    }
}
