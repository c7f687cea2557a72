#![allow(dead_code)]

use std::collections::BTreeSet;

use framelabel::model::{
    AnnotationPayload, Attribute, AttributeValue, Label, ShapeData, TagData, TrackData,
    TrackedShapeData,
};
use framelabel::objects::ShapeType;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const LABEL_IDS: [u64; 2] = [1, 2];
pub const MODEL: u64 = 10;
pub const PARKED: u64 = 11;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn labels() -> Vec<Label> {
    LABEL_IDS
        .iter()
        .map(|&id| {
            Label::new(id, format!("label-{id}"))
                .with_attribute(Attribute::immutable(MODEL, "model"))
                .with_attribute(Attribute::mutable(PARKED, "parked"))
        })
        .collect()
}

fn shape_type_strategy() -> impl Strategy<Value = ShapeType> {
    prop::sample::select(ShapeType::ALL.to_vec())
}

fn label_strategy() -> impl Strategy<Value = u64> {
    prop::sample::select(LABEL_IDS.to_vec())
}

/// Small integer coordinates, so values compare exactly after a round trip.
fn points_strategy() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec((0u16..2000).prop_map(f64::from), 2..=8)
}

/// Attribute values sorted by id, as the collection exports them.
fn attributes_strategy() -> impl Strategy<Value = Vec<AttributeValue>> {
    (
        proptest::option::of(prop::sample::select(vec!["sedan", "van"])),
        proptest::option::of(prop::sample::select(vec!["no", "yes"])),
    )
        .prop_map(|(model, parked)| {
            let mut attributes = Vec::new();
            if let Some(model) = model {
                attributes.push(AttributeValue::new(MODEL, model));
            }
            if let Some(parked) = parked {
                attributes.push(AttributeValue::new(PARKED, parked));
            }
            attributes
        })
}

pub fn arb_tag(max_frame: u64) -> BoxedStrategy<TagData> {
    (
        proptest::option::of(1u64..10_000),
        0..=max_frame,
        label_strategy(),
        0u64..4,
    )
        .prop_map(|(id, frame, label, group)| TagData {
            id,
            frame,
            label_id: label.into(),
            group,
            attributes: vec![],
        })
        .boxed()
}

pub fn arb_shape(max_frame: u64) -> BoxedStrategy<ShapeData> {
    (
        (proptest::option::of(1u64..10_000), shape_type_strategy()),
        0..=max_frame,
        label_strategy(),
        (any::<bool>(), -5i32..5),
        points_strategy(),
        attributes_strategy(),
    )
        .prop_map(
            |((id, shape_type), frame, label, (occluded, z_order), points, attributes)| {
                ShapeData {
                    id,
                    shape_type: shape_type.as_str().to_string(),
                    frame,
                    label_id: label.into(),
                    group: 0,
                    occluded,
                    z_order: Some(z_order),
                    points,
                    attributes,
                }
            },
        )
        .boxed()
}

/// A track with unique keyframe frames in increasing order.
pub fn arb_track(max_frame: u64) -> BoxedStrategy<TrackData> {
    (
        shape_type_strategy(),
        label_strategy(),
        proptest::collection::btree_set(0..=max_frame, 1..=6),
    )
        .prop_flat_map(|(shape_type, label, frames)| {
            let count = frames.len();
            (
                Just(shape_type),
                Just(label),
                Just(frames),
                proptest::collection::vec(
                    (any::<bool>(), points_strategy(), attributes_strategy()),
                    count..=count,
                ),
            )
        })
        .prop_map(|(shape_type, label, frames, records)| {
            let shapes: Vec<TrackedShapeData> = frames
                .iter()
                .zip(records)
                .map(|(&frame, (outside, points, attributes))| TrackedShapeData {
                    shape_type: shape_type.as_str().to_string(),
                    frame,
                    points,
                    occluded: false,
                    z_order: 0,
                    outside,
                    attributes: attributes
                        .into_iter()
                        .filter(|a| a.spec_id.as_u64() == PARKED)
                        .collect(),
                })
                .collect();

            TrackData {
                id: None,
                frame: shapes[0].frame,
                label_id: label.into(),
                group: 0,
                attributes: vec![AttributeValue::new(MODEL, "sedan")],
                shapes,
            }
        })
        .boxed()
}

/// A payload whose tags and shapes are already in frame order, so that an
/// import/export round trip reproduces it exactly.
pub fn arb_payload(max_items: usize, max_frame: u64) -> BoxedStrategy<AnnotationPayload> {
    (
        proptest::collection::vec(arb_tag(max_frame), 0..=max_items),
        proptest::collection::vec(arb_shape(max_frame), 0..=max_items),
        proptest::collection::vec(arb_track(max_frame), 0..=max_items),
    )
        .prop_map(|(mut tags, mut shapes, tracks)| {
            tags.sort_by_key(|t| t.frame);
            shapes.sort_by_key(|s| s.frame);
            AnnotationPayload {
                tags,
                shapes,
                tracks,
            }
        })
        .boxed()
}

/// Distinct frames for a batch of shapes to merge.
pub fn arb_merge_frames(max_frame: u64, max_shapes: usize) -> BoxedStrategy<BTreeSet<u64>> {
    proptest::collection::btree_set(0..=max_frame, 1..=max_shapes).boxed()
}
