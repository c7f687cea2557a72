//! Folding several objects into one track.
//!
//! Merging is split in two: [`plan_merge`] validates the input and builds
//! the new track's payload without touching the collection, and the
//! collection commits the plan only if planning succeeded. A failed merge
//! therefore leaves the collection exactly as it was.

use std::collections::BTreeMap;

use crate::error::FramelabelError;
use crate::model::{AttributeId, AttributeValue, ClientId, Label, TrackData};
use crate::objects::{AnnotationObject, KeyframeRecord, ObjectState, Shape, ShapeType, Track};

/// A validated merge, ready to be committed.
#[derive(Debug)]
pub(crate) struct MergePlan {
    /// Objects to tombstone once the track exists.
    pub sources: Vec<ClientId>,
    /// Payload of the synthetic track.
    pub track: TrackData,
}

/// Validates `states` and builds the merged track.
///
/// Returns `Ok(None)` for empty input.
pub(crate) fn plan_merge(
    objects: &BTreeMap<ClientId, AnnotationObject>,
    states: &[ObjectState],
) -> Result<Option<MergePlan>, FramelabelError> {
    let Some(first) = states.first() else {
        return Ok(None);
    };

    let sources = states
        .iter()
        .map(|state| {
            objects.get(&state.client_id).ok_or_else(|| {
                FramelabelError::Argument(format!(
                    "object {} has not been saved yet and cannot be merged",
                    state.client_id
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let label = &first.label;
    for state in states {
        if state.label.id != label.id {
            return Err(FramelabelError::Argument(format!(
                "all merged objects are expected to be labelled \"{}\", but got \"{}\"",
                label.name, state.label.name
            )));
        }
        if state.shape_type != first.shape_type {
            return Err(FramelabelError::Argument(format!(
                "all merged objects are expected to be {}, but got {}",
                describe_type(first.shape_type),
                describe_type(state.shape_type)
            )));
        }
    }

    let mut timeline = Timeline::default();
    for object in &sources {
        match object {
            AnnotationObject::Shape(shape) => timeline.add_shape(shape, label)?,
            AnnotationObject::Track(track) => timeline.add_track(track)?,
            AnnotationObject::Tag(tag) => {
                return Err(FramelabelError::Argument(format!(
                    "tag {} cannot be merged; only shapes and tracks are expected",
                    tag.client_id
                )));
            }
        }
    }

    timeline.trim_leading_outside();

    let (Some(shape_type), Some(&start)) = (first.shape_type, timeline.keyframes.keys().next())
    else {
        return Err(FramelabelError::Argument(
            "merged objects have no visible keyframes".to_string(),
        ));
    };

    let track = TrackData {
        id: None,
        frame: start,
        label_id: label.id,
        group: 0,
        attributes: immutable_attributes(first, label),
        shapes: timeline
            .keyframes
            .values()
            .map(|record| record.to_data(shape_type))
            .collect(),
    };

    Ok(Some(MergePlan {
        sources: sources.iter().map(|o| o.client_id()).collect(),
        track,
    }))
}

/// Keyframes collected so far, plus the last value written for each
/// attribute.
#[derive(Debug, Default)]
struct Timeline {
    keyframes: BTreeMap<u64, KeyframeRecord>,
    last_attributes: BTreeMap<AttributeId, String>,
}

impl Timeline {
    fn visible_at(&self, frame: u64) -> bool {
        self.keyframes.get(&frame).is_some_and(|k| !k.outside)
    }

    /// Records the shape's frame and, if nothing claims it yet, an outside
    /// keyframe right after it.
    fn add_shape(&mut self, shape: &Shape, label: &Label) -> Result<(), FramelabelError> {
        if self.visible_at(shape.frame) {
            return Err(FramelabelError::Argument(format!(
                "expected only one visible shape per frame, frame {} has more",
                shape.frame
            )));
        }

        let record = KeyframeRecord {
            frame: shape.frame,
            points: shape.points.clone(),
            occluded: shape.occluded,
            z_order: shape.z_order,
            outside: false,
            attributes: shape
                .attributes
                .iter()
                .filter(|(id, _)| label.is_mutable(**id))
                .map(|(id, value)| (*id, value.clone()))
                .collect(),
        };

        // No frame follows u64::MAX, so a shape there gets no twin.
        if let Some(twin_frame) = shape.frame.checked_add(1) {
            if !self.keyframes.contains_key(&twin_frame) {
                let mut twin = record.clone();
                twin.frame = twin_frame;
                twin.outside = true;
                self.keyframes.insert(twin_frame, twin);
            }
        }

        self.keyframes.insert(shape.frame, record);
        Ok(())
    }

    /// Copies the track's keyframes, keeping only attribute changes.
    ///
    /// An outside keyframe landing on an already visible frame is dropped;
    /// a visible one is a conflict.
    fn add_track(&mut self, track: &Track) -> Result<(), FramelabelError> {
        for (&frame, record) in track.keyframes() {
            if self.visible_at(frame) {
                if record.outside {
                    continue;
                }
                return Err(FramelabelError::Argument(format!(
                    "expected only one visible shape per frame, frame {frame} has more"
                )));
            }

            let mut changed = BTreeMap::new();
            for (id, value) in &record.attributes {
                if self.last_attributes.get(id) != Some(value) {
                    self.last_attributes.insert(*id, value.clone());
                    changed.insert(*id, value.clone());
                }
            }

            self.keyframes.insert(
                frame,
                KeyframeRecord {
                    attributes: changed,
                    ..record.clone()
                },
            );
        }
        Ok(())
    }

    /// A track must not begin with dead air.
    fn trim_leading_outside(&mut self) {
        while let Some(entry) = self.keyframes.first_entry() {
            if !entry.get().outside {
                break;
            }
            entry.remove();
        }
    }
}

fn immutable_attributes(state: &ObjectState, label: &Label) -> Vec<AttributeValue> {
    state
        .attributes
        .iter()
        .filter(|(id, _)| label.attribute(**id).is_some_and(|a| !a.mutable))
        .map(|(id, value)| AttributeValue::new(*id, value.clone()))
        .collect()
}

fn describe_type(shape_type: Option<ShapeType>) -> &'static str {
    shape_type.map_or("tag", |t| t.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, LabelId, ShapeData, TrackedShapeData};
    use crate::objects::{ObjectType, StateData};

    fn label() -> Label {
        Label::new(1u64, "car")
            .with_attribute(Attribute::immutable(1u64, "model"))
            .with_attribute(Attribute::mutable(2u64, "parked"))
    }

    fn shape(client_id: u64, frame: u64, parked: &str) -> AnnotationObject {
        let data = ShapeData {
            id: None,
            shape_type: "rectangle".into(),
            frame,
            label_id: LabelId(1),
            group: 0,
            occluded: false,
            z_order: Some(0),
            points: vec![0.0, 0.0, 10.0, 10.0],
            attributes: vec![
                AttributeValue::new(1u64, "sedan"),
                AttributeValue::new(2u64, parked),
            ],
        };
        AnnotationObject::Shape(Shape::new(
            &data,
            ShapeType::Rectangle,
            ClientId(client_id),
            0,
            "#000000",
        ))
    }

    fn track(client_id: u64, records: &[(u64, bool, Option<&str>)]) -> AnnotationObject {
        let data = TrackData {
            id: None,
            frame: records.first().map_or(0, |r| r.0),
            label_id: LabelId(1),
            group: 0,
            attributes: vec![AttributeValue::new(1u64, "sedan")],
            shapes: records
                .iter()
                .map(|(frame, outside, parked)| TrackedShapeData {
                    shape_type: "rectangle".into(),
                    frame: *frame,
                    points: vec![0.0, 0.0, 10.0, 10.0],
                    occluded: false,
                    z_order: 0,
                    outside: *outside,
                    attributes: parked
                        .map(|v| vec![AttributeValue::new(2u64, v)])
                        .unwrap_or_default(),
                })
                .collect(),
        };
        AnnotationObject::Track(Track::new(
            &data,
            ShapeType::Rectangle,
            ClientId(client_id),
            "#000000",
        ))
    }

    fn index(objects: Vec<AnnotationObject>) -> BTreeMap<ClientId, AnnotationObject> {
        objects.into_iter().map(|o| (o.client_id(), o)).collect()
    }

    fn state_of(object: &AnnotationObject) -> ObjectState {
        let data: StateData = object.get(object.frame());
        ObjectState::new(object, &label(), data)
    }

    #[test]
    fn test_two_shapes_get_outside_twins() {
        let objects = index(vec![shape(1, 5, "no"), shape(2, 10, "yes")]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let plan = plan_merge(&objects, &states).unwrap().expect("plan");
        let frames: Vec<(u64, bool)> = plan
            .track
            .shapes
            .iter()
            .map(|s| (s.frame, s.outside))
            .collect();
        assert_eq!(frames, vec![(5, false), (6, true), (10, false), (11, true)]);
        assert_eq!(plan.track.frame, 5);
        assert_eq!(plan.track.group, 0);
        assert_eq!(plan.sources, vec![ClientId(1), ClientId(2)]);
    }

    #[test]
    fn test_shape_keyframes_keep_only_mutable_attributes() {
        let objects = index(vec![shape(1, 0, "no")]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let plan = plan_merge(&objects, &states).unwrap().expect("plan");
        assert_eq!(
            plan.track.shapes[0].attributes,
            vec![AttributeValue::new(2u64, "no")]
        );
        assert_eq!(
            plan.track.attributes,
            vec![AttributeValue::new(1u64, "sedan")]
        );
    }

    #[test]
    fn test_adjacent_shape_overrides_twin() {
        let objects = index(vec![shape(1, 3, "no"), shape(2, 4, "no")]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let plan = plan_merge(&objects, &states).unwrap().expect("plan");
        let frames: Vec<(u64, bool)> = plan
            .track
            .shapes
            .iter()
            .map(|s| (s.frame, s.outside))
            .collect();
        assert_eq!(frames, vec![(3, false), (4, false), (5, true)]);
    }

    #[test]
    fn test_earlier_keyframe_keeps_later_twin_slot() {
        // frame 4 is already visible when frame 3 is added, so 3 gets no twin
        let objects = index(vec![shape(1, 4, "no"), shape(2, 3, "no")]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let plan = plan_merge(&objects, &states).unwrap().expect("plan");
        let frames: Vec<(u64, bool)> = plan
            .track
            .shapes
            .iter()
            .map(|s| (s.frame, s.outside))
            .collect();
        assert_eq!(frames, vec![(3, false), (4, false), (5, true)]);
    }

    #[test]
    fn test_same_frame_shapes_conflict() {
        let objects = index(vec![shape(1, 3, "no"), shape(2, 3, "no")]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let err = plan_merge(&objects, &states).unwrap_err();
        assert!(err.is_argument_error());
        assert!(err.to_string().contains("only one visible shape per frame"));
    }

    #[test]
    fn test_track_outside_on_visible_frame_is_dropped() {
        let objects = index(vec![
            shape(1, 4, "no"),
            track(2, &[(0, false, None), (4, true, None)]),
        ]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let plan = plan_merge(&objects, &states).unwrap().expect("plan");
        let at_four = plan.track.shapes.iter().find(|s| s.frame == 4).unwrap();
        assert!(!at_four.outside);
    }

    #[test]
    fn test_track_visible_on_visible_frame_conflicts() {
        let objects = index(vec![shape(1, 4, "no"), track(2, &[(4, false, None)])]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let err = plan_merge(&objects, &states).unwrap_err();
        assert!(err.is_argument_error());
    }

    #[test]
    fn test_track_attributes_store_only_changes() {
        let objects = index(vec![track(
            1,
            &[
                (0, false, Some("no")),
                (2, false, Some("no")),
                (4, false, Some("yes")),
            ],
        )]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let plan = plan_merge(&objects, &states).unwrap().expect("plan");
        let attrs: Vec<usize> = plan
            .track
            .shapes
            .iter()
            .map(|s| s.attributes.len())
            .collect();
        assert_eq!(attrs, vec![1, 0, 1]);
    }

    #[test]
    fn test_leading_outside_is_trimmed() {
        let objects = index(vec![track(1, &[(0, true, None), (2, false, None)])]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let plan = plan_merge(&objects, &states).unwrap().expect("plan");
        assert_eq!(plan.track.frame, 2);
        assert_eq!(plan.track.shapes.len(), 1);
    }

    #[test]
    fn test_all_outside_is_rejected() {
        let objects = index(vec![track(1, &[(0, true, None), (2, true, None)])]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let err = plan_merge(&objects, &states).unwrap_err();
        assert!(err.is_argument_error());
    }

    #[test]
    fn test_unsaved_object_is_rejected() {
        let objects = index(vec![shape(1, 0, "no")]);
        let mut state = state_of(&objects[&ClientId(1)]);
        state.client_id = ClientId(77);

        let err = plan_merge(&objects, &[state]).unwrap_err();
        assert!(err.to_string().contains("has not been saved"));
    }

    #[test]
    fn test_label_mismatch_is_rejected() {
        let objects = index(vec![shape(1, 0, "no"), shape(2, 5, "no")]);
        let mut states: Vec<ObjectState> = objects.values().map(state_of).collect();
        states[1].label = Label::new(2u64, "person");

        let err = plan_merge(&objects, &states).unwrap_err();
        assert!(err.to_string().contains("\"person\""));
    }

    #[test]
    fn test_shape_on_last_frame_has_no_twin() {
        let objects = index(vec![shape(1, 3, "no"), shape(2, u64::MAX, "yes")]);
        let states: Vec<ObjectState> = objects.values().map(state_of).collect();

        let plan = plan_merge(&objects, &states).unwrap().expect("plan");
        let frames: Vec<(u64, bool)> = plan
            .track
            .shapes
            .iter()
            .map(|s| (s.frame, s.outside))
            .collect();
        assert_eq!(frames, vec![(3, false), (4, true), (u64::MAX, false)]);
        assert_eq!(plan.track.frame, 3);
    }

    #[test]
    fn test_empty_input_plans_nothing() {
        let objects = index(vec![shape(1, 0, "no")]);
        assert!(plan_merge(&objects, &[]).unwrap().is_none());
    }

    #[test]
    fn test_state_object_type_is_reported() {
        let objects = index(vec![shape(1, 0, "no")]);
        assert_eq!(state_of(&objects[&ClientId(1)]).object_type, ObjectType::Shape);
    }
}
