//! The annotation collection.
//!
//! A [`Collection`] owns every annotation object of a job. Objects live in
//! a single identity index keyed by client id; the frame indices and the
//! track list only hold client ids, so an object is never owned twice.
//!
//! # Example
//!
//! ```
//! use framelabel::collection::Collection;
//! use framelabel::model::{AnnotationPayload, Label, ShapeData};
//!
//! let mut collection = Collection::new(vec![Label::new(1u64, "car")]);
//! let payload = AnnotationPayload {
//!     shapes: vec![ShapeData {
//!         id: None,
//!         shape_type: "rectangle".into(),
//!         frame: 0,
//!         label_id: 1u64.into(),
//!         group: 0,
//!         occluded: false,
//!         z_order: Some(0),
//!         points: vec![0.0, 0.0, 10.0, 10.0],
//!         attributes: vec![],
//!     }],
//!     ..Default::default()
//! };
//!
//! collection.import(&payload).unwrap();
//! assert_eq!(collection.get(0).len(), 1);
//! assert_eq!(collection.export(), payload);
//! ```

pub mod factory;
mod merge;
mod z_index;

pub use factory::{create_shape, create_tag, create_track, Injection};
pub use z_index::{ZBounds, ZIndex};

use std::collections::BTreeMap;

use crate::error::FramelabelError;
use crate::model::{AnnotationPayload, ClientId, Label, LabelTable};
use crate::objects::{AnnotationObject, ObjectState};

/// All annotation objects of a job, indexed by frame and by client id.
#[derive(Debug, Default)]
pub struct Collection {
    labels: LabelTable,
    shapes: BTreeMap<u64, Vec<ClientId>>,
    tags: BTreeMap<u64, Vec<ClientId>>,
    tracks: Vec<ClientId>,
    objects: BTreeMap<ClientId, AnnotationObject>,
    count: u64,
    flush: bool,
    z_index: ZIndex,
}

impl Collection {
    /// Creates an empty collection over a fixed label list.
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        Self {
            labels: LabelTable::new(labels),
            ..Default::default()
        }
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Imports tags, then shapes, then tracks, giving each the next client id.
    ///
    /// Tracks without shapes are skipped with a warning. Import is
    /// all-or-nothing: if any item fails to construct, nothing is added.
    ///
    /// # Errors
    /// Returns [`FramelabelError::Data`] for an unknown shape type or label.
    pub fn import(&mut self, data: &AnnotationPayload) -> Result<&mut Self, FramelabelError> {
        let mut staged = Vec::with_capacity(data.len());
        let mut z_index = self.z_index.clone();
        let mut count = self.count;

        for tag in &data.tags {
            count += 1;
            let injection = Injection {
                labels: &self.labels,
                z_index: &z_index,
            };
            staged.push(AnnotationObject::Tag(create_tag(
                tag,
                ClientId(count),
                &injection,
            )?));
        }

        for shape in &data.shapes {
            count += 1;
            let injection = Injection {
                labels: &self.labels,
                z_index: &z_index,
            };
            let shape = create_shape(shape, ClientId(count), &injection)?;
            z_index.record(shape.frame, shape.z_order);
            staged.push(AnnotationObject::Shape(shape));
        }

        for track in &data.tracks {
            count += 1;
            let injection = Injection {
                labels: &self.labels,
                z_index: &z_index,
            };
            if let Some(track) = create_track(track, ClientId(count), &injection)? {
                staged.push(AnnotationObject::Track(track));
            }
        }

        tracing::debug!(
            imported = staged.len(),
            skipped = data.len() - staged.len(),
            first_client_id = self.count + 1,
            "imported annotations"
        );

        self.count = count;
        for object in staged {
            self.insert(object);
        }
        Ok(self)
    }

    /// Serializes every non-removed object.
    ///
    /// Shapes and tags come out in frame order, tracks in creation order.
    pub fn export(&self) -> AnnotationPayload {
        let live = |id: &ClientId| self.objects.get(id).filter(|o| !o.is_removed());

        let mut data = AnnotationPayload::default();
        for object in self.tracks.iter().filter_map(live) {
            if let AnnotationObject::Track(track) = object {
                data.tracks.push(track.to_data());
            }
        }
        for object in self.shapes.values().flatten().filter_map(live) {
            if let AnnotationObject::Shape(shape) = object {
                data.shapes.push(shape.to_data());
            }
        }
        for object in self.tags.values().flatten().filter_map(live) {
            if let AnnotationObject::Tag(tag) = object {
                data.tags.push(tag.to_data());
            }
        }
        data
    }

    /// Drops every object and resets the client id counter.
    ///
    /// Sets the flush flag so that the next save is treated as a fresh load.
    pub fn empty(&mut self) {
        tracing::debug!(dropped = self.objects.len(), "emptied collection");

        self.shapes.clear();
        self.tags.clear();
        self.tracks.clear();
        self.objects.clear();
        self.z_index.clear();
        self.count = 0;
        self.flush = true;
    }

    /// True after [`empty`](Self::empty) until the flag is taken.
    pub fn needs_flush(&self) -> bool {
        self.flush
    }

    /// Returns the flush flag and clears it.
    pub fn take_flush(&mut self) -> bool {
        std::mem::take(&mut self.flush)
    }

    /// States of all visible objects at `frame`: tracks, then shapes, then tags.
    ///
    /// A track that is outside at `frame` is reported only when `frame` is
    /// one of its keyframes.
    pub fn get(&self, frame: u64) -> Vec<ObjectState> {
        let shapes = self.shapes.get(&frame).map(Vec::as_slice).unwrap_or(&[]);
        let tags = self.tags.get(&frame).map(Vec::as_slice).unwrap_or(&[]);

        let mut states = Vec::new();
        for id in self.tracks.iter().chain(shapes).chain(tags) {
            let Some(object) = self.objects.get(id).filter(|o| !o.is_removed()) else {
                continue;
            };
            let Some(label) = self.labels.get(object.label_id()) else {
                continue;
            };

            let data = object.get(frame);
            if data.outside && !data.keyframe {
                continue;
            }
            states.push(ObjectState::new(object, label, data));
        }
        states
    }

    /// Merges the objects behind `states` into one new track.
    ///
    /// The new track takes the next client id and every merged object is
    /// tombstoned. Empty input does nothing and returns `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`FramelabelError::Argument`] if a state refers to an
    /// unknown object, labels or shape types differ, a tag is included, two
    /// visible keyframes land on the same frame, or nothing visible remains.
    /// The collection is unchanged on error.
    pub fn merge(&mut self, states: &[ObjectState]) -> Result<Option<ClientId>, FramelabelError> {
        let Some(plan) = merge::plan_merge(&self.objects, states)? else {
            return Ok(None);
        };

        let client_id = ClientId(self.count + 1);
        let injection = Injection {
            labels: &self.labels,
            z_index: &self.z_index,
        };
        let track = create_track(&plan.track, client_id, &injection)?.ok_or_else(|| {
            FramelabelError::Argument("merged objects have no keyframes".to_string())
        })?;

        self.count += 1;
        self.insert(AnnotationObject::Track(track));
        for id in &plan.sources {
            if let Some(object) = self.objects.get_mut(id) {
                object.set_removed(true);
            }
        }

        tracing::debug!(
            client_id = client_id.as_u64(),
            merged = plan.sources.len(),
            keyframes = plan.track.shapes.len(),
            "merged objects into track"
        );
        Ok(Some(client_id))
    }

    /// Splits a track at the state's frame.
    ///
    /// Not implemented yet: the call is accepted and changes nothing.
    pub fn split(&mut self, state: &ObjectState) -> Result<(), FramelabelError> {
        tracing::debug!(client_id = state.client_id.as_u64(), "split is a no-op");
        Ok(())
    }

    /// Groups the objects behind `states`.
    ///
    /// Not implemented yet: the call is accepted and changes nothing.
    pub fn group(&mut self, states: &[ObjectState]) -> Result<(), FramelabelError> {
        tracing::debug!(objects = states.len(), "group is a no-op");
        Ok(())
    }

    /// Looks up an object by client id, including tombstoned ones.
    pub fn object(&self, client_id: ClientId) -> Option<&AnnotationObject> {
        self.objects.get(&client_id)
    }

    /// Mutable access to an object.
    ///
    /// Frame indices are not rebuilt: moving a shape or tag to another
    /// frame through this handle leaves it indexed under its old frame.
    pub fn object_mut(&mut self, client_id: ClientId) -> Option<&mut AnnotationObject> {
        self.objects.get_mut(&client_id)
    }

    /// Iterates all objects, tombstoned ones included, in client id order.
    pub fn objects(&self) -> impl Iterator<Item = &AnnotationObject> {
        self.objects.values()
    }

    /// Number of objects that are not tombstoned.
    pub fn len(&self) -> usize {
        self.objects.values().filter(|o| !o.is_removed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Z-order bounds of `frame` over shapes and track keyframes.
    pub fn z_bounds(&self, frame: u64) -> Option<ZBounds> {
        self.z_index.bounds(frame)
    }

    fn insert(&mut self, object: AnnotationObject) {
        let id = object.client_id();
        match &object {
            AnnotationObject::Shape(shape) => {
                self.z_index.record(shape.frame, shape.z_order);
                self.shapes.entry(shape.frame).or_default().push(id);
            }
            AnnotationObject::Track(track) => {
                for record in track.keyframes().values() {
                    self.z_index.record(record.frame, record.z_order);
                }
                self.tracks.push(id);
            }
            AnnotationObject::Tag(tag) => {
                self.tags.entry(tag.frame).or_default().push(id);
            }
        }
        self.objects.insert(id, object);
    }
}
