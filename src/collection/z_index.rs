//! Per-frame z-order bounds.

use std::collections::BTreeMap;

/// Lowest and highest z-order seen on a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZBounds {
    pub min: i32,
    pub max: i32,
}

/// Z-order bounds of every frame that holds a shape or a track keyframe.
#[derive(Clone, Debug, Default)]
pub struct ZIndex {
    frames: BTreeMap<u64, ZBounds>,
}

impl ZIndex {
    pub fn bounds(&self, frame: u64) -> Option<ZBounds> {
        self.frames.get(&frame).copied()
    }

    /// Z-order that places a new shape above everything on `frame`.
    pub fn next_on_top(&self, frame: u64) -> i32 {
        self.bounds(frame).map_or(0, |b| b.max.saturating_add(1))
    }

    pub fn record(&mut self, frame: u64, z_order: i32) {
        self.frames
            .entry(frame)
            .and_modify(|b| {
                b.min = b.min.min(z_order);
                b.max = b.max.max(z_order);
            })
            .or_insert(ZBounds {
                min: z_order,
                max: z_order,
            });
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
