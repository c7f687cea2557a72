//! Fuzz target for session JSON parsing and import.
//!
//! Arbitrary bytes are parsed as a session; whatever parses is imported
//! into a collection, queried on every keyframe, and exported again,
//! checking for panics, crashes, or hangs.

#![no_main]

use framelabel::collection::Collection;
use framelabel::model::io_json::from_json_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(session) = from_json_slice(data) else {
        return;
    };

    let mut collection = Collection::new(session.labels.iter().cloned());
    if collection.import(&session.annotations).is_err() {
        return;
    }

    let frames: Vec<u64> = session
        .annotations
        .shapes
        .iter()
        .map(|s| s.frame)
        .chain(session.annotations.tracks.iter().flat_map(|t| t.shapes.iter().map(|s| s.frame)))
        .take(256)
        .collect();
    for frame in frames {
        let _ = collection.get(frame);
    }

    let _ = collection.export();
});
