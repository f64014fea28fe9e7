//! Arbitrary upload payloads must be rejected with an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use signseq_augment::mirror_sequence;
use signseq_core::{Capture, SEQUENCE_SHAPE};
use signseq_features::normalize_sequence;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(capture) = Capture::from_json(text) else {
        return;
    };
    if let Ok(seq) = normalize_sequence(&capture.frames) {
        assert_eq!(seq.shape(), SEQUENCE_SHAPE);
        assert!(seq.is_finite());
        let _ = mirror_sequence(&seq);
    }
});
