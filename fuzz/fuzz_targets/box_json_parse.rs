//! Fuzz target for box-list JSON parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the box JSON parser and
//! runs IoU over whatever parses, checking for panics, crashes, or hangs.

#![no_main]

use bboxeval::geometry::iou;
use bboxeval::io_json::from_json_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(boxes) = from_json_slice(data) {
        for pair in boxes.windows(2) {
            let _ = iou(&pair[0], &pair[1]);
        }
    }
});
