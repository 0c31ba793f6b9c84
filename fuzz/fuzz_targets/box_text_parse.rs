//! Fuzz target for `top,left,bottom,right` and `HxW` text parsing.
//!
//! This fuzzer feeds arbitrary UTF-8 strings to the CLI value parsers,
//! checking for panics, crashes, or hangs.

#![no_main]

use bboxeval::geometry::{BBox, ImageExtent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = text.parse::<BBox>();
    let _ = text.parse::<ImageExtent>();
});
