#![allow(dead_code)]

use bboxeval::geometry::{BBox, ImageExtent};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

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

/// Integer-valued, properly ordered box anywhere in `[0, 1000]`.
pub fn arb_bbox() -> BoxedStrategy<BBox> {
    (0u32..=1000, 0u32..=1000, 0u32..=1000, 0u32..=1000)
        .prop_map(|(y0, x0, y1, x1)| {
            BBox::new(
                y0.min(y1) as f64,
                x0.min(x1) as f64,
                y0.max(y1) as f64,
                x0.max(x1) as f64,
            )
        })
        .boxed()
}

/// Integer-valued, properly ordered box inside `extent`.
pub fn arb_bbox_within(extent: ImageExtent) -> BoxedStrategy<BBox> {
    let h = extent.height as u32;
    let w = extent.width as u32;
    (0u32..=h, 0u32..=w, 0u32..=h, 0u32..=w)
        .prop_map(|(y0, x0, y1, x1)| {
            BBox::new(
                y0.min(y1) as f64,
                x0.min(x1) as f64,
                y0.max(y1) as f64,
                x0.max(x1) as f64,
            )
        })
        .boxed()
}

pub fn arb_extent() -> BoxedStrategy<ImageExtent> {
    (1u32..=2048, 1u32..=2048)
        .prop_map(|(h, w)| ImageExtent::new(h as f64, w as f64))
        .boxed()
}

/// Short labels from a small alphabet so hits and duplicates are common.
pub fn arb_label_list(max_len: usize) -> BoxedStrategy<Vec<char>> {
    let alphabet = vec!['a', 'b', 'c', 'd', 'e', 'f'];
    proptest::collection::vec(prop::sample::select(alphabet), 0..=max_len).boxed()
}
