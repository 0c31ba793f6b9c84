//! Batch jitter of bounding boxes for robustness testing.
//!
//! A single call draws ONE position offset and ONE size offset and applies
//! them to every box in the collection. This simulates a detector (or an
//! annotator) that is consistently off by a few pixels, rather than
//! independent per-box noise.
//!
//! Moves that would leave the image are skipped, never reported as errors:
//!
//! - position moves shift both endpoints of an axis together and are skipped
//!   for that axis if either endpoint would leave the extent;
//! - size moves shift each of the four coordinates on its own and are
//!   skipped per coordinate.
//!
//! # Example
//!
//! ```
//! use bboxeval::geometry::{BBox, ImageExtent};
//! use bboxeval::perturb::{perturb_boxes, PerturbOptions};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut boxes = vec![BBox::new(10.0, 10.0, 20.0, 20.0)];
//! let extent = ImageExtent::new(100.0, 100.0);
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let offsets = perturb_boxes(&mut boxes, &extent, &PerturbOptions::default(), &mut rng).unwrap();
//! assert!(offsets.position.dy.abs() <= 5 && offsets.size.dx.abs() <= 5);
//! ```

use rand::{Rng, RngExt};
use tracing::{debug, trace};

use crate::error::BboxEvalError;
use crate::geometry::{BBox, ImageExtent};

/// Which factor bounds which draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FactorMapping {
    /// `position_factor` bounds the position draw and `size_factor` bounds
    /// the size draw.
    #[default]
    Direct,
    /// `size_factor` bounds the position draw and `position_factor` bounds
    /// the size draw. Kept for reproducing datasets generated with the
    /// legacy tooling.
    Swapped,
}

/// Perturbation options.
#[derive(Clone, Debug, PartialEq)]
pub struct PerturbOptions {
    /// Shift boxes as a whole.
    pub noise_position: bool,
    /// Offsets are drawn from `[-factor, factor)` after truncation to integers.
    pub position_factor: f64,
    /// Grow or shrink boxes by moving individual edges.
    pub noise_size: bool,
    pub size_factor: f64,
    pub factor_mapping: FactorMapping,
}

impl Default for PerturbOptions {
    fn default() -> Self {
        Self {
            noise_position: true,
            position_factor: 5.0,
            noise_size: true,
            size_factor: 5.0,
            factor_mapping: FactorMapping::Direct,
        }
    }
}

impl PerturbOptions {
    /// Returns the factors bounding the (position, size) draws.
    pub fn effective_factors(&self) -> (f64, f64) {
        match self.factor_mapping {
            FactorMapping::Direct => (self.position_factor, self.size_factor),
            FactorMapping::Swapped => (self.size_factor, self.position_factor),
        }
    }
}

/// An integer pixel offset along both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Offset {
    pub dy: i64,
    pub dx: i64,
}

impl Offset {
    pub fn new(dy: i64, dx: i64) -> Self {
        Self { dy, dx }
    }
}

/// The offsets drawn for one perturbation call, shared by every box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JitterOffsets {
    pub position: Offset,
    pub size: Offset,
}

impl JitterOffsets {
    pub fn new(position: Offset, size: Offset) -> Self {
        Self { position, size }
    }

    /// Applies these offsets to a single box, clamped to `extent`.
    ///
    /// Order: vertical position, horizontal position, then size on `top`,
    /// `bottom`, `left`, `right`. Each step sees the result of the previous
    /// one.
    pub fn apply(&self, bbox: &mut BBox, extent: &ImageExtent) {
        let dy = self.position.dy as f64;
        if extent.contains_y(bbox.top + dy) && extent.contains_y(bbox.bottom + dy) {
            bbox.top += dy;
            bbox.bottom += dy;
        } else {
            trace!(?bbox, dy, "vertical position move out of bounds, skipped");
        }

        let dx = self.position.dx as f64;
        if extent.contains_x(bbox.left + dx) && extent.contains_x(bbox.right + dx) {
            bbox.left += dx;
            bbox.right += dx;
        } else {
            trace!(?bbox, dx, "horizontal position move out of bounds, skipped");
        }

        let sy = self.size.dy as f64;
        for (name, edge) in [("top", &mut bbox.top), ("bottom", &mut bbox.bottom)] {
            if extent.contains_y(*edge + sy) {
                *edge += sy;
            } else {
                trace!(edge = name, value = *edge, sy, "size move out of bounds, skipped");
            }
        }

        let sx = self.size.dx as f64;
        for (name, edge) in [("left", &mut bbox.left), ("right", &mut bbox.right)] {
            if extent.contains_x(*edge + sx) {
                *edge += sx;
            } else {
                trace!(edge = name, value = *edge, sx, "size move out of bounds, skipped");
            }
        }
    }
}

/// Converts a noise factor to the half-open integer range `[low, high)`.
fn factor_range(factor: f64, name: &str) -> Result<(i64, i64), BboxEvalError> {
    if !factor.is_finite() {
        return Err(BboxEvalError::invalid_range(format!(
            "{} factor must be finite, got {}",
            name, factor
        )));
    }

    let low = (-factor).trunc() as i64;
    let high = factor.trunc() as i64;
    if low >= high {
        return Err(BboxEvalError::invalid_range(format!(
            "{} factor {} gives an empty offset range [{}, {})",
            name, factor, low, high
        )));
    }

    Ok((low, high))
}

fn draw_offset<R: Rng + ?Sized>(
    enabled: bool,
    factor: f64,
    name: &str,
    rng: &mut R,
) -> Result<Offset, BboxEvalError> {
    if !enabled {
        return Ok(Offset::default());
    }

    let (low, high) = factor_range(factor, name)?;
    let dy = rng.random_range(low..high);
    let dx = rng.random_range(low..high);
    Ok(Offset::new(dy, dx))
}

/// Draws the shared offsets for one perturbation call.
///
/// The position offset is drawn first, then the size offset, each as
/// `(dy, dx)`. A disabled noise kind yields a zero offset and consumes no
/// randomness.
///
/// # Errors
///
/// Returns [`BboxEvalError::InvalidRange`] when an enabled noise kind has a
/// factor that is not finite or whose truncated range `[-f, f)` is empty.
pub fn draw_offsets<R: Rng + ?Sized>(
    opts: &PerturbOptions,
    rng: &mut R,
) -> Result<JitterOffsets, BboxEvalError> {
    let (position_factor, size_factor) = opts.effective_factors();

    let position = draw_offset(opts.noise_position, position_factor, "position", rng)?;
    let size = draw_offset(opts.noise_size, size_factor, "size", rng)?;

    Ok(JitterOffsets::new(position, size))
}

/// Jitters `boxes` in place and returns the offsets that were applied.
///
/// The caller's boxes are mutated; use [`perturbed`] to keep the input
/// intact. Nothing is modified if drawing the offsets fails.
pub fn perturb_boxes<R: Rng + ?Sized>(
    boxes: &mut [BBox],
    extent: &ImageExtent,
    opts: &PerturbOptions,
    rng: &mut R,
) -> Result<JitterOffsets, BboxEvalError> {
    let offsets = draw_offsets(opts, rng)?;
    debug!(
        boxes = boxes.len(),
        %extent,
        ?offsets,
        mapping = ?opts.factor_mapping,
        "perturbing boxes"
    );

    for bbox in boxes.iter_mut() {
        offsets.apply(bbox, extent);
    }

    Ok(offsets)
}

/// Returns a jittered copy of `boxes` along with the applied offsets.
pub fn perturbed<R: Rng + ?Sized>(
    boxes: &[BBox],
    extent: &ImageExtent,
    opts: &PerturbOptions,
    rng: &mut R,
) -> Result<(Vec<BBox>, JitterOffsets), BboxEvalError> {
    let mut out = boxes.to_vec();
    let offsets = perturb_boxes(&mut out, extent, opts, rng)?;
    Ok((out, offsets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn extent() -> ImageExtent {
        ImageExtent::new(100.0, 200.0)
    }

    #[test]
    fn in_bounds_boxes_share_position_offset() {
        let offsets = JitterOffsets::new(Offset::new(3, -4), Offset::default());
        let mut a = BBox::new(10.0, 10.0, 20.0, 20.0);
        let mut b = BBox::new(50.0, 60.0, 70.0, 90.0);
        offsets.apply(&mut a, &extent());
        offsets.apply(&mut b, &extent());
        assert_eq!(a, BBox::new(13.0, 6.0, 23.0, 16.0));
        assert_eq!(b, BBox::new(53.0, 56.0, 73.0, 86.0));
    }

    #[test]
    fn position_move_is_all_or_nothing_per_axis() {
        // bottom + 5 = 102 > 100, so the vertical move is skipped entirely;
        // the horizontal move still happens.
        let offsets = JitterOffsets::new(Offset::new(5, 5), Offset::default());
        let mut bbox = BBox::new(90.0, 10.0, 97.0, 20.0);
        offsets.apply(&mut bbox, &extent());
        assert_eq!(bbox, BBox::new(90.0, 15.0, 97.0, 25.0));
    }

    #[test]
    fn position_move_to_exact_edge_is_allowed() {
        let offsets = JitterOffsets::new(Offset::new(-10, 0), Offset::default());
        let mut bbox = BBox::new(10.0, 0.0, 100.0, 200.0);
        offsets.apply(&mut bbox, &extent());
        assert_eq!(bbox, BBox::new(0.0, 0.0, 90.0, 200.0));
    }

    #[test]
    fn size_move_is_per_coordinate() {
        // top - 3 = -1 is rejected, bottom - 3 = 47 is accepted.
        let offsets = JitterOffsets::new(Offset::default(), Offset::new(-3, 4));
        let mut bbox = BBox::new(2.0, 190.0, 50.0, 198.0);
        offsets.apply(&mut bbox, &extent());
        // left + 4 = 194 accepted, right + 4 = 202 rejected.
        assert_eq!(bbox, BBox::new(2.0, 194.0, 47.0, 198.0));
    }

    #[test]
    fn size_applies_after_position() {
        let offsets = JitterOffsets::new(Offset::new(2, 0), Offset::new(1, 0));
        let mut bbox = BBox::new(96.0, 0.0, 97.0, 10.0);
        // Position: 98/99 in bounds. Size: top 99 ok, bottom 100 ok.
        offsets.apply(&mut bbox, &extent());
        assert_eq!(bbox, BBox::new(99.0, 0.0, 100.0, 10.0));
    }

    #[test]
    fn zero_extent_rejects_every_move() {
        let offsets = JitterOffsets::new(Offset::new(1, -1), Offset::new(2, 2));
        let zero = ImageExtent::new(0.0, 0.0);
        let mut bbox = BBox::new(0.0, 0.0, 0.0, 0.0);
        offsets.apply(&mut bbox, &zero);
        assert_eq!(bbox, BBox::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn disabled_noise_draws_nothing() {
        let opts = PerturbOptions {
            noise_position: false,
            noise_size: false,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let offsets = draw_offsets(&opts, &mut rng).unwrap();
        assert_eq!(offsets, JitterOffsets::default());
    }

    #[test]
    fn disabled_noise_ignores_bad_factor() {
        let opts = PerturbOptions {
            noise_position: false,
            position_factor: -1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(draw_offsets(&opts, &mut rng).is_ok());
    }

    #[test]
    fn offsets_stay_within_factor_range() {
        let opts = PerturbOptions {
            position_factor: 3.0,
            size_factor: 1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let offsets = draw_offsets(&opts, &mut rng).unwrap();
            assert!((-3..3).contains(&offsets.position.dy));
            assert!((-3..3).contains(&offsets.position.dx));
            // [-1, 1) only contains -1 and 0.
            assert!((-1..1).contains(&offsets.size.dy));
            assert!((-1..1).contains(&offsets.size.dx));
        }
    }

    #[test]
    fn swapped_mapping_exchanges_factors() {
        let opts = PerturbOptions {
            position_factor: 1.0,
            size_factor: 50.0,
            factor_mapping: FactorMapping::Swapped,
            ..Default::default()
        };
        assert_eq!(opts.effective_factors(), (50.0, 1.0));

        let mut rng = StdRng::seed_from_u64(5);
        let mut wide_position_draw = false;
        for _ in 0..200 {
            let offsets = draw_offsets(&opts, &mut rng).unwrap();
            assert!((-50..50).contains(&offsets.position.dy));
            assert!((-50..50).contains(&offsets.position.dx));
            assert!((-1..1).contains(&offsets.size.dy));
            assert!((-1..1).contains(&offsets.size.dx));
            wide_position_draw |= !(-1..1).contains(&offsets.position.dy)
                || !(-1..1).contains(&offsets.position.dx);
        }
        assert!(wide_position_draw, "position draw never used the size factor");
    }

    #[test]
    fn swapped_mapping_matches_direct_with_exchanged_factors() {
        let swapped = PerturbOptions {
            position_factor: 2.0,
            size_factor: 9.0,
            factor_mapping: FactorMapping::Swapped,
            ..Default::default()
        };
        let direct = PerturbOptions {
            position_factor: 9.0,
            size_factor: 2.0,
            factor_mapping: FactorMapping::Direct,
            ..Default::default()
        };

        for seed in 0..20 {
            let a = draw_offsets(&swapped, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = draw_offsets(&direct, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn out_of_bounds_size_move_leaves_edge_only() {
        let offsets = JitterOffsets::new(Offset::default(), Offset::new(-5, 5));
        let mut bbox = BBox::new(3.0, 10.0, 40.0, 197.0);
        offsets.apply(&mut bbox, &extent());
        // top (-2) and right (202) are skipped, bottom and left move.
        assert_eq!(bbox, BBox::new(3.0, 15.0, 35.0, 197.0));
    }

    #[test]
    fn invalid_factors_fail() {
        let mut rng = StdRng::seed_from_u64(0);
        for factor in [0.0, -2.0, 0.5, f64::NAN, f64::INFINITY] {
            let opts = PerturbOptions {
                position_factor: factor,
                ..Default::default()
            };
            assert!(
                matches!(
                    draw_offsets(&opts, &mut rng),
                    Err(BboxEvalError::InvalidRange { .. })
                ),
                "factor {} should be rejected",
                factor
            );
        }
    }

    #[test]
    fn failed_draw_leaves_boxes_untouched() {
        let opts = PerturbOptions {
            size_factor: 0.0,
            ..Default::default()
        };
        let original = vec![BBox::new(10.0, 10.0, 20.0, 20.0)];
        let mut boxes = original.clone();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(perturb_boxes(&mut boxes, &extent(), &opts, &mut rng).is_err());
        assert_eq!(boxes, original);
    }

    #[test]
    fn perturbed_keeps_input_and_matches_in_place() {
        let original = vec![
            BBox::new(10.0, 10.0, 20.0, 20.0),
            BBox::new(30.0, 40.0, 60.0, 80.0),
        ];

        let mut rng = StdRng::seed_from_u64(11);
        let (copy, offsets) =
            perturbed(&original, &extent(), &PerturbOptions::default(), &mut rng).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        let mut in_place = original.clone();
        let again =
            perturb_boxes(&mut in_place, &extent(), &PerturbOptions::default(), &mut rng).unwrap();

        assert_eq!(offsets, again);
        assert_eq!(copy, in_place);
        assert_eq!(original[0], BBox::new(10.0, 10.0, 20.0, 20.0));
    }
}
