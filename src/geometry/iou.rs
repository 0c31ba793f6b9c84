//! Intersection over Union with inclusive pixel extents.

use super::BBox;
use crate::error::BboxEvalError;

/// Computes the intersection over union of two boxes.
///
/// Both boxes use inclusive extents, so a box spanning rows `0..=9` has a
/// height of 10. The intersection is clamped to zero when the boxes do not
/// overlap. The result is not clamped to `[0, 1]`: malformed boxes can
/// produce values outside that range.
///
/// # Errors
///
/// Returns [`BboxEvalError::DivisionByZero`] when the union is exactly zero,
/// which happens for two zero-area boxes that do not overlap.
///
/// # Example
///
/// ```
/// use bboxeval::geometry::{iou, BBox};
///
/// let a = BBox::new(0.0, 0.0, 9.0, 9.0);
/// let b = BBox::new(0.0, 5.0, 9.0, 14.0);
/// let value = iou(&a, &b).unwrap();
/// assert!((value - 50.0 / 150.0).abs() < 1e-12);
/// ```
pub fn iou(a: &BBox, b: &BBox) -> Result<f64, BboxEvalError> {
    let x_a = a.left.max(b.left);
    let y_a = a.top.max(b.top);
    let x_b = a.right.min(b.right);
    let y_b = a.bottom.min(b.bottom);

    let intersection = (x_b - x_a + 1.0).max(0.0) * (y_b - y_a + 1.0).max(0.0);
    let union = a.area() + b.area() - intersection;

    if union == 0.0 {
        return Err(BboxEvalError::DivisionByZero { operation: "iou" });
    }

    Ok(intersection / union)
}

/// Computes the IoU between every pair of boxes from two collections.
///
/// `result[i][j]` is the IoU between `a[i]` and `b[j]`. Fails on the first
/// pair whose union is zero.
pub fn iou_matrix(a: &[BBox], b: &[BBox]) -> Result<Vec<Vec<f64>>, BboxEvalError> {
    a.iter()
        .map(|box_a| b.iter().map(|box_b| iou(box_a, box_b)).collect())
        .collect()
}
