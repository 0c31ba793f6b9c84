//! Stochastic box dropout.

use rand::{Rng, RngExt};
use tracing::debug;

use crate::error::BboxEvalError;

/// Default probability of dropping each box.
pub const DEFAULT_DROP_PROBABILITY: f64 = 0.5;

/// Validate a drop probability before sampling.
///
/// Values outside `[0, 1]` are accepted: anything below 0 keeps every item
/// and anything at or above 1 drops every item. Only NaN is rejected.
pub fn validate_drop_probability(drop_prob: f64) -> Result<(), BboxEvalError> {
    if drop_prob.is_nan() {
        return Err(BboxEvalError::invalid_range(
            "drop probability must be a number",
        ));
    }
    Ok(())
}

/// Randomly drops items, each with probability `drop_prob`.
///
/// Every item draws its own `u` from `[0, 1)` and is kept when
/// `drop_prob < u`, so the retention probability is `1 - drop_prob`. Each
/// item is tested even when the outcome is certain. The input is left
/// untouched and kept items appear in input order.
///
/// # Example
///
/// ```
/// use bboxeval::geometry::BBox;
/// use bboxeval::sample::sample_keep;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let boxes = vec![BBox::new(0.0, 0.0, 5.0, 5.0); 4];
/// let mut rng = StdRng::seed_from_u64(42);
/// let kept = sample_keep(&boxes, 0.0, &mut rng).unwrap();
/// assert_eq!(kept.len(), 4);
/// ```
pub fn sample_keep<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    drop_prob: f64,
    rng: &mut R,
) -> Result<Vec<T>, BboxEvalError> {
    validate_drop_probability(drop_prob)?;

    let kept: Vec<T> = items
        .iter()
        .filter(|_| drop_prob < rng.random::<f64>())
        .cloned()
        .collect();

    debug!(
        total = items.len(),
        kept = kept.len(),
        drop_prob,
        "sampled boxes"
    );

    Ok(kept)
}
