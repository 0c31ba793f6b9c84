//! Ranking-quality metrics: precision, recall, and average precision at k.
//!
//! The ranking metrics compare an ordered list of predicted items against an
//! unordered collection of actual items. Items only need `PartialEq`, so they
//! work for labels, identifiers, or any other comparable value.

use tracing::trace;

use crate::error::BboxEvalError;

/// Default cutoff for [`average_precision_at_k`] and
/// [`mean_average_precision_at_k`].
pub const DEFAULT_K: usize = 10;

/// Computes precision, `tp / (tp + fp)`.
///
/// # Errors
///
/// Returns [`BboxEvalError::DivisionByZero`] when `tp + fp == 0` and
/// [`BboxEvalError::InvalidRange`] when the sum overflows `usize`.
pub fn precision(tp: usize, fp: usize) -> Result<f64, BboxEvalError> {
    ratio(tp, fp, "precision")
}

/// Computes recall, `tp / (tp + fn)`.
///
/// # Errors
///
/// Returns [`BboxEvalError::DivisionByZero`] when `tp + fn == 0` and
/// [`BboxEvalError::InvalidRange`] when the sum overflows `usize`.
pub fn recall(tp: usize, false_negatives: usize) -> Result<f64, BboxEvalError> {
    ratio(tp, false_negatives, "recall")
}

/// `numerator / (numerator + other)`.
fn ratio(numerator: usize, other: usize, operation: &'static str) -> Result<f64, BboxEvalError> {
    let denominator = numerator.checked_add(other).ok_or_else(|| {
        BboxEvalError::invalid_range(format!(
            "{} counts {} + {} overflow",
            operation, numerator, other
        ))
    })?;
    if denominator == 0 {
        return Err(BboxEvalError::DivisionByZero { operation });
    }
    Ok(numerator as f64 / denominator as f64)
}

fn validate_k(k: usize) -> Result<(), BboxEvalError> {
    if k == 0 {
        return Err(BboxEvalError::invalid_range("k must be greater than 0"));
    }
    Ok(())
}

/// Computes the average precision at `k` of a ranked prediction list.
///
/// Only the first `k` predictions are considered. A prediction earns credit
/// when it is in `actual` and has not already appeared earlier in the
/// (truncated) prediction list, so repeated predictions score once. Each hit
/// at 0-based rank `i` adds `hits / (i + 1)`; the total is divided by
/// `min(actual.len(), k)`.
///
/// An empty `actual` yields `0.0` regardless of `predicted`.
///
/// # Errors
///
/// Returns [`BboxEvalError::InvalidRange`] when `k == 0`.
///
/// # Example
///
/// ```
/// use bboxeval::metrics::average_precision_at_k;
///
/// let ap = average_precision_at_k(&["a"], &["b", "a"], 10).unwrap();
/// assert_eq!(ap, 0.5);
/// ```
pub fn average_precision_at_k<T: PartialEq>(
    actual: &[T],
    predicted: &[T],
    k: usize,
) -> Result<f64, BboxEvalError> {
    validate_k(k)?;

    if actual.is_empty() {
        return Ok(0.0);
    }

    let predicted = &predicted[..predicted.len().min(k)];

    let mut score = 0.0;
    let mut num_hits = 0.0;

    for (i, p) in predicted.iter().enumerate() {
        if actual.contains(p) && !predicted[..i].contains(p) {
            num_hits += 1.0;
            score += num_hits / (i as f64 + 1.0);
        }
    }

    trace!(hits = num_hits, score, k, "average precision at k");

    Ok(score / actual.len().min(k) as f64)
}

/// Computes the mean of [`average_precision_at_k`] over paired lists.
///
/// `actual` and `predicted` are zipped element-wise; extra lists in the longer
/// of the two are ignored.
///
/// # Errors
///
/// Returns [`BboxEvalError::InvalidRange`] when `k == 0` or when there are no
/// pairs to average.
pub fn mean_average_precision_at_k<A, P, T>(
    actual: &[A],
    predicted: &[P],
    k: usize,
) -> Result<f64, BboxEvalError>
where
    A: AsRef<[T]>,
    P: AsRef<[T]>,
    T: PartialEq,
{
    validate_k(k)?;

    let scores = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| average_precision_at_k(a.as_ref(), p.as_ref(), k))
        .collect::<Result<Vec<f64>, _>>()?;

    if scores.is_empty() {
        return Err(BboxEvalError::invalid_range(
            "mean average precision needs at least one actual/predicted pair",
        ));
    }

    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}
