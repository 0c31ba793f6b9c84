//! Image extent used as the clamp boundary for box perturbation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BboxEvalError;

/// The `(height, width)` of an image in pixels.
///
/// Valid coordinates lie in `[0, height]` vertically and `[0, width]`
/// horizontally. Both ends are inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageExtent {
    pub height: f64,
    pub width: f64,
}

impl ImageExtent {
    #[inline]
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }

    /// Returns true if `y` lies within `[0, height]`.
    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        !(y < 0.0 || self.height < y)
    }

    /// Returns true if `x` lies within `[0, width]`.
    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        !(x < 0.0 || self.width < x)
    }
}

impl fmt::Display for ImageExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Parses `"HEIGHTxWIDTH"` or `"HEIGHT,WIDTH"`.
impl FromStr for ImageExtent {
    type Err = BboxEvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, w) = s
            .split_once(['x', 'X', ','])
            .ok_or_else(|| {
                BboxEvalError::InvalidArgument(format!(
                    "expected HEIGHTxWIDTH for image extent, got '{}'",
                    s
                ))
            })?;

        let parse = |part: &str| -> Result<f64, BboxEvalError> {
            let value = part.trim().parse::<f64>().map_err(|_| {
                BboxEvalError::InvalidArgument(format!(
                    "'{}' is not a number in image extent '{}'",
                    part.trim(),
                    s
                ))
            })?;
            if !value.is_finite() {
                return Err(BboxEvalError::InvalidArgument(format!(
                    "image extent dimensions must be finite, got '{}'",
                    s
                )));
            }
            Ok(value)
        };

        Ok(Self::new(parse(h)?, parse(w)?))
    }
}
