//! Bounding box type in TLBR (top, left, bottom, right) order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BboxEvalError;

/// An axis-aligned bounding box in pixel space, stored as
/// `(top, left, bottom, right)`.
///
/// Extents are inclusive: a box with `top == bottom` and `left == right`
/// covers exactly one pixel, so [`height`](Self::height) and
/// [`width`](Self::width) add one to the coordinate difference.
///
/// Note: the constructor does NOT enforce `top <= bottom` or
/// `left <= right`. Malformed boxes can be represented and flow through
/// the metrics unchanged; [`is_ordered`](Self::is_ordered) reports them.
#[derive(Clone, Copy, PartialEq)]
pub struct BBox {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl BBox {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Creates a bounding box from a `[top, left, bottom, right]` row.
    #[inline]
    pub fn from_array(row: [f64; 4]) -> Self {
        let [top, left, bottom, right] = row;
        Self::new(top, left, bottom, right)
    }

    /// Returns the box as a `[top, left, bottom, right]` row.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.top, self.left, self.bottom, self.right]
    }

    /// Returns the inclusive height (`bottom - top + 1`).
    ///
    /// May be zero or negative if the box is malformed.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top + 1.0
    }

    /// Returns the inclusive width (`right - left + 1`).
    ///
    /// May be zero or negative if the box is malformed.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left + 1.0
    }

    /// Returns the inclusive pixel area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.height() * self.width()
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite()
    }

    /// Returns true if the box is properly ordered on both axes.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.top <= self.bottom && self.left <= self.right
    }

    /// Returns the box shifted by `dy` rows and `dx` columns.
    #[inline]
    pub fn translate(&self, dy: f64, dx: f64) -> Self {
        Self::new(
            self.top + dy,
            self.left + dx,
            self.bottom + dy,
            self.right + dx,
        )
    }
}

impl fmt::Debug for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BBox")
            .field("top", &self.top)
            .field("left", &self.left)
            .field("bottom", &self.bottom)
            .field("right", &self.right)
            .finish()
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.top, self.left, self.bottom, self.right
        )
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl From<[f64; 4]> for BBox {
    fn from(row: [f64; 4]) -> Self {
        Self::from_array(row)
    }
}

impl From<BBox> for [f64; 4] {
    fn from(bbox: BBox) -> Self {
        bbox.to_array()
    }
}

/// Parses `"top,left,bottom,right"`. Whitespace around each value is ignored.
impl FromStr for BBox {
    type Err = BboxEvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|_| {
                    BboxEvalError::InvalidArgument(format!(
                        "'{}' is not a number in box '{}'",
                        part.trim(),
                        s
                    ))
                })
            })
            .collect::<Result<_, _>>()?;

        match values.as_slice() {
            &[top, left, bottom, right] => Ok(Self::new(top, left, bottom, right)),
            _ => Err(BboxEvalError::InvalidArgument(format!(
                "expected 4 comma-separated values (top,left,bottom,right), got {} in '{}'",
                values.len(),
                s
            ))),
        }
    }
}

// Serialized as a plain 4-element array so box lists stay compact rows.
impl Serialize for BBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;
        let mut state = serializer.serialize_tuple(4)?;
        state.serialize_element(&self.top)?;
        state.serialize_element(&self.left)?;
        state.serialize_element(&self.bottom)?;
        state.serialize_element(&self.right)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for BBox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let row = <[f64; 4]>::deserialize(deserializer)?;
        Ok(BBox::from_array(row))
    }
}
