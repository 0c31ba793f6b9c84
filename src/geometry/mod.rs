//! Box geometry: the TLBR box record, image extents, and overlap.
//!
//! All boxes live in pixel space with `(top, left, bottom, right)` ordering
//! and inclusive extents. This matches the row/column layout of image
//! arrays, where `top`/`bottom` index rows and `left`/`right` index columns.
//!
//! # Example
//!
//! ```
//! use bboxeval::geometry::{iou, BBox, ImageExtent};
//!
//! let truth = BBox::new(10.0, 10.0, 49.0, 49.0);
//! let guess = BBox::new(12.0, 10.0, 51.0, 49.0);
//! let overlap = iou(&truth, &guess).unwrap();
//! assert!(overlap > 0.9);
//!
//! let extent = ImageExtent::new(480.0, 640.0);
//! assert!(extent.contains_y(truth.bottom));
//! ```

mod bbox;
mod extent;
mod iou;

pub use bbox::BBox;
pub use extent::ImageExtent;
pub use iou::{iou, iou_matrix};
