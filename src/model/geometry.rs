//! Page-fraction geometry.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in normalized page coordinates (0.0 to 1.0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Distance from the top edge of the page
    pub top: f64,

    /// Distance from the left edge of the page
    pub left: f64,

    /// Box width as a fraction of page width
    pub width: f64,

    /// Box height as a fraction of page height
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Lower edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Check whether this box lies entirely inside `outer`.
    ///
    /// Edges may coincide. Comparisons are exact, no tolerance is applied.
    pub fn is_within(&self, outer: &BoundingBox) -> bool {
        self.top >= outer.top
            && self.left >= outer.left
            && self.bottom() <= outer.bottom()
            && self.right() <= outer.right()
    }
}

/// A horizontal strip of the page between two vertical positions.
///
/// A box belongs to the band when its top is at or below `top` and its
/// bottom edge is at or above `bottom`. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Upper bound
    pub top: f64,

    /// Lower bound
    pub bottom: f64,
}

impl Band {
    /// Create a band from `top` down to `bottom`.
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Check whether a box is vertically contained in this band.
    pub fn contains(&self, bbox: &BoundingBox) -> bool {
        bbox.top >= self.top && bbox.bottom() <= self.bottom
    }
}
