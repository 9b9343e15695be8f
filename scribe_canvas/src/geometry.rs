// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke geometry: capsule-shaped line pieces and their bounding boxes.

use kurbo::{Point, Rect};
use scribe_index::Aabb2D;

use crate::error::CanvasError;

/// A thick line piece: the set of points within `radius` of the segment `a`–`b`.
///
/// This is a plain value; use [`Stroke::validate`] before handing it to the store.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    /// First endpoint (world space).
    pub a: Point,
    /// Second endpoint (world space).
    pub b: Point,
    /// Half-thickness (world units).
    pub radius: f64,
}

impl Stroke {
    /// Create a stroke without validating it.
    pub const fn new(a: Point, b: Point, radius: f64) -> Self {
        Self { a, b, radius }
    }

    /// Reject non-finite endpoints, radii that are not finite and positive, and
    /// strokes whose bounding box overflows to infinity.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if !(self.a.is_finite() && self.b.is_finite()) {
            return Err(CanvasError::NonFinite);
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(CanvasError::InvalidRadius(self.radius));
        }
        if !self.bounds().is_finite() {
            return Err(CanvasError::NonFinite);
        }
        Ok(())
    }

    /// Bounding box of the endpoints grown by `radius` on every side.
    pub fn bounds(&self) -> Aabb2D<f64> {
        Aabb2D::new(
            self.a.x.min(self.b.x) - self.radius,
            self.a.y.min(self.b.y) - self.radius,
            self.a.x.max(self.b.x) + self.radius,
            self.a.y.max(self.b.y) + self.radius,
        )
    }
}

/// Convert a kurbo rectangle to an index box, normalizing flipped corners.
pub fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    let r = r.abs();
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

/// Convert an index box back to a kurbo rectangle.
pub fn aabb_to_rect(a: Aabb2D<f64>) -> Rect {
    Rect::new(a.min_x, a.min_y, a.max_x, a.max_y)
}
