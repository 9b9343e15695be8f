// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed segments and their identifiers.

use core::fmt;

use kurbo::Point;
use scribe_index::{Aabb2D, Key};

use crate::geometry::Stroke;

/// Identifier of a committed segment.
///
/// Ids are handed out in creation order starting at 0. Ascending id order is
/// the draw order, so later strokes paint over earlier ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub u32);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable, committed piece of a stroke.
///
/// The cached bounding box is computed once when the segment is created. The
/// `leaf` key only addresses the segment's entry in the spatial index; the
/// index owns that entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    id: SegmentId,
    stroke: Stroke,
    aabb: Aabb2D<f64>,
    leaf: Key,
}

impl Segment {
    pub(crate) fn new(id: SegmentId, stroke: Stroke, aabb: Aabb2D<f64>, leaf: Key) -> Self {
        Self {
            id,
            stroke,
            aabb,
            leaf,
        }
    }

    /// The segment's id.
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// First endpoint.
    pub fn a(&self) -> Point {
        self.stroke.a
    }

    /// Second endpoint.
    pub fn b(&self) -> Point {
        self.stroke.b
    }

    /// Half-thickness in world units.
    pub fn radius(&self) -> f64 {
        self.stroke.radius
    }

    /// The geometry as a [`Stroke`] value.
    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    /// Bounding box cached at creation.
    pub fn aabb(&self) -> Aabb2D<f64> {
        self.aabb
    }

    /// Handle of this segment's entry in the spatial index.
    pub fn leaf(&self) -> Key {
        self.leaf
    }
}
