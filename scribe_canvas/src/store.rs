// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The segment store: id → segment records kept in sync with the spatial index.

use std::collections::BTreeMap;

use kurbo::Rect;
use scribe_index::Index;

use crate::error::CanvasError;
use crate::geometry::{Stroke, rect_to_aabb};
use crate::segment::{Segment, SegmentId};
use crate::undo::UndoStack;

/// Owns every committed [`Segment`], the spatial index over their boxes, and
/// the id counter used for undo.
///
/// This is the only place segments are created or destroyed, so the map, the
/// index and the counter always change together.
///
/// ```
/// use kurbo::{Point, Rect};
/// use scribe_canvas::{SegmentId, SegmentStore, Stroke};
///
/// let mut store = SegmentStore::new();
/// let id = store
///     .create(Stroke::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0))
///     .unwrap();
/// assert_eq!(id, SegmentId(0));
///
/// let seen: Vec<_> = store
///     .query_view(Rect::new(-5.0, -5.0, 5.0, 5.0))
///     .iter()
///     .map(|s| s.id())
///     .collect();
/// assert_eq!(seen, [SegmentId(0)]);
/// assert!(store.query_view(Rect::new(20.0, 20.0, 25.0, 25.0)).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct SegmentStore {
    segments: BTreeMap<SegmentId, Segment>,
    index: Index<f64, SegmentId>,
    ids: UndoStack,
}

impl SegmentStore {
    /// An empty store whose first segment will get id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segments are live.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The id the next [`create`](Self::create) will assign.
    pub fn next_id(&self) -> SegmentId {
        self.ids.next_id()
    }

    /// Height of the spatial index tree.
    pub fn index_height(&self) -> u32 {
        self.index.height()
    }

    /// Validate `stroke`, index its bounding box and store it under the next id.
    pub fn create(&mut self, stroke: Stroke) -> Result<SegmentId, CanvasError> {
        stroke.validate()?;
        let aabb = stroke.bounds();
        let id = self.ids.allocate();
        let leaf = self.index.insert(aabb, id);
        let _ = self
            .segments
            .insert(id, Segment::new(id, stroke, aabb, leaf));
        log::debug!("created segment {id} with bounds {aabb:?}");
        Ok(id)
    }

    /// Remove the most recently created segment, which must be `id`.
    ///
    /// On success the id counter moves back so the next segment reuses `id`.
    /// Nothing changes on failure.
    pub fn remove_last(&mut self, id: SegmentId) -> Result<Segment, CanvasError> {
        let leaf = self
            .segments
            .get(&id)
            .ok_or(CanvasError::UnknownSegment(id))?
            .leaf();
        match self.ids.last() {
            Some(last) if last == id => {}
            Some(last) => {
                return Err(CanvasError::NotMostRecent {
                    requested: id,
                    last,
                });
            }
            None => return Err(CanvasError::UnknownSegment(id)),
        }
        let payload = self.index.remove(leaf).inspect_err(|e| {
            log::warn!("segment {id}: {e}");
        })?;
        debug_assert_eq!(payload, id, "index payload must match the segment id");
        let _ = self.ids.pop();
        let segment = self
            .segments
            .remove(&id)
            .ok_or(CanvasError::UnknownSegment(id))?;
        log::debug!("removed segment {id}");
        Ok(segment)
    }

    /// Undo the most recent segment.
    ///
    /// Returns the removed id, or `Ok(None)` without changing anything when the
    /// store is empty.
    pub fn undo(&mut self) -> Result<Option<SegmentId>, CanvasError> {
        if self.segments.is_empty() {
            return Ok(None);
        }
        let Some(last) = self.ids.last() else {
            return Ok(None);
        };
        self.remove_last(last).map(|s| Some(s.id()))
    }

    /// Look up a live segment.
    pub fn get(&self, id: SegmentId) -> Result<&Segment, CanvasError> {
        self.segments
            .get(&id)
            .ok_or(CanvasError::UnknownSegment(id))
    }

    /// Iterate over live segments in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.values()
    }

    /// Segments whose bounding box meets `view`, sorted by ascending id.
    ///
    /// A view with zero width or height (or flipped corners) shows nothing.
    pub fn query_view(&self, view: Rect) -> Vec<&Segment> {
        if !(view.width() > 0.0 && view.height() > 0.0) {
            return Vec::new();
        }
        let mut out: Vec<&Segment> = self
            .index
            .query_rect(rect_to_aabb(view))
            .filter_map(|(_, id)| {
                let found = self.segments.get(&id);
                if found.is_none() {
                    log::warn!("index returned {id}, which is not in the store");
                }
                found
            })
            .collect();
        out.sort_unstable_by_key(|s| s.id());
        log::trace!("view {view:?}: {} of {} segments", out.len(), self.len());
        out
    }
}
