// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Id allocation and single-step undo.
//!
//! Ids are dense and undo is strictly last-in first-out by creation order, so
//! the whole history is one counter: the next id to hand out. Undo moves the
//! counter back by one, and that value is both the id to remove and the id the
//! next segment will reuse. There is no redo.

use crate::segment::SegmentId;

/// Counter of allocated segment ids that doubles as the undo history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UndoStack {
    next: u32,
}

impl UndoStack {
    /// A fresh counter starting at id 0.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// The id the next [`allocate`](Self::allocate) will return.
    pub fn next_id(&self) -> SegmentId {
        SegmentId(self.next)
    }

    /// Number of ids currently allocated.
    pub fn depth(&self) -> usize {
        self.next as usize
    }

    /// The most recently allocated id, if any.
    pub fn last(&self) -> Option<SegmentId> {
        self.next.checked_sub(1).map(SegmentId)
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> SegmentId {
        let id = SegmentId(self.next);
        self.next += 1;
        id
    }

    /// Take back the most recent id. Returns `None` when nothing is allocated.
    pub fn pop(&mut self) -> Option<SegmentId> {
        let last = self.last()?;
        self.next = last.0;
        Some(last)
    }
}
