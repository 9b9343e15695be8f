// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::Aabb2D;
use core::fmt::Debug;

/// Spatial backend abstraction used by `IndexGeneric`.
///
/// Backends only see dense slot numbers handed out by the index; payloads and
/// handle generations stay in the index. Each slot is inserted at most once
/// before it is removed again.
pub trait Backend<T: Copy + PartialOrd + Debug> {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>);

    /// Remove a slot from the spatial structure.
    ///
    /// Returns `false` if the slot was not present.
    fn remove(&mut self, slot: usize) -> bool;

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Number of live slots.
    fn len(&self) -> usize;

    /// Whether no slots are live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Query slots whose AABB intersects the rectangle. Each slot is yielded at most once.
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;
}
