// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::bvh::Bvh;
use crate::backends::flatvec::FlatVec;
use crate::types::{Aabb2D, Scalar};

/// Generational handle for entries.
///
/// A key stays valid until its entry is removed. Slots are recycled, but every
/// reuse bumps the slot's generation, so a stale key never addresses a newer entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Errors reported by [`IndexGeneric`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The key does not address a live entry: it was already removed, or it
    /// came from another index.
    #[error("stale or foreign index key {0:?}")]
    StaleKey(Key),
}

#[derive(Clone, Debug)]
struct Entry<T, P> {
    aabb: Aabb2D<T>,
    payload: P,
}

#[derive(Clone, Debug)]
struct Slot<T, P> {
    generation: u32,
    entry: Option<Entry<T, P>>,
}

/// A generic AABB index parameterized by a spatial backend.
///
/// Entries are visible to queries as soon as [`insert`](Self::insert) returns.
/// The index owns only boxes and small `Copy` payloads (typically an id into
/// some other store), never the records they describe.
#[derive(Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P: Copy + Debug, B: Backend<T>> {
    slots: Vec<Slot<T, P>>,
    free_list: Vec<usize>,
    len: usize,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<T, P, B> Default for IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Create an empty index around an existing (empty) backend.
    pub fn with_backend(mut backend: B) -> Self {
        backend.clear();
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            backend,
        }
    }

    /// Reserve space for at least `n` entries.
    pub fn reserve(&mut self, n: usize) {
        self.slots.reserve(n);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the spatial backend, e.g. for diagnostics.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Insert a new AABB with payload. Returns a stable handle `Key`.
    ///
    /// The box is assumed to be well formed: finite and not inverted.
    pub fn insert(&mut self, aabb: Aabb2D<T>, payload: P) -> Key {
        debug_assert!(!aabb.is_empty(), "inverted AABB inserted: {aabb:?}");
        let entry = Some(Entry { aabb, payload });
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = entry;
            (idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                entry,
            });
            (self.slots.len() - 1, 1)
        };
        self.backend.insert(idx, aabb);
        self.len += 1;
        Key::new(idx, generation)
    }

    /// Remove the entry addressed by `key` and return its payload.
    ///
    /// Fails with [`IndexError::StaleKey`] if `key` is not live; the index is
    /// left untouched in that case.
    pub fn remove(&mut self, key: Key) -> Result<P, IndexError> {
        if self.entry(key).is_none() {
            return Err(IndexError::StaleKey(key));
        }
        let entry = self.slots[key.idx()]
            .entry
            .take()
            .ok_or(IndexError::StaleKey(key))?;
        let removed = self.backend.remove(key.idx());
        debug_assert!(removed, "backend lost slot {}", key.idx());
        self.free_list.push(key.idx());
        self.len -= 1;
        Ok(entry.payload)
    }

    /// The box and payload stored under `key`, if it is live.
    pub fn get(&self, key: Key) -> Option<(Aabb2D<T>, P)> {
        self.entry(key).map(|e| (e.aabb, e.payload))
    }

    /// Whether `key` addresses a live entry.
    pub fn contains(&self, key: Key) -> bool {
        self.entry(key).is_some()
    }

    /// Remove every entry. Outstanding keys become stale.
    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.len = 0;
        self.backend.clear();
    }

    /// Query for entries whose AABB intersects the given rectangle.
    ///
    /// Intersection is closed on both axes. Each live entry appears at most once;
    /// the order is unspecified.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend.query_rect(rect).filter_map(move |i| {
            let slot = self.slots.get(i)?;
            let e = slot.entry.as_ref()?;
            Some((Key::new(i, slot.generation), e.payload))
        })
    }

    fn entry(&self, key: Key) -> Option<&Entry<T, P>> {
        let slot = self.slots.get(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        slot.entry.as_ref()
    }
}

/// Default index: a self-balancing BVH.
pub type Index<T, P> = IndexGeneric<T, P, Bvh<T>>;

/// Index backed by a flat vector with linear scans.
pub type FlatIndex<T, P> = IndexGeneric<T, P, FlatVec<T>>;

impl<T: Scalar, P: Copy + Debug> Index<T, P> {
    /// Height of the underlying tree.
    pub fn height(&self) -> u32 {
        self.backend.height()
    }
}
