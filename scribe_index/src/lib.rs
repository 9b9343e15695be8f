// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scribe Index: a dynamic 2D AABB index.
//!
//! Scribe Index keeps a changing set of axis-aligned bounding boxes (AABBs), each
//! tagged with a small payload, and answers "which payloads overlap this
//! rectangle" without scanning the whole set.
//!
//! - Insert an AABB with a payload and get back a generational [`Key`].
//! - Remove by key. A stale key is reported as [`IndexError::StaleKey`] rather than ignored.
//! - Query by intersecting rectangle. Each live entry is reported at most once, in no particular order.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Higher layers (like a drawing canvas) compute world-space AABBs and feed them here.
//!
//! # Example
//!
//! ```rust
//! use scribe_index::{Aabb2D, Index, IndexError};
//!
//! let mut idx: Index<f64, u32> = Index::new();
//! let k1 = idx.insert(Aabb2D::new(0.0, 0.0, 10.0, 10.0), 1);
//! let _k2 = idx.insert(Aabb2D::new(50.0, 50.0, 60.0, 60.0), 2);
//!
//! let hits: Vec<_> = idx.query_rect(Aabb2D::new(5.0, 5.0, 20.0, 20.0)).collect();
//! assert_eq!(hits, vec![(k1, 1)]);
//!
//! assert_eq!(idx.remove(k1), Ok(1));
//! assert_eq!(idx.remove(k1), Err(IndexError::StaleKey(k1)));
//! ```
//!
//! ## Choosing a backend
//!
//! - [`Bvh`] (the default behind [`Index`]): binary hierarchy rebalanced with rotations on
//!   every insert and remove. Query and update cost grow with tree height, which stays
//!   logarithmic even when boxes arrive in spatial order.
//! - [`FlatVec`] (behind [`FlatIndex`]): linear scans. Fine for a handful of boxes, and
//!   useful as a brute-force reference.
//!
//! See the [`backends`] docs for the insertion heuristic.
//!
//! ### Float semantics
//!
//! This crate assumes finite floating-point coordinates and non-inverted boxes.
//! Validate input before it reaches the index; debug builds assert on inverted boxes.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::bvh::{Bvh, BvhF32, BvhF64, BvhI64};
pub use backends::flatvec::FlatVec;
pub use index::{FlatIndex, Index, IndexError, IndexGeneric, Key};
pub use types::Aabb2D;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Minimal xorshift generator for reproducible scenarios.
    struct Rng(u64);

    impl Rng {
        fn next_f64(&mut self) -> f64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            (x >> 11) as f64 / (1_u64 << 53) as f64
        }
    }

    #[test]
    fn inserted_box_is_found_by_overlapping_queries_only() {
        let mut idx: Index<f64, u32> = Index::new();
        let r = Aabb2D::new(-1.0, -1.0, 11.0, 1.0);
        let _ = idx.insert(r, 0);
        for q in [
            Aabb2D::new(-5.0, -5.0, 5.0, 5.0),
            Aabb2D::new(11.0, 1.0, 12.0, 2.0),
            Aabb2D::new(-100.0, -100.0, 100.0, 100.0),
            Aabb2D::new(3.0, 0.0, 3.0, 0.0),
        ] {
            assert_eq!(idx.query_rect(q).count(), 1, "{q:?} overlaps {r:?}");
        }
        for q in [
            Aabb2D::new(20.0, 20.0, 25.0, 25.0),
            Aabb2D::new(11.5, -1.0, 20.0, 1.0),
            Aabb2D::new(-1.0, 1.5, 11.0, 3.0),
        ] {
            assert_eq!(idx.query_rect(q).count(), 0, "{q:?} misses {r:?}");
        }
    }

    #[test]
    fn thousand_disjoint_boxes_match_linear_scan() {
        // 1000 boxes on a jittered 40x25 grid of 25x40 cells, so none overlap.
        let mut rng = Rng(0xCAFE_F00D_DEAD_BEEF);
        let mut idx: Index<f64, u32> = Index::new();
        let mut boxes = Vec::new();
        for i in 0..1000_u32 {
            let cx = f64::from(i % 40) * 25.0;
            let cy = f64::from(i / 40) * 40.0;
            let w = 2.0 + rng.next_f64() * 20.0;
            let h = 2.0 + rng.next_f64() * 35.0;
            let x = cx + rng.next_f64() * (24.0 - w);
            let y = cy + rng.next_f64() * (39.0 - h);
            let r = Aabb2D::<f64>::from_xywh(x, y, w, h);
            let _ = idx.insert(r, i);
            boxes.push(r);
        }
        // Total area is 1000x1000; a 100x100 query covers 1% of it.
        for _ in 0..25 {
            let q = Aabb2D::<f64>::from_xywh(rng.next_f64() * 900.0, rng.next_f64() * 900.0, 100.0, 100.0);
            let mut got: Vec<u32> = idx.query_rect(q).map(|(_, p)| p).collect();
            got.sort_unstable();
            let expected: Vec<u32> = boxes
                .iter()
                .zip(0_u32..)
                .filter(|(b, _)| b.intersects(&q))
                .map(|(_, i)| i)
                .collect();
            assert_eq!(got, expected, "query {q:?}");
        }
    }

    #[test]
    fn removed_entries_never_come_back() {
        let mut idx: Index<i64, u32> = Index::new();
        let keys: Vec<_> = (0..50_i64)
            .map(|i| idx.insert(Aabb2D::<i64>::from_xywh(i * 3, 0, 5, 5), u32::try_from(i).unwrap()))
            .collect();
        for k in keys.iter().step_by(2) {
            let _ = idx.remove(*k).unwrap();
        }
        for _ in 0..10 {
            let _ = idx.insert(Aabb2D::<i64>::from_xywh(1000, 1000, 1, 1), 999);
        }
        let all: Vec<u32> = idx
            .query_rect(Aabb2D::new(i64::MIN / 2, i64::MIN / 2, i64::MAX / 2, i64::MAX / 2))
            .map(|(_, p)| p)
            .collect();
        for i in (0..50_u32).step_by(2) {
            assert!(!all.contains(&i), "removed payload {i} resurfaced");
        }
        assert_eq!(all.len(), 25 + 10);
    }
}
