// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Scribe Index: insert, query, remove, and a stale-key failure.

use scribe_index::{Aabb2D, Index};

fn main() {
    let mut idx: Index<f64, u32> = Index::new();
    let k1 = idx.insert(Aabb2D::new(0.0, 0.0, 10.0, 10.0), 1);
    let _k2 = idx.insert(Aabb2D::new(5.0, 5.0, 15.0, 15.0), 2);

    let hits: Vec<_> = idx
        .query_rect(Aabb2D::new(6.0, 6.0, 7.0, 7.0))
        .map(|(_, p)| p)
        .collect();
    println!("hits around (6,6): {hits:?}");

    println!("remove k1: {:?}", idx.remove(k1));
    match idx.remove(k1) {
        Ok(p) => println!("unexpectedly removed {p}"),
        Err(e) => println!("second remove: {e}"),
    }
    println!("tree height with {} entries: {}", idx.len(), idx.height());
}
