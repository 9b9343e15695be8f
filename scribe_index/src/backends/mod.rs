// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `bvh`: self-balancing binary BVH generic over `T: Scalar` (aliases: `BvhF32`, `BvhF64`, `BvhI64`).
//! - `flatvec`: flat vector with linear scans (small, simple, and a handy test oracle).
//!
//! Insertion cost heuristic
//! ------------------------
//! When a box `L` is pushed down the BVH, pairing it with node `N` costs
//! `2 · m(N ∪ L)`: a new parent covering both is created. Descending further
//! instead costs every ancestor the growth `m(N ∪ L) − m(N)` it must absorb,
//! plus the cost of the best pairing below. `m` is the half-perimeter, computed
//! in a widened accumulator (`f32`→`f64`, `i64`→`i128`). Descent stops as soon
//! as pairing here is cheaper than either child.

pub mod bvh;
pub mod flatvec;
