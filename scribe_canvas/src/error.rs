// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the canvas operations.

use scribe_index::IndexError;

use crate::segment::SegmentId;

/// Failures reported by the canvas.
///
/// Every variant is a precondition violation by the caller or a sign that the
/// segment store and the spatial index disagree. None of them is retried.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CanvasError {
    /// An endpoint had a NaN or infinite coordinate.
    #[error("segment endpoint is not finite")]
    NonFinite,
    /// The half-thickness was zero, negative, or not finite.
    #[error("segment radius must be finite and positive, got {0}")]
    InvalidRadius(f64),
    /// No live segment has this id.
    #[error("unknown segment {0}")]
    UnknownSegment(SegmentId),
    /// Only the most recently created segment can be removed.
    #[error("segment {requested} is not the most recent one ({last})")]
    NotMostRecent {
        /// The id that was asked for.
        requested: SegmentId,
        /// The id that may be removed.
        last: SegmentId,
    },
    /// The spatial index rejected a handle held by the store.
    #[error("segment store and spatial index out of sync: {0}")]
    Index(#[from] IndexError),
    /// A tunable in [`CanvasConfig`](crate::config::CanvasConfig) is out of range.
    #[error("invalid canvas configuration: {0}")]
    InvalidConfig(&'static str),
}
