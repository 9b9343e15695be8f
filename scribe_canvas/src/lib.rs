// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scribe Canvas: the core of an infinite line-drawing canvas.
//!
//! Freehand strokes are committed as short, immutable capsule [`Segment`]s.
//! Every segment is indexed by its bounding box in a [`scribe_index::Index`],
//! so drawing only visits what the camera can see, however large the drawing
//! grows.
//!
//! - [`SegmentStore`]: creates segments, keeps them and the index in sync, and
//!   answers viewport queries in draw order.
//! - [`UndoStack`]: segment ids are dense, so undo is a single counter.
//! - [`Camera`] / [`CameraController`]: pan by grabbing the world; zoom and
//!   rotation ease toward their targets.
//! - [`Canvas`]: the per-tick loop that turns an [`InputFrame`] into camera
//!   moves, undo and committed segments.
//! - [`draw_frame`]: feeds the visible segments to a [`Renderer`].
//!
//! Nothing here owns a window, a GPU or a clock. The host samples input,
//! measures time and rasterizes.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use scribe_canvas::input::{Buttons, InputFrame, InputSnapshot};
//! use scribe_canvas::{Canvas, CanvasConfig, DisplayList, draw_frame};
//!
//! let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(640.0, 480.0))?;
//! let mut input = InputFrame::default();
//!
//! // Press, drag right, release.
//! for (held, x) in [(Buttons::LEFT, 320.0), (Buttons::LEFT, 360.0), (Buttons::empty(), 360.0)] {
//!     input.advance(InputSnapshot::new(held, Point::new(x, 240.0)));
//!     let _ = canvas.update(&input)?;
//! }
//! assert_eq!(canvas.store().len(), 2);
//!
//! let mut list = DisplayList::default();
//! let summary = draw_frame(&canvas, &mut list);
//! assert_eq!(summary.in_view, 2);
//! # Ok::<(), scribe_canvas::CanvasError>(())
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: segment creation and removal at
//! `debug`, viewport queries and camera settling at `trace`, and ignored redo
//! requests or store/index disagreements at `warn`. Install any logger in the
//! host to see them.

pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod render;
pub mod segment;
pub mod store;
pub mod undo;

pub use camera::{Camera, CameraController, approach};
pub use config::CanvasConfig;
pub use error::CanvasError;
pub use frame::FrameStats;
pub use geometry::{Stroke, aabb_to_rect, rect_to_aabb};
pub use input::{Bindings, Buttons, Condition, InputFrame, InputSnapshot};
pub use interaction::{Canvas, Gestures, Tick};
pub use render::{DisplayList, DrawCommand, FrameSummary, Renderer, draw_frame};
pub use segment::{Segment, SegmentId};
pub use store::SegmentStore;
pub use undo::UndoStack;
