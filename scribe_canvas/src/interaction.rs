// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-tick interaction loop.
//!
//! [`Canvas`] owns all mutable drawing state. Each call to
//! [`Canvas::update`] consumes one [`InputFrame`] and runs, in order:
//!
//! 1. quit detection,
//! 2. camera input (scroll, rotate, pointer mapping, drag pan) and smoothing,
//! 3. the frame-stats reset control,
//! 4. undo (and the unsupported redo chord),
//! 5. the draw gesture.
//!
//! Drawing anchors at the pointer on press. While the button is held and the
//! pointer has moved, the piece from the anchor to the pointer is committed
//! and the anchor moves to the pointer, unless the straight-line modifier is
//! held. Release always commits the final piece, even if it has zero length.

use kurbo::{Point, Size};

use crate::camera::{Camera, CameraController};
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::frame::FrameStats;
use crate::geometry::Stroke;
use crate::input::{Bindings, InputFrame};
use crate::segment::SegmentId;
use crate::store::SegmentStore;

bitflags::bitflags! {
    /// Gesture edges observed during one tick. Each is reported at most once.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Gestures: u8 {
        /// The draw button went down; a stroke is now in progress.
        const DRAW_STARTED    = 1 << 0;
        /// A stroke is in progress and the draw button is held.
        const DRAW_CONTINUING = 1 << 1;
        /// The draw button came up and the stroke ended.
        const DRAW_RELEASED   = 1 << 2;
        /// The undo chord was pressed.
        const UNDO_REQUESTED  = 1 << 3;
        /// The redo chord was pressed. Redo is not supported.
        const REDO_REQUESTED  = 1 << 4;
        /// The quit control was pressed.
        const QUIT_REQUESTED  = 1 << 5;
    }
}

/// What one call to [`Canvas::update`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    /// Gesture edges seen this tick.
    pub gestures: Gestures,
    /// Segments committed this tick, in creation order.
    pub created: Vec<SegmentId>,
    /// Segment removed by undo this tick.
    pub removed: Option<SegmentId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pen {
    start: Point,
    end: Point,
}

/// Drawing state owned by the interaction loop.
///
/// Segments change only through [`Canvas::update`]. Hosts get read access via
/// [`Canvas::store`]; there is no mutable handle to the store:
///
/// ```compile_fail
/// use kurbo::{Point, Size};
/// use scribe_canvas::{Canvas, CanvasConfig, Stroke};
///
/// let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(100.0, 100.0)).unwrap();
/// let p = Point::new(1.0, 1.0);
/// canvas.store_mut().create(Stroke::new(p, p, 1.0)).unwrap();
/// ```
#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    bindings: Bindings,
    store: SegmentStore,
    camera: CameraController,
    pointer_world: Point,
    pen: Option<Pen>,
    stats: FrameStats,
    quit: bool,
}

impl Canvas {
    /// An empty canvas with the default controls.
    pub fn new(config: CanvasConfig, viewport: Size) -> Result<Self, CanvasError> {
        Self::with_bindings(config, Bindings::default(), viewport)
    }

    /// An empty canvas with custom controls.
    pub fn with_bindings(
        config: CanvasConfig,
        bindings: Bindings,
        viewport: Size,
    ) -> Result<Self, CanvasError> {
        config.validate()?;
        let stats = FrameStats::new(config.target_frame_time);
        Ok(Self {
            config,
            bindings,
            store: SegmentStore::new(),
            camera: CameraController::new(Camera::new(viewport)),
            pointer_world: Point::ORIGIN,
            pen: None,
            stats,
            quit: false,
        })
    }

    /// Advance one tick.
    ///
    /// Errors leave the canvas usable: a rejected segment is simply not
    /// committed and the stroke stays in progress.
    pub fn update(&mut self, input: &InputFrame) -> Result<Tick, CanvasError> {
        let mut tick = Tick::default();
        let b = &self.bindings;

        if b.quit.pressed(input) {
            self.quit = true;
            tick.gestures |= Gestures::QUIT_REQUESTED;
        }

        self.camera.scroll(input.current.scroll, &self.config);
        if b.rotate_left.pressed(input) {
            self.camera.rotate_left(&self.config);
        }
        if b.rotate_right.pressed(input) {
            self.camera.rotate_right(&self.config);
        }
        self.pointer_world = self.camera.camera().screen_to_world(input.current.pointer);
        if b.drag_camera.pressed(input) {
            self.camera.begin_drag(self.pointer_world);
        }
        if self.camera.is_dragging() && b.drag_camera.held_only(input) {
            self.pointer_world = self.camera.drag_to(self.pointer_world);
        }
        if self.camera.is_dragging() && b.drag_camera.released(input) {
            self.camera.end_drag();
        }
        let _ = self.camera.tick(&self.config);

        if b.reset_frame_stats.pressed(input) {
            self.stats.reset_dropped();
        }

        if b.undo.pressed(input) {
            tick.gestures |= Gestures::UNDO_REQUESTED;
            tick.removed = self.store.undo()?;
        }
        if b.redo.pressed(input) {
            tick.gestures |= Gestures::REDO_REQUESTED;
            log::warn!("redo requested but not supported");
        }

        self.update_pen(input, &mut tick)?;
        Ok(tick)
    }

    fn update_pen(&mut self, input: &InputFrame, tick: &mut Tick) -> Result<(), CanvasError> {
        let here = self.pointer_world;
        let radius = self.stroke_radius();
        let draw = &self.bindings.draw;

        if draw.pressed(input) {
            self.pen = Some(Pen {
                start: here,
                end: here,
            });
            tick.gestures |= Gestures::DRAW_STARTED;
        }
        let Some(mut pen) = self.pen else {
            return Ok(());
        };
        if draw.held(input) {
            tick.gestures |= Gestures::DRAW_CONTINUING;
            pen.end = here;
            if pen.start != pen.end && !self.bindings.straight_line.held(input) {
                let id = self.store.create(Stroke::new(pen.start, pen.end, radius))?;
                tick.created.push(id);
                pen.start = here;
            }
            self.pen = Some(pen);
        } else if draw.released(input) {
            tick.gestures |= Gestures::DRAW_RELEASED;
            pen.end = here;
            self.pen = Some(pen);
            let id = self.store.create(Stroke::new(pen.start, pen.end, radius))?;
            tick.created.push(id);
            self.pen = None;
        } else {
            // The button went up without a release edge (e.g. bindings changed).
            self.pen = None;
        }
        Ok(())
    }

    /// World-space radius for new segments at the current zoom.
    pub fn stroke_radius(&self) -> f64 {
        self.config.stroke_radius * self.camera.camera().screen_to_world_scale()
    }

    /// The stroke being drawn, from the anchor to the pointer.
    pub fn in_progress(&self) -> Option<Stroke> {
        self.pen
            .map(|p| Stroke::new(p.start, p.end, self.stroke_radius()))
    }

    /// Committed segments.
    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    /// Committed segments, for tests that seed the store directly.
    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut SegmentStore {
        &mut self.store
    }

    /// The current camera.
    pub fn camera(&self) -> &Camera {
        self.camera.camera()
    }

    /// The camera and its smoothing targets.
    pub fn camera_controller(&self) -> &CameraController {
        &self.camera
    }

    /// Resize the viewport after the host window changes size.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.camera.set_viewport(viewport);
    }

    /// Pointer position in world space as of the last update.
    pub fn pointer_world(&self) -> Point {
        self.pointer_world
    }

    /// Frame pacing statistics.
    pub fn frame_stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Frame pacing statistics, for the host to feed timings into.
    pub fn frame_stats_mut(&mut self) -> &mut FrameStats {
        &mut self.stats
    }

    /// Whether the quit control has been pressed.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The tunables in effect.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The controls in effect.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}
