// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the canvas and whatever rasterizes it.
//!
//! The canvas never draws pixels. [`draw_frame`] walks the segments visible
//! through the camera and hands them, in world coordinates, to a [`Renderer`].
//! [`DisplayList`] is a renderer that just records what it was given, for
//! tests and for hosts that batch their own draw calls.

use core::fmt;

use kurbo::{Affine, Point};

use crate::interaction::Canvas;

/// A sink for filled capsules ("thick lines").
pub trait Renderer {
    /// Called once per frame before any geometry, with the world→screen transform.
    fn begin(&mut self, world_to_screen: Affine) {
        let _ = world_to_screen;
    }

    /// Fill every point within `radius` of the segment `a`–`b` (world space).
    fn fill_line(&mut self, a: Point, b: Point, radius: f64);

    /// Called once per frame after all geometry.
    fn end(&mut self) {}
}

/// One recorded call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Frame start with its view transform.
    Begin(Affine),
    /// A filled capsule.
    Line {
        /// First endpoint.
        a: Point,
        /// Second endpoint.
        b: Point,
        /// Half-thickness in world units.
        radius: f64,
    },
    /// Frame end.
    End,
}

/// A [`Renderer`] that records commands in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    /// Everything recorded since the last [`clear`](Self::clear).
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Drop all recorded commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Only the line commands, as `(a, b, radius)`.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, f64)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Line { a, b, radius } => Some((a, b, radius)),
            _ => None,
        })
    }
}

impl Renderer for DisplayList {
    fn begin(&mut self, world_to_screen: Affine) {
        self.commands.push(DrawCommand::Begin(world_to_screen));
    }

    fn fill_line(&mut self, a: Point, b: Point, radius: f64) {
        self.commands.push(DrawCommand::Line { a, b, radius });
    }

    fn end(&mut self) {
        self.commands.push(DrawCommand::End);
    }
}

/// HUD figures for one drawn frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSummary {
    /// Committed segments whose boxes met the view.
    pub in_view: usize,
    /// All committed segments.
    pub total: usize,
    /// World units per screen pixel.
    pub world_per_pixel: f64,
}

impl fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "In view: {} -- Total: {} -- {:.4}",
            self.in_view, self.total, self.world_per_pixel
        )
    }
}

/// Draw everything visible: committed segments oldest first, then the
/// in-progress stroke on top.
pub fn draw_frame(canvas: &Canvas, renderer: &mut impl Renderer) -> FrameSummary {
    let camera = canvas.camera();
    renderer.begin(camera.world_to_screen());
    let visible = canvas.store().query_view(camera.view_rect());
    for seg in &visible {
        renderer.fill_line(seg.a(), seg.b(), seg.radius());
    }
    if let Some(pending) = canvas.in_progress() {
        renderer.fill_line(pending.a, pending.b, pending.radius);
    }
    renderer.end();
    FrameSummary {
        in_view: visible.len(),
        total: canvas.store().len(),
        world_per_pixel: camera.screen_to_world_scale(),
    }
}
