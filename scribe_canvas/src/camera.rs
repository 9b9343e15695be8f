// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera state and the controller that eases it toward user-set targets.
//!
//! Zoom is stored as an exponent: the world→screen scale is `exp(-exponent)`.
//! Easing the exponent rather than the scale makes zooming in and out feel
//! equally fast. Zoom and rotation are eased every tick with [`approach`];
//! panning follows the pointer directly.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::config::CanvasConfig;

/// Where the camera looks, how far it is zoomed, and how it is rotated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World point shown at the centre of the viewport.
    pub position: Point,
    /// Rotation in radians.
    pub rotation: f64,
    /// Log-scale zoom; `0.0` is 1:1.
    pub zoom_exponent: f64,
    /// Viewport size in screen pixels.
    pub viewport: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Size::new(800.0, 480.0))
    }
}

impl Camera {
    /// A camera at the origin, unrotated, at 1:1 zoom.
    pub fn new(viewport: Size) -> Self {
        Self {
            position: Point::ORIGIN,
            rotation: 0.0,
            zoom_exponent: 0.0,
            viewport,
        }
    }

    /// World→screen scale factor.
    pub fn scale(&self) -> f64 {
        (-self.zoom_exponent).exp()
    }

    /// World units per screen pixel.
    pub fn screen_to_world_scale(&self) -> f64 {
        self.zoom_exponent.exp()
    }

    /// Transform from world space to screen pixels.
    pub fn world_to_screen(&self) -> Affine {
        Affine::translate(self.viewport.to_vec2() * 0.5)
            * Affine::rotate(self.rotation)
            * Affine::scale(self.scale())
            * Affine::translate(-self.position.to_vec2())
    }

    /// Map a screen-space point into the world.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.world_to_screen().inverse() * screen
    }

    /// World-space bounding box of everything visible.
    ///
    /// Under rotation this is the axis-aligned box around the rotated viewport,
    /// so it is slightly larger than what is actually on screen.
    pub fn view_rect(&self) -> Rect {
        self.world_to_screen()
            .inverse()
            .transform_rect_bbox(self.viewport.to_rect())
    }
}

/// Move `current` a `speed` fraction of the way to `target`, never overshooting,
/// and land exactly on `target` once within `snap`.
pub fn approach(current: f64, target: f64, speed: f64, snap: f64) -> f64 {
    let next = current + (target - current) * speed;
    let next = if current < target {
        next.max(current).min(target)
    } else {
        next.min(current).max(target)
    };
    if (target - next).abs() < snap {
        target
    } else {
        next
    }
}

/// Owns the [`Camera`] and the targets it is easing toward.
#[derive(Clone, Debug, Default)]
pub struct CameraController {
    camera: Camera,
    target_exponent: f64,
    target_rotation: f64,
    drag_anchor: Option<Point>,
}

impl CameraController {
    /// Wrap `camera`, with targets equal to its current state.
    pub fn new(camera: Camera) -> Self {
        Self {
            target_exponent: camera.zoom_exponent,
            target_rotation: camera.rotation,
            camera,
            drag_anchor: None,
        }
    }

    /// The current camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Resize the viewport (screen pixels).
    pub fn set_viewport(&mut self, viewport: Size) {
        self.camera.viewport = viewport;
    }

    /// Zoom exponent being eased toward.
    pub fn target_exponent(&self) -> f64 {
        self.target_exponent
    }

    /// Rotation being eased toward.
    pub fn target_rotation(&self) -> f64 {
        self.target_rotation
    }

    /// Set the zoom target, clamped into the configured exponent range.
    pub fn set_zoom_target(&mut self, exponent: f64, config: &CanvasConfig) {
        if exponent.is_finite() {
            self.target_exponent = config.clamp_exponent(exponent);
        }
    }

    /// Apply a scroll delta. Positive deltas zoom in.
    pub fn scroll(&mut self, delta: f64, config: &CanvasConfig) {
        if delta != 0.0 && delta.is_finite() {
            self.set_zoom_target(
                self.target_exponent - delta * config.zoom_sensitivity,
                config,
            );
        }
    }

    /// Turn the target one step counter-clockwise.
    pub fn rotate_left(&mut self, config: &CanvasConfig) {
        self.target_rotation += config.rotation_step;
    }

    /// Turn the target one step clockwise.
    pub fn rotate_right(&mut self, config: &CanvasConfig) {
        self.target_rotation -= config.rotation_step;
    }

    /// Start a grab-and-drag pan with the world point under the pointer.
    pub fn begin_drag(&mut self, pointer_world: Point) {
        self.drag_anchor = Some(pointer_world);
    }

    /// Whether a pan is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Move the camera so the drag anchor sits under the pointer again.
    ///
    /// `pointer_world` is the pointer mapped through the camera before this
    /// call. Returns the pointer's world position after the move, which is the
    /// anchor while dragging.
    pub fn drag_to(&mut self, pointer_world: Point) -> Point {
        match self.drag_anchor {
            Some(anchor) => {
                let delta: Vec2 = anchor - pointer_world;
                self.camera.position += delta;
                anchor
            }
            None => pointer_world,
        }
    }

    /// Finish the pan.
    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Ease zoom and rotation one step toward their targets.
    ///
    /// Returns `true` while either is still moving.
    pub fn tick(&mut self, config: &CanvasConfig) -> bool {
        let cam = &mut self.camera;
        cam.zoom_exponent = approach(
            cam.zoom_exponent,
            self.target_exponent,
            config.smoothing_speed,
            config.snap_threshold,
        );
        cam.rotation = approach(
            cam.rotation,
            self.target_rotation,
            config.smoothing_speed,
            config.snap_threshold,
        );
        let moving =
            cam.zoom_exponent != self.target_exponent || cam.rotation != self.target_rotation;
        if !moving {
            log::trace!("camera settled at exponent {}", cam.zoom_exponent);
        }
        moving
    }
}
