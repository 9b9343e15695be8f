// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for drawing, camera smoothing and frame statistics.

use core::f64::consts::FRAC_PI_4;
use core::time::Duration;

use crate::error::CanvasError;

/// Adjustable constants for the canvas.
///
/// The defaults reproduce the feel of a 60 Hz desktop sketchpad. With the
/// `serde` feature enabled, missing fields fall back to these defaults when
/// deserializing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CanvasConfig {
    /// Stroke half-thickness in screen pixels. Converted to world units at the
    /// zoom in effect when a segment is committed.
    pub stroke_radius: f64,
    /// Fraction of the remaining distance covered per tick by zoom and
    /// rotation smoothing, in `(0, 1]`.
    pub smoothing_speed: f64,
    /// Once a smoothed value is closer than this to its target it snaps onto it.
    pub snap_threshold: f64,
    /// Zoom exponent change per unit of scroll delta.
    pub zoom_sensitivity: f64,
    /// Smallest zoom exponent (most zoomed in; scale is `exp(-exponent)`).
    pub min_zoom_exponent: f64,
    /// Largest zoom exponent (most zoomed out).
    pub max_zoom_exponent: f64,
    /// Rotation applied per rotate input, in radians.
    pub rotation_step: f64,
    /// Frame budget; slower frames count as dropped.
    pub target_frame_time: Duration,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            stroke_radius: 10.0,
            smoothing_speed: 0.08,
            snap_threshold: 0.001,
            zoom_sensitivity: 0.002,
            min_zoom_exponent: -4.0,
            max_zoom_exponent: 4.0,
            rotation_step: FRAC_PI_4,
            target_frame_time: Duration::from_nanos(16_666_667),
        }
    }
}

impl CanvasConfig {
    /// Check that every tunable is finite and in range.
    pub fn validate(&self) -> Result<(), CanvasError> {
        let finite = [
            self.stroke_radius,
            self.smoothing_speed,
            self.snap_threshold,
            self.zoom_sensitivity,
            self.min_zoom_exponent,
            self.max_zoom_exponent,
            self.rotation_step,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(CanvasError::InvalidConfig("values must be finite"));
        }
        if self.stroke_radius <= 0.0 {
            return Err(CanvasError::InvalidConfig("stroke_radius must be positive"));
        }
        if !(self.smoothing_speed > 0.0 && self.smoothing_speed <= 1.0) {
            return Err(CanvasError::InvalidConfig(
                "smoothing_speed must be in (0, 1]",
            ));
        }
        if self.snap_threshold < 0.0 {
            return Err(CanvasError::InvalidConfig(
                "snap_threshold must not be negative",
            ));
        }
        if self.min_zoom_exponent > self.max_zoom_exponent {
            return Err(CanvasError::InvalidConfig(
                "min_zoom_exponent exceeds max_zoom_exponent",
            ));
        }
        if self.target_frame_time.is_zero() {
            return Err(CanvasError::InvalidConfig(
                "target_frame_time must be non-zero",
            ));
        }
        Ok(())
    }

    /// Clamp a zoom exponent into the configured range.
    pub fn clamp_exponent(&self, exponent: f64) -> f64 {
        exponent.clamp(self.min_zoom_exponent, self.max_zoom_exponent)
    }
}
