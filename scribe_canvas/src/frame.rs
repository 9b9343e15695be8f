// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame pacing statistics for the on-screen HUD.

use core::time::Duration;

const WINDOW: Duration = Duration::from_secs(1);

/// Frames per second, dropped frames and the cost of the last update and draw.
///
/// Time is fed in by the host, so the counter is deterministic under test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStats {
    target: Duration,
    window: Duration,
    frames_in_window: u32,
    fps: u32,
    dropped: u64,
    update_time: Duration,
    draw_time: Duration,
}

impl FrameStats {
    /// Statistics against a per-frame budget of `target`.
    pub fn new(target: Duration) -> Self {
        Self {
            target,
            window: Duration::ZERO,
            frames_in_window: 0,
            fps: 0,
            dropped: 0,
            update_time: Duration::ZERO,
            draw_time: Duration::ZERO,
        }
    }

    /// Account for one presented frame that took `elapsed` since the previous one.
    ///
    /// The fps figure refreshes once per second of accumulated frame time.
    pub fn frame(&mut self, elapsed: Duration) {
        self.frames_in_window += 1;
        if elapsed > self.target {
            self.dropped += 1;
        }
        self.window += elapsed;
        if self.window >= WINDOW {
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window = self.window.checked_sub(WINDOW).unwrap_or_default();
            // A single long stall should not carry over into the next window.
            if self.window >= WINDOW {
                self.window = Duration::ZERO;
            }
        }
    }

    /// Store how long the last update took.
    pub fn record_update(&mut self, took: Duration) {
        self.update_time = took;
    }

    /// Store how long the last draw took.
    pub fn record_draw(&mut self, took: Duration) {
        self.draw_time = took;
    }

    /// Frames counted in the last complete one-second window.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames slower than the budget since the last reset.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped
    }

    /// Zero the dropped-frame counter.
    pub fn reset_dropped(&mut self) {
        self.dropped = 0;
    }

    /// Duration of the last update.
    pub fn update_time(&self) -> Duration {
        self.update_time
    }

    /// Duration of the last draw.
    pub fn draw_time(&self) -> Duration {
        self.draw_time
    }

    /// The per-frame budget.
    pub fn target(&self) -> Duration {
        self.target
    }
}
