// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input snapshots and composable button conditions.
//!
//! The host samples its devices once per tick into an [`InputSnapshot`]. The
//! canvas keeps the previous snapshot alongside it in an [`InputFrame`], so a
//! [`Condition`] can tell a press (up → down) from a hold or a release.
//!
//! Conditions compose: `Any` is satisfied by any child, `All` by every child.
//! An `All` is *pressed* on the tick where every child is down and at least
//! one of them just went down, so `Ctrl+Z` fires whether `Ctrl` or `Z` is
//! pressed last.
//!
//! ```
//! use kurbo::Point;
//! use scribe_canvas::input::{Buttons, Condition, InputFrame, InputSnapshot};
//!
//! let undo = Condition::All(vec![
//!     Condition::Any(vec![
//!         Condition::Key(Buttons::CTRL_LEFT),
//!         Condition::Key(Buttons::CTRL_RIGHT),
//!     ]),
//!     Condition::Key(Buttons::Z),
//! ]);
//!
//! let mut frame = InputFrame::default();
//! frame.advance(InputSnapshot::new(Buttons::CTRL_LEFT, Point::ZERO));
//! assert!(!undo.pressed(&frame));
//! frame.advance(InputSnapshot::new(Buttons::CTRL_LEFT | Buttons::Z, Point::ZERO));
//! assert!(undo.pressed(&frame));
//! frame.advance(InputSnapshot::new(Buttons::CTRL_LEFT | Buttons::Z, Point::ZERO));
//! assert!(!undo.pressed(&frame) && undo.held_only(&frame));
//! ```

use kurbo::Point;

bitflags::bitflags! {
    /// Mouse buttons and keys the canvas reacts to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        /// Primary mouse button.
        const LEFT         = 1 << 0;
        /// Middle mouse button.
        const MIDDLE       = 1 << 1;
        /// Secondary mouse button.
        const RIGHT        = 1 << 2;
        /// Left Shift.
        const SHIFT_LEFT   = 1 << 3;
        /// Right Shift.
        const SHIFT_RIGHT  = 1 << 4;
        /// Left Control.
        const CTRL_LEFT    = 1 << 5;
        /// Right Control.
        const CTRL_RIGHT   = 1 << 6;
        /// The `Z` key.
        const Z            = 1 << 7;
        /// `,` / `<`.
        const COMMA        = 1 << 8;
        /// `.` / `>`.
        const PERIOD       = 1 << 9;
        /// Escape.
        const ESCAPE       = 1 << 10;
        /// Function key 2.
        const F2           = 1 << 11;
        /// Back/Select on the first gamepad.
        const GAMEPAD_BACK = 1 << 12;
    }
}

/// Device state sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Buttons down at sample time.
    pub held: Buttons,
    /// Pointer position in screen pixels.
    pub pointer: Point,
    /// Scroll wheel movement since the previous sample. Positive zooms in.
    pub scroll: f64,
}

impl InputSnapshot {
    /// A snapshot with no scroll movement.
    pub fn new(held: Buttons, pointer: Point) -> Self {
        Self {
            held,
            pointer,
            scroll: 0.0,
        }
    }

    /// Set the scroll delta.
    #[must_use]
    pub fn with_scroll(mut self, scroll: f64) -> Self {
        self.scroll = scroll;
        self
    }
}

/// The current snapshot and the one before it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Last tick's snapshot.
    pub previous: InputSnapshot,
    /// This tick's snapshot.
    pub current: InputSnapshot,
}

impl InputFrame {
    /// Shift `current` into `previous` and store `next` as current.
    pub fn advance(&mut self, next: InputSnapshot) {
        self.previous = self.current;
        self.current = next;
    }
}

/// A predicate over buttons, evaluated against an [`InputFrame`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    /// Every button in the mask is down.
    Key(Buttons),
    /// At least one child is satisfied.
    Any(Vec<Condition>),
    /// Every child is satisfied. An empty list is never satisfied.
    All(Vec<Condition>),
}

impl Condition {
    fn down(&self, held: Buttons) -> bool {
        match self {
            Self::Key(mask) => !mask.is_empty() && held.contains(*mask),
            Self::Any(children) => children.iter().any(|c| c.down(held)),
            Self::All(children) => {
                !children.is_empty() && children.iter().all(|c| c.down(held))
            }
        }
    }

    /// Up last tick, down this tick.
    pub fn pressed(&self, frame: &InputFrame) -> bool {
        match self {
            Self::Key(_) => !self.down(frame.previous.held) && self.down(frame.current.held),
            Self::Any(children) => children.iter().any(|c| c.pressed(frame)),
            Self::All(children) => {
                self.down(frame.current.held) && children.iter().any(|c| c.pressed(frame))
            }
        }
    }

    /// Down this tick.
    pub fn held(&self, frame: &InputFrame) -> bool {
        self.down(frame.current.held)
    }

    /// Down this tick and the one before, so not on the tick of the press.
    pub fn held_only(&self, frame: &InputFrame) -> bool {
        self.down(frame.previous.held) && self.down(frame.current.held)
    }

    /// Down last tick, up this tick.
    pub fn released(&self, frame: &InputFrame) -> bool {
        match self {
            Self::Key(_) => self.down(frame.previous.held) && !self.down(frame.current.held),
            Self::Any(children) => children.iter().any(|c| c.released(frame)),
            Self::All(children) => {
                self.down(frame.previous.held) && children.iter().any(|c| c.released(frame))
            }
        }
    }
}

fn either(a: Buttons, b: Buttons) -> Condition {
    Condition::Any(vec![Condition::Key(a), Condition::Key(b)])
}

/// The conditions behind each canvas control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bindings {
    /// Leave the application.
    pub quit: Condition,
    /// Draw while held.
    pub draw: Condition,
    /// While held, drawing commits only on release, giving one straight segment.
    pub straight_line: Condition,
    /// Turn the view counter-clockwise.
    pub rotate_left: Condition,
    /// Turn the view clockwise.
    pub rotate_right: Condition,
    /// Grab and drag the world.
    pub drag_camera: Condition,
    /// Zero the dropped-frame counter.
    pub reset_frame_stats: Condition,
    /// Remove the most recent segment.
    pub undo: Condition,
    /// Recognized but not supported.
    pub redo: Condition,
}

impl Default for Bindings {
    fn default() -> Self {
        let ctrl = either(Buttons::CTRL_LEFT, Buttons::CTRL_RIGHT);
        let shift = either(Buttons::SHIFT_LEFT, Buttons::SHIFT_RIGHT);
        Self {
            quit: either(Buttons::ESCAPE, Buttons::GAMEPAD_BACK),
            draw: Condition::Key(Buttons::LEFT),
            straight_line: shift.clone(),
            rotate_left: Condition::Key(Buttons::COMMA),
            rotate_right: Condition::Key(Buttons::PERIOD),
            drag_camera: Condition::Key(Buttons::MIDDLE),
            reset_frame_stats: Condition::Key(Buttons::F2),
            undo: Condition::All(vec![ctrl.clone(), Condition::Key(Buttons::Z)]),
            redo: Condition::All(vec![ctrl, shift, Condition::Key(Buttons::Z)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(prev: Buttons, cur: Buttons) -> InputFrame {
        InputFrame {
            previous: InputSnapshot::new(prev, Point::ZERO),
            current: InputSnapshot::new(cur, Point::ZERO),
        }
    }

    #[test]
    fn key_edges() {
        let c = Condition::Key(Buttons::LEFT);
        let none = Buttons::empty();
        let left = Buttons::LEFT;

        let f = frame(none, left);
        assert!(c.pressed(&f) && c.held(&f) && !c.held_only(&f) && !c.released(&f));
        let f = frame(left, left);
        assert!(!c.pressed(&f) && c.held(&f) && c.held_only(&f) && !c.released(&f));
        let f = frame(left, none);
        assert!(!c.pressed(&f) && !c.held(&f) && c.released(&f));
        let f = frame(none, none);
        assert!(!c.pressed(&f) && !c.held(&f) && !c.released(&f));
    }

    #[test]
    fn unrelated_buttons_do_not_interfere() {
        let c = Condition::Key(Buttons::COMMA);
        let f = frame(Buttons::LEFT, Buttons::LEFT | Buttons::COMMA);
        assert!(c.pressed(&f));
    }

    #[test]
    fn any_fires_for_either_side() {
        let shift = either(Buttons::SHIFT_LEFT, Buttons::SHIFT_RIGHT);
        assert!(shift.held(&frame(Buttons::empty(), Buttons::SHIFT_RIGHT)));
        assert!(shift.pressed(&frame(Buttons::empty(), Buttons::SHIFT_LEFT)));
        assert!(!shift.held(&frame(Buttons::SHIFT_LEFT, Buttons::CTRL_LEFT)));
    }

    #[test]
    fn all_is_pressed_by_the_last_key_down() {
        let undo = Bindings::default().undo;
        let ctrl = Buttons::CTRL_RIGHT;
        let z = Buttons::Z;
        assert!(undo.pressed(&frame(ctrl, ctrl | z)));
        assert!(undo.pressed(&frame(z, ctrl | z)));
        assert!(undo.pressed(&frame(Buttons::empty(), ctrl | z)));
        assert!(!undo.pressed(&frame(ctrl | z, ctrl | z)));
        assert!(!undo.pressed(&frame(Buttons::empty(), z)));
        assert!(undo.released(&frame(ctrl | z, ctrl)));
        assert!(!undo.released(&frame(ctrl, Buttons::empty())));
    }

    #[test]
    fn redo_chord_also_satisfies_undo() {
        let b = Bindings::default();
        let f = frame(
            Buttons::CTRL_LEFT | Buttons::SHIFT_LEFT,
            Buttons::CTRL_LEFT | Buttons::SHIFT_LEFT | Buttons::Z,
        );
        assert!(b.redo.pressed(&f));
        assert!(b.undo.pressed(&f));
    }

    #[test]
    fn empty_conditions_never_fire() {
        let f = frame(Buttons::empty(), Buttons::all());
        assert!(!Condition::All(Vec::new()).held(&f));
        assert!(!Condition::Any(Vec::new()).pressed(&f));
        assert!(!Condition::Key(Buttons::empty()).pressed(&f));
    }

    #[test]
    fn advance_shifts_snapshots() {
        let mut f = InputFrame::default();
        let a = InputSnapshot::new(Buttons::LEFT, Point::new(1.0, 2.0)).with_scroll(3.0);
        let b = InputSnapshot::new(Buttons::empty(), Point::new(4.0, 5.0));
        f.advance(a);
        f.advance(b);
        assert_eq!(f.previous, a);
        assert_eq!(f.current, b);
    }
}
