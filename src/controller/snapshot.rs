//! # Input Snapshot Module
//!
//! This module handles parsing raw evdev events from the Switch Pro
//! Controller and accumulating them into a [`RawInputSnapshot`] with a
//! fixed index layout, sampled once per control cycle.
//!
//! ## Index Layout
//!
//! Indices follow the classic Pro Controller layout so a binding table
//! written for it carries over unchanged:
//!
//! | Button | Index | | Button | Index |
//! |--------|-------|-|--------|-------|
//! | A | 0 | | L | 9 |
//! | B | 1 | | R | 10 |
//! | X | 2 | | Up | 11 |
//! | Y | 3 | | Down | 12 |
//! | Minus | 4 | | Left | 13 |
//! | Home | 5 | | Right | 14 |
//! | Plus | 6 | | Capture | 15 |
//! | L-Stick | 7 | | | |
//! | R-Stick | 8 | | | |
//!
//! | Axis | Index | Range |
//! |------|-------|-------|
//! | Left Stick X | 0 | [-1, 1] |
//! | Left Stick Y | 1 | [-1, 1] |
//! | Right Stick X | 2 | [-1, 1] |
//! | Right Stick Y | 3 | [-1, 1] |
//! | ZL | 4 | -1 released, +1 pressed |
//! | ZR | 5 | -1 released, +1 pressed |
//!
//! ZL/ZR report as key events on this controller (hid-nintendo), so
//! their axis projection snaps between the two extremes. The D-Pad is a
//! hat on the wire; it is surfaced both as the four direction buttons
//! and as the snapshot's single hat entry.

use evdev::{AbsoluteAxisType, InputEvent, Key};

/// Number of buttons in the fixed layout.
pub const BUTTON_COUNT: usize = 16;
/// Number of axes in the fixed layout.
pub const AXIS_COUNT: usize = 6;
/// Number of hats in the fixed layout.
pub const HAT_COUNT: usize = 1;

/// Full-scale stick deflection reported by the hid-nintendo driver.
pub const STICK_ABS_RANGE: i32 = 32767;

/// Trigger axis value when released.
pub const TRIGGER_RELEASED: f64 = -1.0;
/// Trigger axis value when fully pressed.
pub const TRIGGER_PRESSED: f64 = 1.0;

/// Button indices for semantic access.
pub mod buttons {
    pub const A: usize = 0;
    pub const B: usize = 1;
    pub const X: usize = 2;
    pub const Y: usize = 3;
    pub const MINUS: usize = 4;
    pub const HOME: usize = 5;
    pub const PLUS: usize = 6;
    pub const LEFT_STICK: usize = 7;
    pub const RIGHT_STICK: usize = 8;
    pub const L: usize = 9;
    pub const R: usize = 10;
    pub const UP: usize = 11;
    pub const DOWN: usize = 12;
    pub const LEFT: usize = 13;
    pub const RIGHT: usize = 14;
    pub const CAPTURE: usize = 15;
}

/// Axis indices for semantic access.
pub mod axes {
    pub const LEFT_STICK_X: usize = 0;
    pub const LEFT_STICK_Y: usize = 1;
    pub const RIGHT_STICK_X: usize = 2;
    pub const RIGHT_STICK_Y: usize = 3;
    pub const ZL: usize = 4;
    pub const ZR: usize = 5;
}

/// Direction reported by a hat (D-Pad).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HatDirection {
    #[default]
    Centered,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl HatDirection {
    /// Builds a direction from raw hat axis values (-1, 0, 1 each).
    ///
    /// `x` is positive to the right, `y` is positive downward, matching
    /// the evdev `ABS_HAT0X`/`ABS_HAT0Y` convention.
    #[must_use]
    pub fn from_xy(x: i32, y: i32) -> Self {
        match (x.signum(), y.signum()) {
            (0, -1) => HatDirection::Up,
            (1, -1) => HatDirection::UpRight,
            (1, 0) => HatDirection::Right,
            (1, 1) => HatDirection::DownRight,
            (0, 1) => HatDirection::Down,
            (-1, 1) => HatDirection::DownLeft,
            (-1, 0) => HatDirection::Left,
            (-1, -1) => HatDirection::UpLeft,
            _ => HatDirection::Centered,
        }
    }
}

/// One cycle's view of the controller: index-addressed button, axis and
/// hat state.
///
/// Axis values are normalized to [-1.0, 1.0]. The snapshot shape is
/// fixed for the session: [`BUTTON_COUNT`] buttons, [`AXIS_COUNT`]
/// axes, [`HAT_COUNT`] hats.
///
/// # Examples
///
/// ```
/// use excavator_bridge::controller::snapshot::{RawInputSnapshot, axes};
///
/// let snap = RawInputSnapshot::default();
/// assert_eq!(snap.axes[axes::LEFT_STICK_X], 0.0);
/// assert_eq!(snap.axes[axes::ZL], -1.0); // triggers rest at -1
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputSnapshot {
    pub buttons: Vec<bool>,
    pub axes: Vec<f64>,
    pub hats: Vec<HatDirection>,
}

impl Default for RawInputSnapshot {
    /// All buttons released, sticks centered, triggers released.
    fn default() -> Self {
        let mut axes = vec![0.0; AXIS_COUNT];
        axes[axes::ZL] = TRIGGER_RELEASED;
        axes[axes::ZR] = TRIGGER_RELEASED;
        Self {
            buttons: vec![false; BUTTON_COUNT],
            axes,
            hats: vec![HatDirection::Centered; HAT_COUNT],
        }
    }
}

/// Accumulates evdev events into a [`RawInputSnapshot`].
///
/// Events arrive between control cycles; the builder keeps the latest
/// value per input, and [`SnapshotBuilder::state`] is read once per
/// cycle.
///
/// Not thread-safe; use from the single control loop only.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: RawInputSnapshot,
    hat_x: i32,
    hat_y: i32,
}

impl SnapshotBuilder {
    /// Creates a builder with a released/centered snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn state(&self) -> &RawInputSnapshot {
        &self.snapshot
    }

    /// Processes a single evdev input event and updates the snapshot.
    ///
    /// Handles absolute axis events (sticks, hat) and key events
    /// (buttons, ZL/ZR). Sync events and unknown codes are ignored.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event.kind() {
            evdev::InputEventKind::AbsAxis(axis) => {
                self.process_axis_event(axis, event.value());
            }
            evdev::InputEventKind::Key(key) => {
                self.process_key_event(key, event.value() != 0);
            }
            _ => {
                // Ignore sync events and other event types
            }
        }
    }

    fn process_axis_event(&mut self, axis: AbsoluteAxisType, value: i32) {
        match axis {
            AbsoluteAxisType::ABS_X => {
                self.snapshot.axes[axes::LEFT_STICK_X] = scale_stick(value);
            }
            AbsoluteAxisType::ABS_Y => {
                self.snapshot.axes[axes::LEFT_STICK_Y] = scale_stick(value);
            }
            AbsoluteAxisType::ABS_RX => {
                self.snapshot.axes[axes::RIGHT_STICK_X] = scale_stick(value);
            }
            AbsoluteAxisType::ABS_RY => {
                self.snapshot.axes[axes::RIGHT_STICK_Y] = scale_stick(value);
            }
            AbsoluteAxisType::ABS_HAT0X => {
                self.hat_x = value;
                self.snapshot.buttons[buttons::LEFT] = value < 0;
                self.snapshot.buttons[buttons::RIGHT] = value > 0;
                self.snapshot.hats[0] = HatDirection::from_xy(self.hat_x, self.hat_y);
            }
            AbsoluteAxisType::ABS_HAT0Y => {
                self.hat_y = value;
                self.snapshot.buttons[buttons::UP] = value < 0;
                self.snapshot.buttons[buttons::DOWN] = value > 0;
                self.snapshot.hats[0] = HatDirection::from_xy(self.hat_x, self.hat_y);
            }
            _ => {
                // Ignore other axes (gyro, accelerometer, etc.)
            }
        }
    }

    fn process_key_event(&mut self, key: Key, pressed: bool) {
        match key {
            // Face buttons (Nintendo layout: A east, B south, X north, Y west)
            Key::BTN_EAST => self.snapshot.buttons[buttons::A] = pressed,
            Key::BTN_SOUTH => self.snapshot.buttons[buttons::B] = pressed,
            Key::BTN_NORTH => self.snapshot.buttons[buttons::X] = pressed,
            Key::BTN_WEST => self.snapshot.buttons[buttons::Y] = pressed,

            // Shoulder buttons
            Key::BTN_TL => self.snapshot.buttons[buttons::L] = pressed,
            Key::BTN_TR => self.snapshot.buttons[buttons::R] = pressed,

            // Triggers project onto the ZL/ZR axes
            Key::BTN_TL2 => {
                self.snapshot.axes[axes::ZL] =
                    if pressed { TRIGGER_PRESSED } else { TRIGGER_RELEASED };
            }
            Key::BTN_TR2 => {
                self.snapshot.axes[axes::ZR] =
                    if pressed { TRIGGER_PRESSED } else { TRIGGER_RELEASED };
            }

            // System buttons
            Key::BTN_SELECT => self.snapshot.buttons[buttons::MINUS] = pressed,
            Key::BTN_START => self.snapshot.buttons[buttons::PLUS] = pressed,
            Key::BTN_MODE => self.snapshot.buttons[buttons::HOME] = pressed,
            Key::BTN_Z => self.snapshot.buttons[buttons::CAPTURE] = pressed,

            // Stick clicks
            Key::BTN_THUMBL => self.snapshot.buttons[buttons::LEFT_STICK] = pressed,
            Key::BTN_THUMBR => self.snapshot.buttons[buttons::RIGHT_STICK] = pressed,

            _ => {
                // Ignore unknown buttons
            }
        }
    }
}

/// Scales a raw stick value (±32767) to [-1.0, 1.0].
#[inline]
fn scale_stick(value: i32) -> f64 {
    (f64::from(value) / f64::from(STICK_ABS_RANGE)).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::EventType;

    /// Helper to create an axis event for testing.
    fn make_axis_event(axis: AbsoluteAxisType, value: i32) -> InputEvent {
        InputEvent::new(EventType::ABSOLUTE, axis.0, value)
    }

    /// Helper to create a key event for testing.
    fn make_key_event(key: Key, pressed: bool) -> InputEvent {
        InputEvent::new(EventType::KEY, key.code(), if pressed { 1 } else { 0 })
    }

    // ==================== Snapshot Default Tests ====================

    #[test]
    fn test_default_snapshot_shape() {
        let snap = RawInputSnapshot::default();
        assert_eq!(snap.buttons.len(), BUTTON_COUNT);
        assert_eq!(snap.axes.len(), AXIS_COUNT);
        assert_eq!(snap.hats.len(), HAT_COUNT);
    }

    #[test]
    fn test_default_snapshot_released() {
        let snap = RawInputSnapshot::default();
        assert!(snap.buttons.iter().all(|&b| !b));
        assert_eq!(snap.axes[axes::LEFT_STICK_X], 0.0);
        assert_eq!(snap.axes[axes::RIGHT_STICK_Y], 0.0);
        assert_eq!(snap.axes[axes::ZL], TRIGGER_RELEASED);
        assert_eq!(snap.axes[axes::ZR], TRIGGER_RELEASED);
        assert_eq!(snap.hats[0], HatDirection::Centered);
    }

    // ==================== Stick Scaling Tests ====================

    #[test]
    fn test_scale_stick_extremes() {
        assert_eq!(scale_stick(0), 0.0);
        assert_eq!(scale_stick(STICK_ABS_RANGE), 1.0);
        assert_eq!(scale_stick(-STICK_ABS_RANGE), -1.0);
    }

    #[test]
    fn test_scale_stick_clamps_overrange() {
        assert_eq!(scale_stick(STICK_ABS_RANGE + 1000), 1.0);
        assert_eq!(scale_stick(-STICK_ABS_RANGE - 1000), -1.0);
    }

    #[test]
    fn test_process_left_stick() {
        let mut builder = SnapshotBuilder::new();

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, STICK_ABS_RANGE));
        assert_eq!(builder.state().axes[axes::LEFT_STICK_X], 1.0);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_Y, -STICK_ABS_RANGE / 2));
        let y = builder.state().axes[axes::LEFT_STICK_Y];
        assert!((y + 0.5).abs() < 1e-4, "expected ~-0.5, got {}", y);
    }

    #[test]
    fn test_process_right_stick() {
        let mut builder = SnapshotBuilder::new();

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_RX, STICK_ABS_RANGE));
        assert_eq!(builder.state().axes[axes::RIGHT_STICK_X], 1.0);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_RY, STICK_ABS_RANGE));
        assert_eq!(builder.state().axes[axes::RIGHT_STICK_Y], 1.0);
    }

    // ==================== Trigger Tests ====================

    #[test]
    fn test_triggers_snap_between_extremes() {
        let mut builder = SnapshotBuilder::new();

        builder.process_event(&make_key_event(Key::BTN_TL2, true));
        assert_eq!(builder.state().axes[axes::ZL], TRIGGER_PRESSED);

        builder.process_event(&make_key_event(Key::BTN_TL2, false));
        assert_eq!(builder.state().axes[axes::ZL], TRIGGER_RELEASED);

        builder.process_event(&make_key_event(Key::BTN_TR2, true));
        assert_eq!(builder.state().axes[axes::ZR], TRIGGER_PRESSED);
    }

    // ==================== D-Pad Tests ====================

    #[test]
    fn test_dpad_projects_onto_buttons() {
        let mut builder = SnapshotBuilder::new();

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, -1));
        assert!(builder.state().buttons[buttons::UP]);
        assert!(!builder.state().buttons[buttons::DOWN]);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, 1));
        assert!(!builder.state().buttons[buttons::UP]);
        assert!(builder.state().buttons[buttons::DOWN]);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, 0));
        assert!(!builder.state().buttons[buttons::UP]);
        assert!(!builder.state().buttons[buttons::DOWN]);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0X, -1));
        assert!(builder.state().buttons[buttons::LEFT]);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0X, 1));
        assert!(builder.state().buttons[buttons::RIGHT]);
        assert!(!builder.state().buttons[buttons::LEFT]);
    }

    #[test]
    fn test_dpad_updates_hat_direction() {
        let mut builder = SnapshotBuilder::new();

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, -1));
        assert_eq!(builder.state().hats[0], HatDirection::Up);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0X, 1));
        assert_eq!(builder.state().hats[0], HatDirection::UpRight);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, 0));
        assert_eq!(builder.state().hats[0], HatDirection::Right);

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0X, 0));
        assert_eq!(builder.state().hats[0], HatDirection::Centered);
    }

    #[test]
    fn test_hat_direction_from_xy() {
        assert_eq!(HatDirection::from_xy(0, 0), HatDirection::Centered);
        assert_eq!(HatDirection::from_xy(0, -1), HatDirection::Up);
        assert_eq!(HatDirection::from_xy(1, -1), HatDirection::UpRight);
        assert_eq!(HatDirection::from_xy(1, 0), HatDirection::Right);
        assert_eq!(HatDirection::from_xy(1, 1), HatDirection::DownRight);
        assert_eq!(HatDirection::from_xy(0, 1), HatDirection::Down);
        assert_eq!(HatDirection::from_xy(-1, 1), HatDirection::DownLeft);
        assert_eq!(HatDirection::from_xy(-1, 0), HatDirection::Left);
        assert_eq!(HatDirection::from_xy(-1, -1), HatDirection::UpLeft);
    }

    // ==================== Button Tests ====================

    #[test]
    fn test_face_buttons() {
        let mut builder = SnapshotBuilder::new();

        builder.process_event(&make_key_event(Key::BTN_EAST, true));
        assert!(builder.state().buttons[buttons::A]);
        builder.process_event(&make_key_event(Key::BTN_EAST, false));
        assert!(!builder.state().buttons[buttons::A]);

        builder.process_event(&make_key_event(Key::BTN_SOUTH, true));
        assert!(builder.state().buttons[buttons::B]);

        builder.process_event(&make_key_event(Key::BTN_NORTH, true));
        assert!(builder.state().buttons[buttons::X]);

        builder.process_event(&make_key_event(Key::BTN_WEST, true));
        assert!(builder.state().buttons[buttons::Y]);
    }

    #[test]
    fn test_shoulder_and_system_buttons() {
        let mut builder = SnapshotBuilder::new();

        builder.process_event(&make_key_event(Key::BTN_TL, true));
        assert!(builder.state().buttons[buttons::L]);

        builder.process_event(&make_key_event(Key::BTN_TR, true));
        assert!(builder.state().buttons[buttons::R]);

        builder.process_event(&make_key_event(Key::BTN_SELECT, true));
        assert!(builder.state().buttons[buttons::MINUS]);

        builder.process_event(&make_key_event(Key::BTN_START, true));
        assert!(builder.state().buttons[buttons::PLUS]);

        builder.process_event(&make_key_event(Key::BTN_MODE, true));
        assert!(builder.state().buttons[buttons::HOME]);

        builder.process_event(&make_key_event(Key::BTN_Z, true));
        assert!(builder.state().buttons[buttons::CAPTURE]);

        builder.process_event(&make_key_event(Key::BTN_THUMBL, true));
        assert!(builder.state().buttons[buttons::LEFT_STICK]);

        builder.process_event(&make_key_event(Key::BTN_THUMBR, true));
        assert!(builder.state().buttons[buttons::RIGHT_STICK]);
    }

    // ==================== State Persistence Tests ====================

    #[test]
    fn test_state_persists_across_events() {
        let mut builder = SnapshotBuilder::new();

        builder.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, STICK_ABS_RANGE));
        builder.process_event(&make_key_event(Key::BTN_TL, true));

        // A later unrelated event leaves earlier state intact
        builder.process_event(&make_key_event(Key::BTN_EAST, true));

        let snap = builder.state();
        assert_eq!(snap.axes[axes::LEFT_STICK_X], 1.0);
        assert!(snap.buttons[buttons::L]);
        assert!(snap.buttons[buttons::A]);
    }

    #[test]
    fn test_sync_events_ignored() {
        let mut builder = SnapshotBuilder::new();

        let event = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);
        builder.process_event(&event);

        assert_eq!(*builder.state(), RawInputSnapshot::default());
    }

    #[test]
    fn test_unknown_axis_ignored() {
        let mut builder = SnapshotBuilder::new();

        let event = make_axis_event(AbsoluteAxisType::ABS_MISC, 100);
        builder.process_event(&event);

        assert_eq!(*builder.state(), RawInputSnapshot::default());
    }
}
