//! # Control Mapper Module
//!
//! The input-to-command mapping engine: per-joint stateful angle
//! accumulation with range clamping, and the differential-drive
//! decision logic that turns four direction signals into a single
//! (linear, angular) velocity pair.
//!
//! ## Update Rules
//!
//! - Button-pair joints (Blade, Swing, Thumb):
//!   `angle += (plus - minus) * speed`, saturating clamp.
//! - Axis joints (Boom, Arm, Bucket): `angle += axis * speed`,
//!   saturating clamp.
//! - Body: `angle += axis * speed`, wraps at ±360° instead of
//!   clamping (continuous rotation).
//!
//! Joint angles accumulate in degrees and are published in radians.
//! All state lives inside [`ControlMapper`]; [`ControlMapper::step`] is
//! total and never fails.
//!
//! ## Drive Decision Table
//!
//! Four inputs: ZL/ZR trigger presses (forward per track) and L/R
//! buttons (reverse per track). First matching row wins:
//!
//! | left+ | right+ | left- | right- | linear | angular |
//! |-------|--------|-------|--------|--------|---------|
//! | 1 | - | 1 | - | 0 | 0 |
//! | - | 1 | - | 1 | 0 | 0 |
//! | 1 | 1 | - | - | +lin | 0 |
//! | - | - | 1 | 1 | -lin | 0 |
//! | 1 | - | - | 1 | 0 | -ang |
//! | - | 1 | 1 | - | 0 | +ang |
//! | 1 | - | - | - | +lin/2 | -ang |
//! | - | 1 | - | - | +lin/2 | +ang |
//! | - | - | 1 | - | -lin/2 | +ang |
//! | - | - | - | 1 | -lin/2 | -ang |
//! | (none) | | | | 0 | 0 |

use super::bindings::Bindings;
use super::channel::{ChannelId, JointRange};
use crate::controller::normalizer::NormalizedInputSnapshot;
use crate::controller::snapshot::TRIGGER_PRESSED;

/// Drive speed and trigger parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveParams {
    /// Full forward/reverse linear speed (m/s).
    pub linear_speed: f64,
    /// Pivot/curve angular speed (rad/s).
    pub angular_speed: f64,
    /// How far below the +1.0 extreme a trigger still counts as
    /// pressed. 0.0 reproduces the strict exact-extreme test.
    pub trigger_tolerance: f64,
}

/// Range table for the six bounded joints plus the Body speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointRanges {
    pub blade: JointRange,
    pub swing: JointRange,
    pub boom: JointRange,
    pub arm: JointRange,
    pub bucket: JointRange,
    pub thumb: JointRange,
    pub body_speed: f64,
}

/// Drive velocity command, computed fresh each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveCommand {
    pub linear: f64,
    pub angular: f64,
}

/// One cycle's command values, one per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandSet {
    pub drive: DriveCommand,
    pub blade_rad: f64,
    pub body_rad: f64,
    pub swing_rad: f64,
    pub boom_rad: f64,
    pub arm_rad: f64,
    pub bucket_rad: f64,
    pub thumb_rad: f64,
}

/// The value a channel publishes this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValue {
    /// Drive channel: velocity pair.
    Drive(DriveCommand),
    /// Rotary joint: absolute angle in radians.
    JointRadians(f64),
}

impl CommandSet {
    /// Returns the value for `channel`, exhaustively over the closed
    /// channel set.
    #[must_use]
    pub fn value(&self, channel: ChannelId) -> ChannelValue {
        match channel {
            ChannelId::Drive => ChannelValue::Drive(self.drive),
            ChannelId::Blade => ChannelValue::JointRadians(self.blade_rad),
            ChannelId::Body => ChannelValue::JointRadians(self.body_rad),
            ChannelId::Swing => ChannelValue::JointRadians(self.swing_rad),
            ChannelId::Boom => ChannelValue::JointRadians(self.boom_rad),
            ChannelId::Arm => ChannelValue::JointRadians(self.arm_rad),
            ChannelId::Bucket => ChannelValue::JointRadians(self.bucket_rad),
            ChannelId::Thumb => ChannelValue::JointRadians(self.thumb_rad),
        }
    }
}

/// A bounded rotary joint accumulator.
#[derive(Debug, Clone, Copy)]
struct Joint {
    angle_deg: f64,
    range: JointRange,
}

impl Joint {
    /// Joint starting at 0°.
    fn new(range: JointRange) -> Self {
        Self { angle_deg: 0.0, range }
    }

    /// Joint starting at its minimum bound (Bucket rests folded in).
    fn at_minimum(range: JointRange) -> Self {
        Self { angle_deg: range.min_deg, range }
    }

    /// Accumulates one cycle of input, saturating at the bounds.
    fn accumulate(&mut self, input: f64) {
        self.angle_deg = self.range.clamp(self.angle_deg + input * self.range.speed);
    }

    fn radians(&self) -> f64 {
        self.angle_deg.to_radians()
    }
}

/// The continuously rotating body joint: wraps instead of clamping.
#[derive(Debug, Clone, Copy)]
struct BodyJoint {
    angle_deg: f64,
    speed: f64,
}

impl BodyJoint {
    fn new(speed: f64) -> Self {
        Self { angle_deg: 0.0, speed }
    }

    /// Accumulates and wraps symmetrically at ±360°.
    fn accumulate(&mut self, input: f64) {
        self.angle_deg += input * self.speed;
        if self.angle_deg <= -360.0 {
            self.angle_deg += 360.0;
        } else if self.angle_deg >= 360.0 {
            self.angle_deg -= 360.0;
        }
    }

    fn radians(&self) -> f64 {
        self.angle_deg.to_radians()
    }
}

/// Maps normalized input snapshots to per-channel commands.
///
/// Owns the persistent per-joint angle state; constructed once and
/// stepped once per cycle by the control loop. There is no external
/// writer and no reset short of process restart.
///
/// # Examples
///
/// ```
/// use excavator_bridge::mapping::bindings::{Bindings, BindingsConfig};
/// use excavator_bridge::mapping::mapper::{ControlMapper, DriveParams, JointRanges};
/// use excavator_bridge::mapping::channel::JointRange;
/// use excavator_bridge::controller::normalizer::normalize;
/// use excavator_bridge::controller::snapshot::RawInputSnapshot;
///
/// let bindings = Bindings::resolve(&BindingsConfig::default())?;
/// let mut mapper = ControlMapper::new(
///     bindings,
///     DriveParams { linear_speed: 1.0, angular_speed: 1.0, trigger_tolerance: 0.05 },
///     JointRanges {
///         blade: JointRange::new(-30.0, 15.0, 1.0),
///         swing: JointRange::new(-49.0, 78.0, 1.0),
///         boom: JointRange::new(-130.0, 0.0, 1.0),
///         arm: JointRange::new(0.0, 120.0, 1.0),
///         bucket: JointRange::new(-70.0, 100.0, 1.0),
///         thumb: JointRange::new(0.0, 140.0, 1.0),
///         body_speed: 1.0,
///     },
/// );
///
/// let norm = normalize(&RawInputSnapshot::default(), 0.2);
/// let commands = mapper.step(&norm);
/// assert_eq!(commands.drive.linear, 0.0);
/// # Ok::<(), excavator_bridge::error::BridgeError>(())
/// ```
#[derive(Debug)]
pub struct ControlMapper {
    bindings: Bindings,
    drive: DriveParams,
    blade: Joint,
    body: BodyJoint,
    swing: Joint,
    boom: Joint,
    arm: Joint,
    bucket: Joint,
    thumb: Joint,
}

impl ControlMapper {
    /// Creates a mapper with all joints at their starting angles.
    ///
    /// Every joint starts at 0° except Bucket, which starts at its
    /// configured minimum.
    #[must_use]
    pub fn new(bindings: Bindings, drive: DriveParams, ranges: JointRanges) -> Self {
        Self {
            bindings,
            drive,
            blade: Joint::new(ranges.blade),
            body: BodyJoint::new(ranges.body_speed),
            swing: Joint::new(ranges.swing),
            boom: Joint::new(ranges.boom),
            arm: Joint::new(ranges.arm),
            bucket: Joint::at_minimum(ranges.bucket),
            thumb: Joint::new(ranges.thumb),
        }
    }

    /// Advances every joint one cycle and computes the drive command.
    ///
    /// Total function of the input and prior state; every input
    /// combination maps to a defined output.
    pub fn step(&mut self, input: &NormalizedInputSnapshot) -> CommandSet {
        let b = self.bindings;

        self.blade
            .accumulate(button_pair(input, b.blade_raise, b.blade_lower));
        self.body.accumulate(input.axes[b.body]);
        self.swing
            .accumulate(button_pair(input, b.swing_left, b.swing_right));
        self.boom.accumulate(input.axes[b.boom]);
        self.arm.accumulate(input.axes[b.arm]);
        self.bucket.accumulate(input.axes[b.bucket]);
        self.thumb
            .accumulate(button_pair(input, b.thumb_open, b.thumb_close));

        CommandSet {
            drive: self.drive_command(input),
            blade_rad: self.blade.radians(),
            body_rad: self.body.radians(),
            swing_rad: self.swing.radians(),
            boom_rad: self.boom.radians(),
            arm_rad: self.arm.radians(),
            bucket_rad: self.bucket.radians(),
            thumb_rad: self.thumb.radians(),
        }
    }

    /// Evaluates the differential-drive decision table.
    fn drive_command(&self, input: &NormalizedInputSnapshot) -> DriveCommand {
        let b = self.bindings;
        let lin = self.drive.linear_speed;
        let ang = self.drive.angular_speed;

        let left_fwd = self.trigger_pressed(input.axes[b.drive_left_forward]);
        let right_fwd = self.trigger_pressed(input.axes[b.drive_right_forward]);
        let left_rev = input.buttons[b.drive_left_reverse];
        let right_rev = input.buttons[b.drive_right_reverse];

        let (linear, angular) = if left_fwd && left_rev {
            (0.0, 0.0) // opposing inputs on the left track
        } else if right_fwd && right_rev {
            (0.0, 0.0) // opposing inputs on the right track
        } else if left_fwd && right_fwd {
            (lin, 0.0) // forward
        } else if left_rev && right_rev {
            (-lin, 0.0) // reverse
        } else if left_fwd && right_rev {
            (0.0, -ang) // pivot right
        } else if right_fwd && left_rev {
            (0.0, ang) // pivot left
        } else if left_fwd {
            (lin / 2.0, -ang) // curve right, forward
        } else if right_fwd {
            (lin / 2.0, ang) // curve left, forward
        } else if left_rev {
            (-lin / 2.0, ang) // curve right, reverse
        } else if right_rev {
            (-lin / 2.0, -ang) // curve left, reverse
        } else {
            (0.0, 0.0)
        };

        DriveCommand { linear, angular }
    }

    /// Trigger press test with a tolerance band below the extreme.
    fn trigger_pressed(&self, value: f64) -> bool {
        value >= TRIGGER_PRESSED - self.drive.trigger_tolerance
    }
}

/// Combines a plus/minus button pair into -1, 0 or +1.
fn button_pair(input: &NormalizedInputSnapshot, plus: usize, minus: usize) -> f64 {
    f64::from(input.buttons[plus] as i8 - input.buttons[minus] as i8)
}
