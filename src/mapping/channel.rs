//! # Command Channels
//!
//! Identifiers for the eight actuator channels of the TB20e and the
//! static per-joint range table.
//!
//! ## Channels
//!
//! | Channel | Kind | Input |
//! |---------|------|-------|
//! | Drive | Twist velocity | ZL/ZR triggers + L/R buttons |
//! | Blade | angle (rad) | D-Pad Up/Down |
//! | Body | angle (rad), continuous | Left Stick X |
//! | Swing | angle (rad) | D-Pad Left/Right |
//! | Boom | angle (rad) | Right Stick Y |
//! | Arm | angle (rad) | Left Stick Y |
//! | Bucket | angle (rad) | Right Stick X |
//! | Thumb | angle (rad) | A/X buttons |

/// One independently commanded actuator or motion mode.
///
/// Closed set: adding a channel is a compile-time change, and every
/// dispatch over `ChannelId` is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// Tracked drive base (linear + angular velocity).
    Drive,
    /// Dozer blade.
    Blade,
    /// Upper body rotation (continuous, unbounded).
    Body,
    /// Boom swing.
    Swing,
    /// Boom.
    Boom,
    /// Arm.
    Arm,
    /// Bucket.
    Bucket,
    /// Thumb attachment.
    Thumb,
}

impl ChannelId {
    /// All channels in publish order.
    pub const ALL: [ChannelId; 8] = [
        ChannelId::Drive,
        ChannelId::Blade,
        ChannelId::Body,
        ChannelId::Swing,
        ChannelId::Boom,
        ChannelId::Arm,
        ChannelId::Bucket,
        ChannelId::Thumb,
    ];

    /// Short channel name used in logs and config keys.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ChannelId::Drive => "drive",
            ChannelId::Blade => "blade",
            ChannelId::Body => "body",
            ChannelId::Swing => "swing",
            ChannelId::Boom => "boom",
            ChannelId::Arm => "arm",
            ChannelId::Bucket => "bucket",
            ChannelId::Thumb => "thumb",
        }
    }

    /// rosbridge message type identifier for this channel's topic.
    ///
    /// Drive publishes a velocity `Twist`; every rotary joint publishes
    /// a single scalar in radians.
    #[must_use]
    pub fn message_type(self) -> &'static str {
        match self {
            ChannelId::Drive => "geometry_msgs/msg/Twist",
            _ => "std_msgs/msg/Float64",
        }
    }
}

/// Movement range and per-cycle speed for one rotary joint.
///
/// Invariant: `min_deg <= max_deg` (enforced by config validation).
/// `speed` is the angle increment in degrees applied per full-scale
/// input per cycle; a negative speed inverts the accumulation
/// direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointRange {
    pub min_deg: f64,
    pub max_deg: f64,
    pub speed: f64,
}

impl JointRange {
    /// Creates a joint range.
    #[must_use]
    pub fn new(min_deg: f64, max_deg: f64, speed: f64) -> Self {
        Self { min_deg, max_deg, speed }
    }

    /// Saturating clamp: pins `angle_deg` to the range bounds.
    ///
    /// At or past a bound the angle is set exactly to the bound, with
    /// no overshoot carry-over.
    #[must_use]
    pub fn clamp(&self, angle_deg: f64) -> f64 {
        if angle_deg <= self.min_deg {
            self.min_deg
        } else if angle_deg >= self.max_deg {
            self.max_deg
        } else {
            angle_deg
        }
    }
}
