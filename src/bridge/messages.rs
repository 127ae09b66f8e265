//! # Bridge Messages Module
//!
//! Serde types for the rosbridge JSON wire protocol and the two ROS
//! message payloads this bridge publishes.
//!
//! ## Protocol Operations
//!
//! | Op | Fields | Purpose |
//! |----|--------|---------|
//! | `advertise` | `topic`, `type` | Register a topic before publishing |
//! | `publish` | `topic`, `msg` | Send one message on a topic |
//! | `unadvertise` | `topic` | Withdraw a topic registration |
//!
//! ## Payload Types
//!
//! | ROS type | Rust type | Used by |
//! |----------|-----------|---------|
//! | `geometry_msgs/msg/Twist` | [`Twist`] | Drive channel |
//! | `std_msgs/msg/Float64` | [`Float64`] | Joint channels |

use serde::Serialize;

/// A rosbridge protocol frame.
///
/// Serializes with an `"op"` discriminator field, matching the
/// rosbridge v2 JSON framing.
///
/// # Examples
///
/// ```
/// use excavator_bridge::bridge::messages::BridgeOp;
///
/// let frame = BridgeOp::Advertise {
///     topic: "/tb20e/boom/cmd",
///     msg_type: "std_msgs/msg/Float64",
/// };
/// let json = serde_json::to_string(&frame)?;
/// assert_eq!(
///     json,
///     r#"{"op":"advertise","topic":"/tb20e/boom/cmd","type":"std_msgs/msg/Float64"}"#
/// );
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum BridgeOp<'a> {
    /// Registers `topic` with its ROS message type.
    Advertise {
        topic: &'a str,
        #[serde(rename = "type")]
        msg_type: &'a str,
    },
    /// Publishes one message on a previously advertised topic.
    Publish {
        topic: &'a str,
        msg: serde_json::Value,
    },
    /// Withdraws a topic registration.
    Unadvertise { topic: &'a str },
}

/// `geometry_msgs/msg/Vector3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// `geometry_msgs/msg/Twist`: linear and angular velocity vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Twist {
    /// Planar drive twist: forward velocity on `linear.x`, yaw rate on
    /// `angular.z`, all other components zero.
    #[must_use]
    pub fn planar(linear_x: f64, angular_z: f64) -> Self {
        Self {
            linear: Vector3 { x: linear_x, ..Vector3::default() },
            angular: Vector3 { z: angular_z, ..Vector3::default() },
        }
    }
}

/// `std_msgs/msg/Float64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Float64 {
    pub data: f64,
}
