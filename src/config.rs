//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::mapping::bindings::BindingsConfig;
use crate::mapping::channel::{ChannelId, JointRange};
use crate::mapping::mapper::{DriveParams, JointRanges};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub bridge: BridgeEndpointConfig,
    pub controller: ControllerConfig,
    pub sampling: SamplingConfig,
    pub drive: DriveConfig,
    pub joints: JointsConfig,
    pub topics: TopicsConfig,
    #[serde(default)]
    pub bindings: BindingsConfig,
}

/// rosbridge endpoint configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BridgeEndpointConfig {
    #[serde(default = "default_bridge_host")]
    pub host: String,

    #[serde(default = "default_bridge_port")]
    pub port: u16,
}

/// Controller configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ControllerConfig {
    #[serde(default)]
    pub device_path: String,

    #[serde(default = "default_deadzone")]
    pub deadzone: f64,

    #[serde(default = "default_trigger_tolerance")]
    pub trigger_tolerance: f64,
}

/// Control loop cadence configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SamplingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Track drive speed configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DriveConfig {
    #[serde(default = "default_drive_speed")]
    pub linear_speed: f64,

    #[serde(default = "default_drive_speed")]
    pub angular_speed: f64,
}

/// Per-joint range and speed configuration
#[derive(Debug, Deserialize, Clone)]
pub struct JointsConfig {
    #[serde(default = "default_blade_joint")]
    pub blade: JointConfig,

    #[serde(default = "default_body_joint")]
    pub body: BodyJointConfig,

    #[serde(default = "default_swing_joint")]
    pub swing: JointConfig,

    #[serde(default = "default_boom_joint")]
    pub boom: JointConfig,

    #[serde(default = "default_arm_joint")]
    pub arm: JointConfig,

    #[serde(default = "default_bucket_joint")]
    pub bucket: JointConfig,

    #[serde(default = "default_thumb_joint")]
    pub thumb: JointConfig,
}

/// Range bounds and speed for one bounded joint
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct JointConfig {
    pub min_deg: f64,
    pub max_deg: f64,

    #[serde(default = "default_joint_speed")]
    pub speed: f64,
}

/// Speed for the unbounded body joint
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BodyJointConfig {
    #[serde(default = "default_joint_speed")]
    pub speed: f64,
}

/// Output topic configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TopicsConfig {
    #[serde(default = "default_drive_topic")]
    pub drive: String,

    #[serde(default = "default_blade_topic")]
    pub blade: String,

    #[serde(default = "default_body_topic")]
    pub body: String,

    #[serde(default = "default_swing_topic")]
    pub swing: String,

    #[serde(default = "default_boom_topic")]
    pub boom: String,

    #[serde(default = "default_arm_topic")]
    pub arm: String,

    #[serde(default = "default_bucket_topic")]
    pub bucket: String,

    #[serde(default = "default_thumb_topic")]
    pub thumb: String,
}

// Default value functions
fn default_bridge_host() -> String { "localhost".to_string() }
fn default_bridge_port() -> u16 { 9090 }

fn default_deadzone() -> f64 { 0.2 }
fn default_trigger_tolerance() -> f64 { 0.05 }

fn default_interval_ms() -> u64 { 100 }

fn default_drive_speed() -> f64 { 1.0 }
fn default_joint_speed() -> f64 { 1.0 }

fn default_blade_joint() -> JointConfig {
    JointConfig { min_deg: -30.0, max_deg: 15.0, speed: default_joint_speed() }
}
fn default_body_joint() -> BodyJointConfig {
    BodyJointConfig { speed: default_joint_speed() }
}
fn default_swing_joint() -> JointConfig {
    JointConfig { min_deg: -49.0, max_deg: 78.0, speed: default_joint_speed() }
}
fn default_boom_joint() -> JointConfig {
    JointConfig { min_deg: -130.0, max_deg: 0.0, speed: default_joint_speed() }
}
fn default_arm_joint() -> JointConfig {
    JointConfig { min_deg: 0.0, max_deg: 120.0, speed: default_joint_speed() }
}
fn default_bucket_joint() -> JointConfig {
    JointConfig { min_deg: -70.0, max_deg: 100.0, speed: default_joint_speed() }
}
fn default_thumb_joint() -> JointConfig {
    JointConfig { min_deg: 0.0, max_deg: 140.0, speed: default_joint_speed() }
}

fn default_drive_topic() -> String { "/tb20e/tracks/cmd_vel".to_string() }
fn default_blade_topic() -> String { "/tb20e/blade/cmd".to_string() }
fn default_body_topic() -> String { "/tb20e/body/cmd".to_string() }
fn default_swing_topic() -> String { "/tb20e/swing/cmd".to_string() }
fn default_boom_topic() -> String { "/tb20e/boom/cmd".to_string() }
fn default_arm_topic() -> String { "/tb20e/arm/cmd".to_string() }
fn default_bucket_topic() -> String { "/tb20e/bucket/cmd".to_string() }
fn default_thumb_topic() -> String { "/tb20e/thumb/cmd".to_string() }

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use excavator_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.bridge.host.is_empty() {
            return Err(crate::error::BridgeError::Config(
                toml::de::Error::custom("bridge host cannot be empty")
            ));
        }

        if self.bridge.port == 0 {
            return Err(crate::error::BridgeError::Config(
                toml::de::Error::custom("bridge port must be greater than 0")
            ));
        }

        // Controller device_path can be empty (auto-detect)
        let _ = &self.controller.device_path;

        if self.controller.deadzone < 0.0 || self.controller.deadzone >= 1.0 {
            return Err(crate::error::BridgeError::Config(
                toml::de::Error::custom("deadzone must be between 0.0 and 1.0 (exclusive)")
            ));
        }

        if self.controller.trigger_tolerance < 0.0 || self.controller.trigger_tolerance > 0.5 {
            return Err(crate::error::BridgeError::Config(
                toml::de::Error::custom("trigger_tolerance must be between 0.0 and 0.5")
            ));
        }

        if self.sampling.interval_ms == 0 || self.sampling.interval_ms > 10000 {
            return Err(crate::error::BridgeError::Config(
                toml::de::Error::custom("interval_ms must be between 1 and 10000")
            ));
        }

        if self.drive.linear_speed <= 0.0 {
            return Err(crate::error::BridgeError::Config(
                toml::de::Error::custom("linear_speed must be greater than 0")
            ));
        }

        if self.drive.angular_speed <= 0.0 {
            return Err(crate::error::BridgeError::Config(
                toml::de::Error::custom("angular_speed must be greater than 0")
            ));
        }

        for (name, joint) in [
            ("blade", self.joints.blade),
            ("swing", self.joints.swing),
            ("boom", self.joints.boom),
            ("arm", self.joints.arm),
            ("bucket", self.joints.bucket),
            ("thumb", self.joints.thumb),
        ] {
            if joint.min_deg >= joint.max_deg {
                return Err(crate::error::BridgeError::Config(
                    toml::de::Error::custom(format!("{} min_deg must be less than max_deg", name))
                ));
            }
        }

        for channel in ChannelId::ALL {
            let topic = self.topic_for(channel);
            if topic.is_empty() || !topic.starts_with('/') {
                return Err(crate::error::BridgeError::Config(
                    toml::de::Error::custom(format!(
                        "{} topic must be non-empty and start with '/'",
                        channel.name()
                    ))
                ));
            }
        }

        // Topics must be unique, one publisher per topic
        for (i, a) in ChannelId::ALL.iter().enumerate() {
            for b in &ChannelId::ALL[i + 1..] {
                if self.topic_for(*a) == self.topic_for(*b) {
                    return Err(crate::error::BridgeError::Config(
                        toml::de::Error::custom(format!(
                            "{} and {} share the topic {}",
                            a.name(),
                            b.name(),
                            self.topic_for(*a)
                        ))
                    ));
                }
            }
        }

        Ok(())
    }

    /// Output topic for a channel
    #[must_use]
    pub fn topic_for(&self, channel: ChannelId) -> &str {
        match channel {
            ChannelId::Drive => &self.topics.drive,
            ChannelId::Blade => &self.topics.blade,
            ChannelId::Body => &self.topics.body,
            ChannelId::Swing => &self.topics.swing,
            ChannelId::Boom => &self.topics.boom,
            ChannelId::Arm => &self.topics.arm,
            ChannelId::Bucket => &self.topics.bucket,
            ChannelId::Thumb => &self.topics.thumb,
        }
    }

    /// Joint range table for the mapper
    #[must_use]
    pub fn joint_ranges(&self) -> JointRanges {
        let range = |j: JointConfig| JointRange::new(j.min_deg, j.max_deg, j.speed);
        JointRanges {
            blade: range(self.joints.blade),
            swing: range(self.joints.swing),
            boom: range(self.joints.boom),
            arm: range(self.joints.arm),
            bucket: range(self.joints.bucket),
            thumb: range(self.joints.thumb),
            body_speed: self.joints.body.speed,
        }
    }

    /// Drive parameters for the mapper
    #[must_use]
    pub fn drive_params(&self) -> DriveParams {
        DriveParams {
            linear_speed: self.drive.linear_speed,
            angular_speed: self.drive.angular_speed,
            trigger_tolerance: self.controller.trigger_tolerance,
        }
    }
}
