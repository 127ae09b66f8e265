//! # Control Bindings Module
//!
//! Maps logical control actions to physical input indices.
//!
//! Bindings come from configuration as `{ button = N }` or
//! `{ axis = N }` entries and are resolved once, at construction, into
//! a [`Bindings`] table of direct indices. Resolution checks both the
//! binding kind (a drive trigger must be an axis, a blade direction
//! must be a button) and the index range against the fixed input
//! layout; any mismatch is fatal before the control loop starts.
//!
//! ## Default Assignment
//!
//! | Action | Input |
//! |--------|-------|
//! | drive left forward | ZL (axis 4) |
//! | drive right forward | ZR (axis 5) |
//! | drive left reverse | L (button 9) |
//! | drive right reverse | R (button 10) |
//! | blade raise / lower | D-Pad Up / Down (buttons 11/12) |
//! | body | Left Stick X (axis 0) |
//! | swing left / right | D-Pad Left / Right (buttons 13/14) |
//! | boom | Right Stick Y (axis 3) |
//! | arm | Left Stick Y (axis 1) |
//! | bucket | Right Stick X (axis 2) |
//! | thumb open / close | A / X (buttons 0/2) |

use serde::Deserialize;

use crate::controller::snapshot::{axes, buttons, AXIS_COUNT, BUTTON_COUNT};
use crate::error::{BridgeError, Result};

/// A physical input a control action is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InputBinding {
    /// A digital button, by index.
    Button { button: usize },
    /// An analog axis, by index.
    Axis { axis: usize },
}

/// Binding configuration as written in TOML.
///
/// Every field defaults to the stock Pro Controller assignment above.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BindingsConfig {
    pub drive_left_forward: InputBinding,
    pub drive_right_forward: InputBinding,
    pub drive_left_reverse: InputBinding,
    pub drive_right_reverse: InputBinding,
    pub blade_raise: InputBinding,
    pub blade_lower: InputBinding,
    pub body: InputBinding,
    pub swing_left: InputBinding,
    pub swing_right: InputBinding,
    pub boom: InputBinding,
    pub arm: InputBinding,
    pub bucket: InputBinding,
    pub thumb_open: InputBinding,
    pub thumb_close: InputBinding,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            drive_left_forward: InputBinding::Axis { axis: axes::ZL },
            drive_right_forward: InputBinding::Axis { axis: axes::ZR },
            drive_left_reverse: InputBinding::Button { button: buttons::L },
            drive_right_reverse: InputBinding::Button { button: buttons::R },
            blade_raise: InputBinding::Button { button: buttons::UP },
            blade_lower: InputBinding::Button { button: buttons::DOWN },
            body: InputBinding::Axis { axis: axes::LEFT_STICK_X },
            swing_left: InputBinding::Button { button: buttons::LEFT },
            swing_right: InputBinding::Button { button: buttons::RIGHT },
            boom: InputBinding::Axis { axis: axes::RIGHT_STICK_Y },
            arm: InputBinding::Axis { axis: axes::LEFT_STICK_Y },
            bucket: InputBinding::Axis { axis: axes::RIGHT_STICK_X },
            thumb_open: InputBinding::Button { button: buttons::A },
            thumb_close: InputBinding::Button { button: buttons::X },
        }
    }
}

/// Resolved binding table: direct indices, validated shape.
///
/// Axis-typed fields index into the snapshot's `axes`; button-typed
/// fields into `buttons`. No string lookups remain in the hot loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub drive_left_forward: usize,
    pub drive_right_forward: usize,
    pub drive_left_reverse: usize,
    pub drive_right_reverse: usize,
    pub blade_raise: usize,
    pub blade_lower: usize,
    pub body: usize,
    pub swing_left: usize,
    pub swing_right: usize,
    pub boom: usize,
    pub arm: usize,
    pub bucket: usize,
    pub thumb_open: usize,
    pub thumb_close: usize,
}

impl Bindings {
    /// Resolves and validates a binding configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBinding` if an action is bound to the wrong
    /// input kind or to an index outside the fixed layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use excavator_bridge::mapping::bindings::{Bindings, BindingsConfig};
    ///
    /// let bindings = Bindings::resolve(&BindingsConfig::default())?;
    /// assert_eq!(bindings.blade_raise, 11); // D-Pad Up
    /// # Ok::<(), excavator_bridge::error::BridgeError>(())
    /// ```
    pub fn resolve(config: &BindingsConfig) -> Result<Self> {
        Ok(Self {
            drive_left_forward: axis(config.drive_left_forward, "drive_left_forward")?,
            drive_right_forward: axis(config.drive_right_forward, "drive_right_forward")?,
            drive_left_reverse: button(config.drive_left_reverse, "drive_left_reverse")?,
            drive_right_reverse: button(config.drive_right_reverse, "drive_right_reverse")?,
            blade_raise: button(config.blade_raise, "blade_raise")?,
            blade_lower: button(config.blade_lower, "blade_lower")?,
            body: axis(config.body, "body")?,
            swing_left: button(config.swing_left, "swing_left")?,
            swing_right: button(config.swing_right, "swing_right")?,
            boom: axis(config.boom, "boom")?,
            arm: axis(config.arm, "arm")?,
            bucket: axis(config.bucket, "bucket")?,
            thumb_open: button(config.thumb_open, "thumb_open")?,
            thumb_close: button(config.thumb_close, "thumb_close")?,
        })
    }
}

/// Extracts a validated button index.
fn button(binding: InputBinding, action: &str) -> Result<usize> {
    match binding {
        InputBinding::Button { button } if button < BUTTON_COUNT => Ok(button),
        InputBinding::Button { button } => Err(BridgeError::InvalidBinding(format!(
            "{}: button index {} out of range (0-{})",
            action,
            button,
            BUTTON_COUNT - 1
        ))),
        InputBinding::Axis { .. } => Err(BridgeError::InvalidBinding(format!(
            "{}: expected a button binding, got an axis",
            action
        ))),
    }
}

/// Extracts a validated axis index.
fn axis(binding: InputBinding, action: &str) -> Result<usize> {
    match binding {
        InputBinding::Axis { axis } if axis < AXIS_COUNT => Ok(axis),
        InputBinding::Axis { axis } => Err(BridgeError::InvalidBinding(format!(
            "{}: axis index {} out of range (0-{})",
            action,
            axis,
            AXIS_COUNT - 1
        ))),
        InputBinding::Button { .. } => Err(BridgeError::InvalidBinding(format!(
            "{}: expected an axis binding, got a button",
            action
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_resolve() {
        let bindings = Bindings::resolve(&BindingsConfig::default()).unwrap();

        assert_eq!(bindings.drive_left_forward, axes::ZL);
        assert_eq!(bindings.drive_right_forward, axes::ZR);
        assert_eq!(bindings.drive_left_reverse, buttons::L);
        assert_eq!(bindings.drive_right_reverse, buttons::R);
        assert_eq!(bindings.blade_raise, buttons::UP);
        assert_eq!(bindings.blade_lower, buttons::DOWN);
        assert_eq!(bindings.body, axes::LEFT_STICK_X);
        assert_eq!(bindings.swing_left, buttons::LEFT);
        assert_eq!(bindings.swing_right, buttons::RIGHT);
        assert_eq!(bindings.boom, axes::RIGHT_STICK_Y);
        assert_eq!(bindings.arm, axes::LEFT_STICK_Y);
        assert_eq!(bindings.bucket, axes::RIGHT_STICK_X);
        assert_eq!(bindings.thumb_open, buttons::A);
        assert_eq!(bindings.thumb_close, buttons::X);
    }

    #[test]
    fn test_button_index_out_of_range() {
        let mut config = BindingsConfig::default();
        config.blade_raise = InputBinding::Button { button: BUTTON_COUNT };

        let err = Bindings::resolve(&config).unwrap_err();
        match err {
            BridgeError::InvalidBinding(msg) => {
                assert!(msg.contains("blade_raise"));
                assert!(msg.contains("out of range"));
            }
            other => panic!("Expected InvalidBinding, got: {:?}", other),
        }
    }

    #[test]
    fn test_axis_index_out_of_range() {
        let mut config = BindingsConfig::default();
        config.body = InputBinding::Axis { axis: AXIS_COUNT };

        let err = Bindings::resolve(&config).unwrap_err();
        match err {
            BridgeError::InvalidBinding(msg) => {
                assert!(msg.contains("body"));
                assert!(msg.contains("out of range"));
            }
            other => panic!("Expected InvalidBinding, got: {:?}", other),
        }
    }

    #[test]
    fn test_kind_mismatch_button_for_axis() {
        let mut config = BindingsConfig::default();
        config.boom = InputBinding::Button { button: 1 };

        let err = Bindings::resolve(&config).unwrap_err();
        match err {
            BridgeError::InvalidBinding(msg) => {
                assert!(msg.contains("boom"));
                assert!(msg.contains("expected an axis"));
            }
            other => panic!("Expected InvalidBinding, got: {:?}", other),
        }
    }

    #[test]
    fn test_kind_mismatch_axis_for_button() {
        let mut config = BindingsConfig::default();
        config.thumb_open = InputBinding::Axis { axis: 0 };

        let err = Bindings::resolve(&config).unwrap_err();
        match err {
            BridgeError::InvalidBinding(msg) => {
                assert!(msg.contains("thumb_open"));
                assert!(msg.contains("expected a button"));
            }
            other => panic!("Expected InvalidBinding, got: {:?}", other),
        }
    }

    #[test]
    fn test_binding_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            binding: InputBinding,
        }

        let parsed: Wrapper = toml::from_str("binding = { button = 11 }").unwrap();
        assert_eq!(parsed.binding, InputBinding::Button { button: 11 });

        let parsed: Wrapper = toml::from_str("binding = { axis = 3 }").unwrap();
        assert_eq!(parsed.binding, InputBinding::Axis { axis: 3 });
    }
}
