//! # Input Normalizer Module
//!
//! Deadzone thresholding and fixed-precision quantization of raw axis
//! values, applied once per cycle before the control mapping step.
//!
//! Each axis is rounded to the nearest 0.01 with ties rounded away from
//! zero (`f64::round` semantics), then any value whose magnitude falls
//! below the configured deadzone is forced to exactly 0.0. Buttons and
//! hats pass through unchanged.

use super::snapshot::{HatDirection, RawInputSnapshot};

/// A snapshot whose axes have been quantized and deadzone-filtered.
///
/// Same shape as [`RawInputSnapshot`]; the distinct type keeps
/// un-normalized input out of the control mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInputSnapshot {
    pub buttons: Vec<bool>,
    pub axes: Vec<f64>,
    pub hats: Vec<HatDirection>,
}

/// Normalizes a raw snapshot.
///
/// Pure function, no failure modes: every axis value maps to a defined
/// output.
///
/// # Examples
///
/// ```
/// use excavator_bridge::controller::normalizer::normalize;
/// use excavator_bridge::controller::snapshot::{RawInputSnapshot, axes};
///
/// let mut raw = RawInputSnapshot::default();
/// raw.axes[axes::LEFT_STICK_X] = 0.126; // rounds to 0.13
/// raw.axes[axes::LEFT_STICK_Y] = 0.05;  // below deadzone
///
/// let norm = normalize(&raw, 0.2);
/// assert_eq!(norm.axes[axes::LEFT_STICK_X], 0.0); // 0.13 < 0.2
/// assert_eq!(norm.axes[axes::LEFT_STICK_Y], 0.0);
/// ```
#[must_use]
pub fn normalize(raw: &RawInputSnapshot, deadzone: f64) -> NormalizedInputSnapshot {
    let axes = raw
        .axes
        .iter()
        .map(|&a| {
            let quantized = quantize(a);
            if quantized.abs() < deadzone {
                0.0
            } else {
                quantized
            }
        })
        .collect();

    NormalizedInputSnapshot {
        buttons: raw.buttons.clone(),
        axes,
        hats: raw.hats.clone(),
    }
}

/// Rounds to the nearest 0.01, ties away from zero.
#[inline]
fn quantize(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
