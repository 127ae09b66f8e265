//! # Controller Module
//!
//! Switch Pro Controller input handling.
//!
//! This module handles:
//! - Pro Controller detection and connection via evdev
//! - Accumulating events into a per-cycle input snapshot
//! - Deadzone thresholding and axis quantization

pub mod normalizer;
pub mod procon;
pub mod snapshot;
