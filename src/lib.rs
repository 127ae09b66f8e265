//! # Excavator Bridge Library
//!
//! Drive a TB20e mini excavator with a Nintendo Switch Pro Controller
//! over rosbridge.
//!
//! This library provides the core functionality for mapping gamepad
//! inputs to excavator actuator commands: tracked drive velocities plus
//! seven rotary joint angle targets, published as ROS messages over a
//! rosbridge websocket connection.

pub mod config;
pub mod error;
pub mod controller;
pub mod mapping;
pub mod bridge;
