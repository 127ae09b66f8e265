//! # Mapping Module
//!
//! Turns normalized controller input into excavator commands: the
//! channel catalog, the input binding table, and the stateful
//! input-to-command mapper.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `channel` | Output channel catalog and joint range type |
//! | `bindings` | Configurable control-to-input assignments |
//! | `mapper` | Per-joint angle state and drive decision logic |

pub mod bindings;
pub mod channel;
pub mod mapper;
