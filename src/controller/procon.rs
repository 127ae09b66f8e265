//! # Switch Pro Controller Module
//!
//! This module handles Pro Controller detection, connection, and event
//! stream setup using the Linux evdev interface.
//!
//! ## Controller Detection
//!
//! The Pro Controller is identified by:
//! - Vendor ID: 0x057e (Nintendo)
//! - Product ID: 0x2009 (Pro Controller, USB and Bluetooth)

use evdev::Device;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{BridgeError, Result};

/// Nintendo vendor ID
const PROCON_VENDOR_ID: u16 = 0x057e;

/// Switch Pro Controller product ID
const PROCON_PRODUCT_ID: u16 = 0x2009;

/// Switch Pro Controller handle
///
/// Represents an active connection to a Pro Controller via evdev.
pub struct ProController {
    device: Device,
    device_path: String,
}

impl std::fmt::Debug for ProController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProController")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl ProController {
    /// Detect and open the first available Pro Controller.
    ///
    /// Scans `/dev/input/event*` devices in sorted order and matches on
    /// vendor and product IDs. An explicit non-empty `device_path`
    /// skips detection and opens that device directly.
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no Pro Controller found on the system
    /// - `Controller`: permission denied or other open errors
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use excavator_bridge::controller::procon::ProController;
    ///
    /// let controller = ProController::open("")?;
    /// println!("Connected to controller at: {}", controller.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(device_path: &str) -> Result<Self> {
        if !device_path.is_empty() {
            let device = Device::open(device_path).map_err(|e| {
                BridgeError::Controller(format!("Failed to open {}: {}", device_path, e))
            })?;
            info!("Opened controller at configured path: {}", device_path);
            return Ok(ProController {
                device,
                device_path: device_path.to_string(),
            });
        }

        Self::detect()
    }

    /// Scan /dev/input for a Pro Controller.
    fn detect() -> Result<Self> {
        let input_dir = Path::new("/dev/input");

        if !input_dir.exists() {
            return Err(BridgeError::Controller(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| BridgeError::Controller(format!("Failed to read /dev/input: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                BridgeError::Controller(format!("Failed to read directory entry: {}", e))
            })?;

        // Sort for deterministic selection when multiple pads are connected
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            if let Some(filename) = path.file_name() {
                if !filename.to_string_lossy().starts_with("event") {
                    continue;
                }
            } else {
                continue;
            }

            match Device::open(&path) {
                Ok(device) => {
                    let id = device.input_id();
                    debug!(
                        "Found input device: {} (vendor: 0x{:04x}, product: 0x{:04x})",
                        path.display(),
                        id.vendor(),
                        id.product()
                    );

                    if id.vendor() == PROCON_VENDOR_ID && id.product() == PROCON_PRODUCT_ID {
                        let device_path = path.to_string_lossy().to_string();
                        info!("Found Switch Pro Controller at: {}", device_path);

                        return Ok(ProController {
                            device,
                            device_path,
                        });
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(BridgeError::ControllerNotFound)
    }

    /// Get the device path of this controller.
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Get the controller name from evdev, typically "Pro Controller".
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    /// Convert into an async event stream for the control loop.
    ///
    /// Consumes the controller; the stream yields events as the kernel
    /// delivers them, and a read error means the device went away.
    ///
    /// # Errors
    ///
    /// Returns `Controller` error if the device cannot be switched to
    /// stream mode.
    pub fn into_event_stream(self) -> Result<evdev::EventStream> {
        self.device.into_event_stream().map_err(|e| {
            BridgeError::Controller(format!("Failed to open event stream: {}", e))
        })
    }
}
