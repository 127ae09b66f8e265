//! # Excavator Bridge
//!
//! Drive a TB20e mini excavator with a Nintendo Switch Pro Controller
//! over rosbridge.
//!
//! This application maps gamepad inputs to excavator actuator commands
//! and publishes them as ROS messages at a fixed cadence.

use anyhow::{Context, Result};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};
use tracing_subscriber;

mod bridge;
mod config;
mod controller;
mod error;
mod mapping;

use bridge::RosBridgeClient;
use config::Config;
use controller::normalizer::normalize;
use controller::procon::ProController;
use controller::snapshot::SnapshotBuilder;
use mapping::bindings::Bindings;
use mapping::mapper::ControlMapper;

/// Configuration file used when no path argument is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Number of publish cycles between status log messages
const LOG_INTERVAL_CYCLES: u64 = 100;

/// Main entry point for the excavator bridge application
///
/// Initializes the application and runs the main control loop that
/// samples controller state and publishes one command per channel at
/// the configured cadence.
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load and validate configuration
///    - Open the Pro Controller (configured path or auto-detect)
///    - Connect to rosbridge and advertise all output topics
///
/// 2. **Main Loop**
///    - Fold controller events into the current input snapshot
///    - On each tick: normalize, step the mapper, publish all channels
///    - Log status every 100 cycles (~10 seconds at the default 10Hz)
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Unadvertise all topics
///    - Close the bridge connection
///    - Clean exit
///
/// # Errors
///
/// Returns error if:
/// - Configuration cannot be loaded or is invalid
/// - No Pro Controller is found
/// - The rosbridge connection cannot be established
/// - The controller event stream fails (device disconnect)
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Excavator Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    info!("Loaded configuration from {}", config_path);

    let bindings = Bindings::resolve(&config.bindings).context("Invalid control bindings")?;
    let mut mapper = ControlMapper::new(bindings, config.drive_params(), config.joint_ranges());

    let controller = ProController::open(&config.controller.device_path)
        .context("Failed to open Pro Controller")?;
    info!(
        "Controller opened at: {} ({})",
        controller.device_path(),
        controller.name().unwrap_or("unknown")
    );
    let mut events = controller.into_event_stream()?;
    let mut snapshot = SnapshotBuilder::new();

    let mut client = RosBridgeClient::connect(&config.bridge.host, config.bridge.port).await?;
    client.advertise_channels(&config).await?;

    let mut tick = interval(Duration::from_millis(config.sampling.interval_ms));
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Starting control loop at {}ms intervals",
        config.sampling.interval_ms
    );
    info!("Press Ctrl+C to exit");

    let mut cycle_count: u64 = 0;
    let mut last_log_count: u64 = 0;

    // Main control loop
    loop {
        tokio::select! {
            // Fold controller events into the current snapshot
            event = events.next_event() => {
                let event = event.context("Controller event stream failed")?;
                snapshot.process_event(&event);
            }

            // Publish one command per channel at the configured cadence
            _ = tick.tick() => {
                let input = normalize(snapshot.state(), config.controller.deadzone);
                let commands = mapper.step(&input);

                if let Err(e) = client.publish_commands(&config, &commands).await {
                    debug!("Publish failed: {}", e);
                    return Err(e).context("Bridge connection lost");
                }

                cycle_count += 1;
                debug!(
                    "Cycle {}: drive linear={:.2} angular={:.2}",
                    cycle_count, commands.drive.linear, commands.drive.angular
                );
                if cycle_count - last_log_count >= LOG_INTERVAL_CYCLES {
                    info!(
                        "Published {} cycles (drive linear={:.2} angular={:.2})",
                        cycle_count, commands.drive.linear, commands.drive.angular
                    );
                    last_log_count = cycle_count;
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total cycles published: {}", cycle_count);
                break;
            }
        }
    }

    client.shutdown().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        assert_eq!(DEFAULT_CONFIG_PATH, "config/default.toml");
    }

    #[test]
    fn test_log_interval_constant() {
        // At the default 10Hz cadence, 100 cycles
        let seconds = LOG_INTERVAL_CYCLES as f64 * 0.1;
        assert_eq!(seconds, 10.0, "Log interval should be 10 seconds at 10Hz");
    }
}
