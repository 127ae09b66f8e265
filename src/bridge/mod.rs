//! # Bridge Module
//!
//! The rosbridge publishing client: topic advertisement, per-cycle
//! command publication, and graceful unadvertise on shutdown.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `messages` | rosbridge frame and ROS payload serde types |
//! | `transport` | Websocket transport trait and implementation |

pub mod messages;
pub mod transport;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::mapping::channel::ChannelId;
use crate::mapping::mapper::{ChannelValue, CommandSet};
use self::messages::{BridgeOp, Float64, Twist};
use self::transport::{Transport, WsTransport};

/// Publishing client over a rosbridge websocket connection.
///
/// Generic over [`Transport`] so tests can capture sent frames without
/// a live server. Tracks which topics are currently advertised so
/// shutdown can withdraw them.
pub struct RosBridgeClient<T: Transport> {
    transport: T,
    advertised: Vec<String>,
}

impl RosBridgeClient<WsTransport> {
    /// Connects to the rosbridge server at `ws://host:port`.
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let url = format!("ws://{}:{}", host, port);
        info!("Connecting to rosbridge at {}", url);
        let transport = WsTransport::connect(&url)
            .await
            .map_err(|e| BridgeError::Bridge(format!("connect to {} failed: {}", url, e)))?;
        info!("Connected to rosbridge");
        Ok(Self::new(transport))
    }
}

impl<T: Transport> RosBridgeClient<T> {
    /// Creates a client over an already-open transport.
    pub fn new(transport: T) -> Self {
        Self { transport, advertised: Vec::new() }
    }

    /// Advertises one topic with its ROS message type.
    pub async fn advertise(&mut self, topic: &str, msg_type: &str) -> Result<()> {
        self.send(&BridgeOp::Advertise { topic, msg_type }).await?;
        self.advertised.push(topic.to_string());
        debug!("Advertised {} as {}", topic, msg_type);
        Ok(())
    }

    /// Publishes one serializable message on `topic`.
    pub async fn publish<M: serde::Serialize>(&mut self, topic: &str, msg: &M) -> Result<()> {
        let payload = serde_json::to_value(msg)
            .map_err(|e| BridgeError::Bridge(format!("encode message for {}: {}", topic, e)))?;
        self.send(&BridgeOp::Publish { topic, msg: payload }).await
    }

    /// Withdraws one topic registration.
    pub async fn unadvertise(&mut self, topic: &str) -> Result<()> {
        self.send(&BridgeOp::Unadvertise { topic }).await?;
        self.advertised.retain(|t| t != topic);
        Ok(())
    }

    /// Advertises every output channel from the topic configuration.
    pub async fn advertise_channels(&mut self, config: &Config) -> Result<()> {
        for channel in ChannelId::ALL {
            self.advertise(config.topic_for(channel), channel.message_type())
                .await?;
        }
        Ok(())
    }

    /// Publishes one cycle's command set, one frame per channel.
    pub async fn publish_commands(&mut self, config: &Config, commands: &CommandSet) -> Result<()> {
        for channel in ChannelId::ALL {
            let topic = config.topic_for(channel);
            match commands.value(channel) {
                ChannelValue::Drive(drive) => {
                    self.publish(topic, &Twist::planar(drive.linear, drive.angular))
                        .await?;
                }
                ChannelValue::JointRadians(rad) => {
                    self.publish(topic, &Float64 { data: rad }).await?;
                }
            }
        }
        Ok(())
    }

    /// Unadvertises every registered topic and closes the connection.
    ///
    /// Failures while unadvertising are logged and skipped so a broken
    /// connection still gets closed.
    pub async fn shutdown(&mut self) {
        let topics = std::mem::take(&mut self.advertised);
        for topic in &topics {
            if let Err(e) = self.send(&BridgeOp::Unadvertise { topic }).await {
                warn!("Failed to unadvertise {}: {}", topic, e);
            }
        }
        if let Err(e) = self.transport.close().await {
            warn!("Failed to close bridge connection: {}", e);
        }
        info!("Bridge connection closed");
    }

    async fn send(&mut self, frame: &BridgeOp<'_>) -> Result<()> {
        let text = serde_json::to_string(frame)
            .map_err(|e| BridgeError::Bridge(format!("encode frame: {}", e)))?;
        self.transport.send_text(text).await?;
        Ok(())
    }
}
