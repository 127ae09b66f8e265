//! Trait abstraction for the websocket transport to enable testing

use async_trait::async_trait;
use futures_util::SinkExt;
use std::io;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Trait for outbound websocket operations
#[async_trait]
pub trait Transport: Send {
    /// Send one text frame
    async fn send_text(&mut self, text: String) -> io::Result<()>;

    /// Close the connection
    async fn close(&mut self) -> io::Result<()>;
}

/// Wrapper around a tokio-tungstenite stream that implements Transport
pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    /// Connects to a rosbridge websocket endpoint such as
    /// `ws://localhost:9090`.
    pub async fn connect(url: &str) -> Result<Self, WsError> {
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream })
    }
}

fn ws_to_io(error: WsError) -> io::Error {
    match error {
        WsError::Io(inner) => inner,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send_text(&mut self, text: String) -> io::Result<()> {
        self.stream.send(Message::Text(text)).await.map_err(ws_to_io)
    }

    async fn close(&mut self) -> io::Result<()> {
        match self.stream.close(None).await {
            Ok(()) => Ok(()),
            // Already-closed streams are fine during shutdown
            Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(other) => Err(ws_to_io(other)),
        }
    }
}
