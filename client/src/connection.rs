//! Transport seam: a text socket that can be reopened on demand

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A full-duplex text connection to the battle server
#[async_trait]
pub trait Transport: Send {
    async fn send(&mut self, text: String) -> Result<()>;

    /// Wait for the next text frame. Any error ends the connection.
    async fn recv(&mut self) -> Result<String>;
}

/// Opens fresh transports, for the first connect and every reconnect
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn Transport>>;
}

/// WebSocket transport; pings are answered here and never surface
pub struct WebSocketTransport {
    ws: WsStream,
}

impl WebSocketTransport {
    pub async fn connect(url: &str) -> Result<Self> {
        let (ws, _response) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Ok(Self { ws })
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, text: String) -> Result<()> {
        self.ws
            .send(Message::Text(text))
            .await
            .context("Failed to send message")
    }

    async fn recv(&mut self) -> Result<String> {
        while let Some(message) = self.ws.next().await {
            match message.context("WebSocket error")? {
                Message::Text(text) => return Ok(text),
                Message::Ping(data) => self
                    .ws
                    .send(Message::Pong(data))
                    .await
                    .context("Failed to send pong")?,
                Message::Close(frame) => bail!("Connection closed by server: {:?}", frame),
                _ => {}
            }
        }

        bail!("Connection closed")
    }
}

/// Connects to a fixed websocket url
#[derive(Debug, Clone)]
pub struct WebSocketConnector {
    url: String,
}

impl WebSocketConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self) -> Result<Box<dyn Transport>> {
        let transport = WebSocketTransport::connect(&self.url).await?;
        Ok(Box::new(transport))
    }
}
