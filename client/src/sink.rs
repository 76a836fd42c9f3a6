//! Output side of a session

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use scout_battle::{BattleEnd, Snapshot};
use serde::Serialize;
use tokio::sync::mpsc;

/// Lifecycle notices shown to whoever watches the session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusNotice {
    Connected { room: String },
    ConnectFailed { error: String },
    Reconnecting { attempt: usize, max_attempts: usize },
    PersistentError { error: String },
    BattleFinished { outcome: BattleEnd },
}

/// One unit of session output, in production order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Fragment {
    Status(StatusNotice),
    /// A notable protocol line, echoed verbatim
    LogLine(String),
    Snapshot(Box<Snapshot>),
    Keepalive,
}

/// Receives session output. `emit` returns once the fragment is delivered;
/// an error means the consumer is gone.
#[async_trait]
pub trait OutputSink: Send {
    async fn emit(&mut self, fragment: Fragment) -> Result<()>;
}

/// Sink backed by a bounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Fragment>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Fragment>) -> Self {
        Self { tx }
    }

    /// A sink plus the receiving end, with room for `buffer` fragments
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Fragment>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl OutputSink for ChannelSink {
    async fn emit(&mut self, fragment: Fragment) -> Result<()> {
        self.tx
            .send(fragment)
            .await
            .map_err(|_| anyhow!("Output closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_sink_in_order() {
        let (mut sink, mut rx) = ChannelSink::channel(4);
        sink.emit(Fragment::Keepalive).await.unwrap();
        sink.emit(Fragment::LogLine("|turn|1".to_string()))
            .await
            .unwrap();

        assert_eq!(rx.recv().await, Some(Fragment::Keepalive));
        assert_eq!(rx.recv().await, Some(Fragment::LogLine("|turn|1".to_string())));
    }

    #[tokio::test]
    async fn test_channel_sink_closed() {
        let (mut sink, rx) = ChannelSink::channel(1);
        drop(rx);
        assert!(sink.emit(Fragment::Keepalive).await.is_err());
    }

    #[test]
    fn test_fragment_json() {
        let status = Fragment::Status(StatusNotice::Reconnecting {
            attempt: 1,
            max_attempts: 3,
        });
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["kind"], "status");
        assert_eq!(json["data"]["status"], "reconnecting");
        assert_eq!(json["data"]["attempt"], 1);

        let json = serde_json::to_value(Fragment::Keepalive).unwrap();
        assert_eq!(json["kind"], "keepalive");

        let finished = Fragment::Status(StatusNotice::BattleFinished {
            outcome: BattleEnd::Won("Ash".to_string()),
        });
        let json = serde_json::to_value(&finished).unwrap();
        assert_eq!(json["data"]["outcome"]["won"], "Ash");
    }
}
