//! Background producers feeding the session loop
//!
//! A [`Pump`] owns one connection epoch: a reader task draining the transport
//! and a keepalive task emitting ping markers. Both push into the session's
//! bounded [`FrameQueue`] and block while it is full. A broadcast done signal
//! stops them; dropping the pump closes that signal, which stops them too.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::connection::Transport;

/// Items produced for the session loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpEvent {
    /// A raw text frame from the server
    Frame(String),
    /// Keepalive tick
    Ping,
    /// The transport failed; the reader has stopped
    ReadError(String),
}

/// Bounded queue between producers and the single session consumer
pub struct FrameQueue {
    tx: mpsc::Sender<PumpEvent>,
    rx: mpsc::Receiver<PumpEvent>,
}

impl FrameQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self { tx, rx }
    }

    /// A producer handle
    pub fn sender(&self) -> mpsc::Sender<PumpEvent> {
        self.tx.clone()
    }

    pub async fn recv(&mut self) -> Option<PumpEvent> {
        self.rx.recv().await
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Refuse further pushes; queued events can still be drained
    pub fn close(&mut self) {
        self.rx.close();
    }
}

/// Producer tasks of one connection epoch
pub struct Pump {
    done: broadcast::Sender<()>,
    reader: JoinHandle<()>,
    keepalive: JoinHandle<()>,
}

impl Pump {
    pub fn start(
        transport: Box<dyn Transport>,
        queue: mpsc::Sender<PumpEvent>,
        keepalive_interval: Duration,
    ) -> Self {
        let (done, _) = broadcast::channel(1);

        let reader = tokio::spawn(read_loop(transport, queue.clone(), done.subscribe()));
        let keepalive = tokio::spawn(keepalive_loop(keepalive_interval, queue, done.subscribe()));

        Self {
            done,
            reader,
            keepalive,
        }
    }

    /// Signal both tasks and wait for them to finish
    pub async fn stop(self) {
        // Both tasks may already be gone
        let _ = self.done.send(());

        if let Err(e) = self.reader.await {
            tracing::warn!(error = %e, "Reader task failed");
        }
        if let Err(e) = self.keepalive.await {
            tracing::warn!(error = %e, "Keepalive task failed");
        }
    }
}

async fn read_loop(
    mut transport: Box<dyn Transport>,
    queue: mpsc::Sender<PumpEvent>,
    mut done: broadcast::Receiver<()>,
) {
    loop {
        let event = tokio::select! {
            _ = done.recv() => return,
            received = transport.recv() => match received {
                Ok(text) => PumpEvent::Frame(text),
                Err(e) => PumpEvent::ReadError(format!("{:#}", e)),
            },
        };

        let failed = matches!(event, PumpEvent::ReadError(_));
        if failed {
            tracing::debug!("Transport read failed, reader stopping");
        }

        tokio::select! {
            _ = done.recv() => return,
            pushed = queue.send(event) => {
                if pushed.is_err() {
                    return;
                }
            }
        }

        if failed {
            return;
        }
    }
}

async fn keepalive_loop(
    every: Duration,
    queue: mpsc::Sender<PumpEvent>,
    mut done: broadcast::Receiver<()>,
) {
    let mut ticker = interval_at(Instant::now() + every, every);

    loop {
        tokio::select! {
            _ = done.recv() => return,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            _ = done.recv() => return,
            pushed = queue.send(PumpEvent::Ping) => {
                if pushed.is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use tokio::time::{sleep, timeout};

    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    /// Hands out scripted frames, then fails or hangs
    struct ScriptedTransport {
        frames: VecDeque<String>,
        fail_at_end: bool,
        handed_out: Arc<AtomicUsize>,
    }

    impl ScriptedTransport {
        fn new(frames: impl IntoIterator<Item = String>, fail_at_end: bool) -> Self {
            Self {
                frames: frames.into_iter().collect(),
                fail_at_end,
                handed_out: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&mut self, _text: String) -> Result<()> {
            Ok(())
        }

        async fn recv(&mut self) -> Result<String> {
            match self.frames.pop_front() {
                Some(frame) => {
                    self.handed_out.fetch_add(1, Ordering::SeqCst);
                    Ok(frame)
                }
                None if self.fail_at_end => bail!("connection reset"),
                None => std::future::pending().await,
            }
        }
    }

    #[tokio::test]
    async fn test_queue_push_blocks_when_full() {
        let mut queue = FrameQueue::new(100);
        let tx = queue.sender();

        for i in 0..100 {
            tx.send(PumpEvent::Frame(i.to_string())).await.unwrap();
        }
        assert_eq!(queue.len(), 100);

        let blocked = timeout(Duration::from_millis(50), tx.send(PumpEvent::Frame("100".to_string())));
        assert!(blocked.await.is_err(), "101st push should wait for room");

        let pending = tokio::spawn({
            let tx = tx.clone();
            async move { tx.send(PumpEvent::Frame("100".to_string())).await }
        });

        assert_eq!(queue.recv().await, Some(PumpEvent::Frame("0".to_string())));
        pending.await.unwrap().unwrap();

        for i in 1..=100 {
            assert_eq!(queue.recv().await, Some(PumpEvent::Frame(i.to_string())));
        }
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_reader_backpressure_keeps_order() {
        let mut queue = FrameQueue::new(100);
        let transport = ScriptedTransport::new((0..150).map(|i| i.to_string()), false);
        let handed_out = transport.handed_out.clone();

        let pump = Pump::start(Box::new(transport), queue.sender(), HOUR);

        // Paused consumer: the reader fills the queue and parks on the next push
        sleep(Duration::from_millis(100)).await;
        assert_eq!(queue.len(), 100);
        assert_eq!(handed_out.load(Ordering::SeqCst), 101);

        for i in 0..150 {
            assert_eq!(queue.recv().await, Some(PumpEvent::Frame(i.to_string())));
        }

        pump.stop().await;
    }

    #[tokio::test]
    async fn test_reader_reports_error_and_stops() {
        let mut queue = FrameQueue::new(8);
        let transport = ScriptedTransport::new(["|turn|1".to_string()], true);

        let pump = Pump::start(Box::new(transport), queue.sender(), HOUR);

        assert_eq!(queue.recv().await, Some(PumpEvent::Frame("|turn|1".to_string())));
        match queue.recv().await {
            Some(PumpEvent::ReadError(e)) => assert!(e.contains("connection reset")),
            other => panic!("expected read error, got {:?}", other),
        }

        pump.stop().await;
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_keepalive_ticks() {
        let mut queue = FrameQueue::new(8);
        let transport = ScriptedTransport::new(Vec::new(), false);

        let pump = Pump::start(Box::new(transport), queue.sender(), Duration::from_millis(10));

        let tick = timeout(Duration::from_secs(1), queue.recv()).await.unwrap();
        assert_eq!(tick, Some(PumpEvent::Ping));

        pump.stop().await;
    }

    #[tokio::test]
    async fn test_stop_releases_blocked_producers() {
        let queue = FrameQueue::new(1);
        let transport = ScriptedTransport::new((0..10).map(|i| i.to_string()), false);

        let pump = Pump::start(Box::new(transport), queue.sender(), Duration::from_millis(5));
        sleep(Duration::from_millis(30)).await;

        // Both producers are parked on a full queue; stop must still return
        timeout(Duration::from_secs(1), pump.stop()).await.unwrap();
    }
}
