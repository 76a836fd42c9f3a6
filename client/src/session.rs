//! One live session: join a battle room, stream it, and reduce it
//!
//! The session loop is an explicit state machine:
//!
//! ```text
//! Connecting ──ok──> Joined ──ok──> Streaming ──win/lose/cancel──> Ended
//!     ^   │                 └─err─> Ended             │
//!     │   └─err─┐                                     │ read error
//!     │         v                                     v
//!     └──── Reconnecting <────────── (failures < max_attempts)
//! ```
//!
//! Transport failures are counted over the whole session. The battle state
//! and the frame queue survive reconnects.

use std::sync::Arc;

use anyhow::Result;
use scout_battle::{BattleEnd, BattleState, ReferenceLookup, Snapshot};
use scout_protocol::{ClientMessage, parse_server_frame};
use tokio::sync::broadcast;
use tokio::time::Instant;

use crate::config::PumpConfig;
use crate::connection::{Connector, Transport};
use crate::error::SessionError;
use crate::pump::{FrameQueue, Pump, PumpEvent};
use crate::room::RoomId;
use crate::sink::{Fragment, OutputSink, StatusNotice};

/// How a session ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    BattleEnded(BattleEnd),
    /// Caller cancellation, deadline, or the output consumer went away
    Cancelled,
}

enum SessionState {
    Connecting,
    Joined(Box<dyn Transport>),
    Streaming(Pump),
    Reconnecting,
    Ended(Result<SessionOutcome, SessionError>),
}

/// Drives live battle sessions against one server
pub struct Session {
    config: PumpConfig,
    connector: Arc<dyn Connector>,
    dex: Arc<dyn ReferenceLookup>,
}

/// Per-run bookkeeping threaded through the state machine
struct RunContext<'a, S: ?Sized> {
    room: RoomId,
    sink: &'a mut S,
    cancel: broadcast::Receiver<()>,
    deadline: Option<Instant>,
    battle: BattleState,
    queue: FrameQueue,
    failures: usize,
}

/// Raised when the session is cancelled while output is blocked
#[derive(Debug, thiserror::Error)]
#[error("Session stopped")]
struct Stopped;

impl<S: OutputSink + ?Sized> RunContext<'_, S> {
    /// Deliver one fragment unless the session is stopped first
    async fn emit(&mut self, fragment: Fragment) -> Result<()> {
        tokio::select! {
            _ = stopped(&mut self.cancel, self.deadline) => Err(Stopped.into()),
            delivered = self.sink.emit(fragment) => delivered,
        }
    }
}

impl Session {
    pub fn new(
        config: PumpConfig,
        connector: Arc<dyn Connector>,
        dex: Arc<dyn ReferenceLookup>,
    ) -> Self {
        Self {
            config,
            connector,
            dex,
        }
    }

    pub fn config(&self) -> &PumpConfig {
        &self.config
    }

    /// Join `room` and stream it until the battle ends, the transport gives
    /// up, or `cancel` fires. Dropping the cancel sender also cancels.
    pub async fn run<S>(
        &self,
        room: &str,
        sink: &mut S,
        cancel: broadcast::Receiver<()>,
    ) -> Result<SessionOutcome, SessionError>
    where
        S: OutputSink + ?Sized,
    {
        let room = RoomId::parse(room)?;
        tracing::info!(room = %room, "Starting session");

        let mut ctx = RunContext {
            room,
            sink,
            cancel,
            deadline: self.config.session_deadline.map(|d| Instant::now() + d),
            battle: BattleState::new(),
            queue: FrameQueue::new(self.config.queue_capacity),
            failures: 0,
        };

        let mut state = SessionState::Connecting;
        let result = loop {
            state = match state {
                SessionState::Ended(result) => break result,
                other => match self.step(other, &mut ctx).await {
                    Ok(next) => next,
                    Err(e) => {
                        // The pump, if any, was dropped with its state
                        if e.downcast_ref::<Stopped>().is_some() {
                            tracing::info!(room = %ctx.room, "Stopped while output was blocked");
                        } else {
                            tracing::info!(room = %ctx.room, error = %e, "Output closed, ending session");
                        }
                        SessionState::Ended(Ok(SessionOutcome::Cancelled))
                    }
                },
            };
        };

        ctx.queue.close();
        match &result {
            Ok(outcome) => tracing::info!(room = %ctx.room, outcome = ?outcome, "Session ended"),
            Err(e) => tracing::warn!(room = %ctx.room, error = %e, "Session failed"),
        }
        result
    }

    async fn step<S>(&self, state: SessionState, ctx: &mut RunContext<'_, S>) -> Result<SessionState>
    where
        S: OutputSink + ?Sized,
    {
        let next = match state {
            SessionState::Connecting => {
                let connected = tokio::select! {
                    _ = stopped(&mut ctx.cancel, ctx.deadline) => None,
                    connected = self.connector.connect() => Some(connected),
                };

                match connected {
                    None => SessionState::Ended(Ok(SessionOutcome::Cancelled)),
                    Some(Ok(transport)) => SessionState::Joined(transport),
                    Some(Err(e)) => {
                        ctx.failures += 1;
                        tracing::warn!(attempt = ctx.failures, error = %e, "Connection attempt failed");
                        let error = format!("{:#}", e);
                        ctx.emit(Fragment::Status(StatusNotice::ConnectFailed {
                            error: error.clone(),
                        }))
                        .await?;
                        self.after_failure(ctx, error).await?
                    }
                }
            }

            SessionState::Joined(mut transport) => {
                let join = ClientMessage::join(ctx.room.as_str()).to_wire_format();

                let sent = tokio::select! {
                    _ = stopped(&mut ctx.cancel, ctx.deadline) => None,
                    sent = transport.send(join) => Some(sent),
                };

                match sent {
                    None => SessionState::Ended(Ok(SessionOutcome::Cancelled)),
                    Some(Ok(())) => {
                        tracing::info!(room = %ctx.room, "Joined room");
                        ctx.emit(Fragment::Status(StatusNotice::Connected {
                            room: ctx.room.to_string(),
                        }))
                        .await?;
                        let pump = Pump::start(
                            transport,
                            ctx.queue.sender(),
                            self.config.keepalive_interval,
                        );
                        SessionState::Streaming(pump)
                    }
                    Some(Err(e)) => {
                        tracing::error!(room = %ctx.room, error = %e, "Join failed");
                        SessionState::Ended(Err(SessionError::JoinFailed {
                            room: ctx.room.to_string(),
                            reason: format!("{:#}", e),
                        }))
                    }
                }
            }

            SessionState::Streaming(pump) => {
                let event = tokio::select! {
                    _ = stopped(&mut ctx.cancel, ctx.deadline) => None,
                    event = ctx.queue.recv() => event,
                };

                match event {
                    None => {
                        pump.stop().await;
                        SessionState::Ended(Ok(SessionOutcome::Cancelled))
                    }
                    Some(PumpEvent::Frame(text)) => match self.process_frame(&text, ctx).await? {
                        Some(end) => {
                            pump.stop().await;
                            SessionState::Ended(Ok(SessionOutcome::BattleEnded(end)))
                        }
                        None => SessionState::Streaming(pump),
                    },
                    Some(PumpEvent::Ping) => {
                        ctx.emit(Fragment::Keepalive).await?;
                        SessionState::Streaming(pump)
                    }
                    Some(PumpEvent::ReadError(error)) => {
                        pump.stop().await;
                        ctx.failures += 1;
                        tracing::warn!(attempt = ctx.failures, error = %error, "Connection lost");
                        self.after_failure(ctx, error).await?
                    }
                }
            }

            SessionState::Reconnecting => {
                tokio::select! {
                    _ = stopped(&mut ctx.cancel, ctx.deadline) => {
                        SessionState::Ended(Ok(SessionOutcome::Cancelled))
                    }
                    _ = tokio::time::sleep(self.config.retry_delay) => SessionState::Connecting,
                }
            }

            SessionState::Ended(result) => SessionState::Ended(result),
        };

        Ok(next)
    }

    /// Retry or give up once a transport failure has been counted
    async fn after_failure<S>(&self, ctx: &mut RunContext<'_, S>, error: String) -> Result<SessionState>
    where
        S: OutputSink + ?Sized,
    {
        let max_attempts = self.config.max_attempts;

        if ctx.failures >= max_attempts {
            ctx.emit(Fragment::Status(StatusNotice::PersistentError {
                error: error.clone(),
            }))
            .await?;
            return Ok(SessionState::Ended(Err(SessionError::RetriesExhausted {
                attempts: ctx.failures,
                last_error: error,
            })));
        }

        tracing::info!(attempt = ctx.failures, max_attempts, "Reconnecting");
        ctx.emit(Fragment::Status(StatusNotice::Reconnecting {
            attempt: ctx.failures,
            max_attempts,
        }))
        .await?;
        Ok(SessionState::Reconnecting)
    }

    /// Reduce every line of a frame. Notable lines are echoed and followed by
    /// one snapshot for the whole frame.
    async fn process_frame<S>(&self, text: &str, ctx: &mut RunContext<'_, S>) -> Result<Option<BattleEnd>>
    where
        S: OutputSink + ?Sized,
    {
        let frame = parse_server_frame(text);
        if let Some(room) = &frame.room_id
            && room.as_str() != ctx.room.as_str()
        {
            tracing::debug!(room = %room, "Skipping frame for another room");
            return Ok(None);
        }

        let mut notable = false;
        let mut end = None;

        for line in &frame.lines {
            let report = ctx.battle.apply_line(line, &*self.dex);

            if let Some(reason) = &report.rejected {
                tracing::debug!(line = %line, error = %reason, "Skipping malformed line");
            }
            if report.is_notable() {
                notable = true;
                ctx.emit(Fragment::LogLine(line.clone())).await?;
            }
            if let Some(outcome) = report.end {
                end.get_or_insert(outcome);
            }
        }

        if notable {
            let snapshot = Snapshot::capture(&ctx.battle);
            ctx.emit(Fragment::Snapshot(Box::new(snapshot))).await?;
        }

        if let Some(outcome) = &end {
            ctx.emit(Fragment::Status(StatusNotice::BattleFinished {
                outcome: outcome.clone(),
            }))
            .await?;
        }

        Ok(end)
    }
}

/// Resolves on caller cancellation (or a dropped sender) or at the deadline
async fn stopped(cancel: &mut broadcast::Receiver<()>, deadline: Option<Instant>) {
    match deadline {
        Some(at) => {
            tokio::select! {
                _ = cancel.recv() => {}
                _ = tokio::time::sleep_until(at) => {
                    tracing::info!("Session deadline reached");
                }
            }
        }
        None => {
            let _ = cancel.recv().await;
        }
    }
}
