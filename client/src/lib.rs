//! Live battle stream pump for Pokemon Showdown.
//!
//! A [`Session`] opens a transport through a [`Connector`], joins a battle
//! room and feeds every frame through the reducer in `scout-battle`. Status
//! notices, notable log lines, snapshots and keepalives go to an
//! [`OutputSink`] in the order they are produced.
//!
//! ```ignore
//! let session = Session::new(
//!     PumpConfig::default(),
//!     Arc::new(WebSocketConnector::new(DEFAULT_SERVER_URL)),
//!     Arc::new(dex),
//! );
//! let (mut sink, mut fragments) = ChannelSink::channel(64);
//! let outcome = session.run("gen9randombattle-2001", &mut sink, cancel_rx).await?;
//! ```

mod config;
mod connection;
mod error;
mod pump;
mod room;
mod session;
mod sink;

pub use config::{DEFAULT_SERVER_URL, PumpConfig};
pub use connection::{Connector, Transport, WebSocketConnector, WebSocketTransport};
pub use error::SessionError;
pub use pump::{FrameQueue, Pump, PumpEvent};
pub use room::RoomId;
pub use session::{Session, SessionOutcome};
pub use sink::{ChannelSink, Fragment, OutputSink, StatusNotice};

pub use scout_battle::{BattleEnd, Snapshot};
