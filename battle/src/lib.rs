//! Battle state tracking and analysis for Pokemon Showdown.
//!
//! # Overview
//!
//! `scout-battle` sits between `scout-protocol` (wire format) and the live
//! session in `scout-client`:
//!
//! ```text
//! scout-protocol (wire format)
//!        │
//!        ▼
//! scout-battle (model + reducer + analysis) ← THIS CRATE
//!        │
//!        ▼
//! scout-client (stream pump, session)
//! ```
//!
//! # Main Types
//!
//! - [`BattleState`] - reduced battle model, fed one protocol line at a time
//! - [`Type`] - Pokemon types with the full effectiveness chart
//! - [`ReferenceLookup`] / [`Dex`] - species and move reference data
//! - [`Snapshot`] - serializable state plus move rankings and switch advice
//!
//! # Example Usage
//!
//! ```ignore
//! use scout_battle::{BattleState, Dex, Snapshot};
//!
//! let dex = Dex::load("data/pokedex.json", "data/moves.json")?;
//! let mut battle = BattleState::new();
//!
//! for line in frame.lines() {
//!     let report = battle.apply_line(line, &dex);
//!     if report.is_notable() {
//!         let snapshot = Snapshot::capture(&battle);
//!         println!("{}", serde_json::to_string(&snapshot)?);
//!     }
//! }
//! ```

pub mod dex;
pub mod query;
pub mod tracking;
pub mod types;

pub use dex::{Dex, DexError, MoveInfo, ReferenceLookup};
pub use query::{MoveScore, Snapshot, SwitchSuggestion};
pub use tracking::{BattleEnd, BattleState, LineReport};
pub use types::{FieldState, Move, PokemonState, SideState, TYPE_CHART, Type, Verdict};

// Re-export commonly used protocol types
pub use scout_protocol::{EventKind, Player};
