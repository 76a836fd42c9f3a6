//! Battle analysis: type matchups, move scoring and snapshots
//!
//! Everything here is a pure function of a [`BattleState`](crate::BattleState).

mod matchup;
mod snapshot;
mod suggest;

pub use matchup::{type_pressure, weaknesses};
pub use snapshot::{Matchup, SideAnalysis, Snapshot};
pub use suggest::{
    MoveScore, SwitchSuggestion, THREAT_LIMIT, best_move, rank_moves, recommend_switch, threats,
};
