//! Battle state tracking from protocol lines

mod battle;
mod updater;

pub use battle::BattleState;
pub use updater::{BattleEnd, LineReport};
