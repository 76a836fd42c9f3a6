//! Serializable battle snapshot with per-side analysis

use scout_protocol::Player;
use serde::Serialize;

use super::matchup::weaknesses;
use super::suggest::{MoveScore, SwitchSuggestion, best_move, rank_moves, recommend_switch, threats};
use crate::tracking::BattleState;
use crate::types::Type;

/// Everything an observer needs after a notable line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub battle: BattleState,
    pub analysis: Vec<SideAnalysis>,
}

/// Analysis from one side's point of view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideAnalysis {
    pub player: Player,
    /// Name of the active Pokemon
    pub active: Option<String>,
    /// Attacking types that hit the active Pokemon super effectively
    pub weaknesses: Vec<Type>,
    /// Present once both this side and its opponent have an active Pokemon
    pub matchup: Option<Matchup>,
}

/// Our active against the opponent's active
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matchup {
    pub opponent: String,
    pub moves: Vec<MoveScore>,
    pub best_move: Option<MoveScore>,
    pub switch: Option<SwitchSuggestion>,
    pub threats: Vec<MoveScore>,
}

impl Snapshot {
    pub fn capture(battle: &BattleState) -> Self {
        let analysis = battle
            .sides()
            .map(|side| {
                let active = side.active_pokemon();
                let opponent = battle
                    .opponent_of(side.player)
                    .and_then(|opp| opp.active_pokemon());

                let matchup = active.zip(opponent).map(|(ours, theirs)| Matchup {
                    opponent: theirs.name.clone(),
                    moves: rank_moves(ours, theirs),
                    best_move: best_move(ours, theirs),
                    switch: recommend_switch(side, theirs),
                    threats: threats(theirs, ours),
                });

                SideAnalysis {
                    player: side.player,
                    active: active.map(|p| p.name.clone()),
                    weaknesses: active.map(|p| weaknesses(&p.types)).unwrap_or_default(),
                    matchup,
                }
            })
            .collect();

        Self {
            battle: battle.clone(),
            analysis,
        }
    }

    pub fn side(&self, player: Player) -> Option<&SideAnalysis> {
        self.analysis.iter().find(|a| a.player == player)
    }
}
