//! Move ranking, threat listing and switch recommendation

use serde::Serialize;

use super::matchup::type_pressure;
use crate::types::{Move, PokemonState, SideState, Type, Verdict, move_effectiveness};

/// How many opposing moves are listed as threats
pub const THREAT_LIMIT: usize = 5;

/// A known move scored against a specific defender
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveScore {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Option<Type>,
    /// Power used for scoring, unknown power already resolved
    pub power: u32,
    pub multiplier: f32,
    pub score: f32,
    pub verdict: Verdict,
}

impl MoveScore {
    pub fn new(mv: &Move, defender_types: &[Type]) -> Self {
        let power = mv.effective_power();
        let multiplier = move_effectiveness(mv.move_type, defender_types);
        Self {
            name: mv.name.clone(),
            move_type: mv.move_type,
            power,
            multiplier,
            score: power as f32 * multiplier,
            verdict: Verdict::from_multiplier(multiplier),
        }
    }
}

/// Attacker's known moves against the defender, best first.
/// Equal scores keep discovery order.
pub fn rank_moves(attacker: &PokemonState, defender: &PokemonState) -> Vec<MoveScore> {
    let mut scores: Vec<MoveScore> = attacker
        .known_moves
        .iter()
        .map(|mv| MoveScore::new(mv, &defender.types))
        .collect();
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}

pub fn best_move(attacker: &PokemonState, defender: &PokemonState) -> Option<MoveScore> {
    rank_moves(attacker, defender).into_iter().next()
}

/// The opponent's strongest known moves against our active Pokemon
pub fn threats(opponent: &PokemonState, ours: &PokemonState) -> Vec<MoveScore> {
    let mut ranked = rank_moves(opponent, ours);
    ranked.truncate(THREAT_LIMIT);
    ranked
}

/// A bench member that takes less than neutral pressure from the opponent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchSuggestion {
    pub name: String,
    pub multiplier: f32,
}

/// Pick the healthy bench member the opponent's active hits least.
///
/// Ties go to the alphabetically first name. Returns `None` unless the best
/// candidate is strictly below neutral.
pub fn recommend_switch(side: &SideState, opponent_active: &PokemonState) -> Option<SwitchSuggestion> {
    side.bench()
        .map(|candidate| SwitchSuggestion {
            name: candidate.name.clone(),
            multiplier: type_pressure(&opponent_active.types, &candidate.types),
        })
        .min_by(|a, b| {
            a.multiplier
                .total_cmp(&b.multiplier)
                .then_with(|| a.name.cmp(&b.name))
        })
        .filter(|best| best.multiplier < 1.0)
}
