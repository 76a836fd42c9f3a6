//! Pokemon and move state

use std::collections::BTreeMap;

use scout_protocol::HpFraction;
use serde::Serialize;

use super::pokemon_type::Type;
use crate::dex::ReferenceLookup;

/// A move seen in battle, with its looked-up type and power
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Move {
    pub name: String,
    /// `None` when the move is unknown to the reference data
    #[serde(rename = "type")]
    pub move_type: Option<Type>,
    /// Base power; 0 means unknown and is scored as [`Move::DEFAULT_POWER`]
    pub power: u32,
}

impl Move {
    pub const DEFAULT_POWER: u32 = 80;

    /// Resolve a move by name. Unknown moves get the default power and no type.
    pub fn lookup(name: &str, dex: &dyn ReferenceLookup) -> Self {
        match dex.move_info(name) {
            Some(info) => Self {
                name: name.to_string(),
                move_type: info.move_type,
                power: info.power,
            },
            None => Self {
                name: name.to_string(),
                move_type: None,
                power: Self::DEFAULT_POWER,
            },
        }
    }

    /// Power used for scoring: unknown power counts as the default, never below 1
    pub fn effective_power(&self) -> u32 {
        let power = if self.power == 0 {
            Self::DEFAULT_POWER
        } else {
            self.power
        };
        power.max(1)
    }
}

/// One roster entry and everything revealed about it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonState {
    /// Display name, the roster key
    pub name: String,

    /// Species used for reference lookups
    pub species: String,

    pub hp_current: i32,
    pub hp_max: i32,
    pub fainted: bool,

    /// Non-volatile status as sent by the server ("par", "brn", ...)
    pub status: Option<String>,

    pub ability: Option<String>,

    /// Raw stat stages keyed by stat name; not clamped
    pub boosts: BTreeMap<String, i32>,

    pub types: Vec<Type>,

    /// Moves in the order they were revealed, unique by name
    pub known_moves: Vec<Move>,
}

impl PokemonState {
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            hp_current: 0,
            hp_max: 0,
            fainted: false,
            status: None,
            ability: None,
            boosts: BTreeMap::new(),
            types: Vec::new(),
            known_moves: Vec::new(),
        }
    }

    /// Record a revealed move; returns false when one with the same name is already known
    pub fn record_move(&mut self, mv: Move) -> bool {
        if self.knows_move(&mv.name) {
            return false;
        }
        self.known_moves.push(mv);
        true
    }

    /// Replace the known moves, keeping the first of any duplicate names
    pub fn set_moves(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.known_moves.clear();
        for mv in moves {
            self.record_move(mv);
        }
    }

    pub fn knows_move(&self, name: &str) -> bool {
        self.known_moves.iter().any(|m| m.name == name)
    }

    pub fn apply_hp(&mut self, hp: HpFraction) {
        self.hp_current = hp.current;
        self.hp_max = hp.max;
    }

    /// Stage for a stat (0 if never boosted)
    pub fn boost(&self, stat: &str) -> i32 {
        self.boosts.get(stat).copied().unwrap_or(0)
    }

    /// Add `delta` to a stat stage. Returns false, leaving the stage as it
    /// was, when the sum does not fit.
    pub fn add_boost(&mut self, stat: &str, delta: i32) -> bool {
        match self.boost(stat).checked_add(delta) {
            Some(stage) => {
                self.boosts.insert(stat.to_string(), stage);
                true
            }
            None => false,
        }
    }

    /// Subtract `delta` from a stat stage, with the same overflow rule as
    /// [`PokemonState::add_boost`]
    pub fn sub_boost(&mut self, stat: &str, delta: i32) -> bool {
        delta
            .checked_neg()
            .is_some_and(|negated| self.add_boost(stat, negated))
    }

    pub fn set_boost(&mut self, stat: &str, value: i32) {
        self.boosts.insert(stat.to_string(), value);
    }
}
