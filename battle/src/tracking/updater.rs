//! Reducer: protocol lines into battle state

use scout_protocol::{
    BattleEvent, EventKind, HpFraction, PokemonDetails, PokemonRef, parse_battle_event,
    parse_server_frame,
};
use serde::Serialize;

use super::battle::BattleState;
use crate::dex::ReferenceLookup;
use crate::types::Move;

/// Terminal outcome announced by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleEnd {
    /// `|win|USER`
    Won(String),
    /// `|lose|USER`
    Lost(String),
}

/// What happened to one line fed to [`BattleState::apply_line`]
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport {
    /// Kind of the line, `None` for unknown or too-short lines
    pub kind: Option<EventKind>,
    /// Parse failure for a known kind with malformed fields
    pub rejected: Option<String>,
    pub end: Option<BattleEnd>,
}

impl LineReport {
    /// A notable line was applied, so observers want a fresh snapshot
    pub fn is_notable(&self) -> bool {
        self.rejected.is_none() && self.kind.is_some_and(|k| k.is_notable())
    }
}

impl BattleState {
    /// Reduce a complete log (one line per event) into a fresh state
    pub fn from_log(log: &str, lookup: &dyn ReferenceLookup) -> Self {
        let mut battle = Self::new();
        for line in parse_server_frame(log).lines {
            battle.apply_line(&line, lookup);
        }
        battle
    }

    /// Parse and apply one raw line. Malformed and unknown lines leave the
    /// state untouched.
    pub fn apply_line(&mut self, line: &str, lookup: &dyn ReferenceLookup) -> LineReport {
        let kind = EventKind::of_line(line);

        match parse_battle_event(line) {
            Ok(Some(event)) => LineReport {
                kind,
                rejected: None,
                end: self.apply(&event, lookup),
            },
            Ok(None) => LineReport {
                kind: None,
                rejected: None,
                end: None,
            },
            Err(e) => LineReport {
                kind,
                rejected: Some(e.to_string()),
                end: None,
            },
        }
    }

    /// Apply a parsed event, returning the battle outcome for `win`/`lose`
    pub fn apply(&mut self, event: &BattleEvent, lookup: &dyn ReferenceLookup) -> Option<BattleEnd> {
        match event {
            // === Battle Initialization ===
            BattleEvent::Player { player, username } => {
                self.create_side(*player, username);
            }

            BattleEvent::Poke { player, details } => {
                if let Some(side) = self.get_side_mut(*player) {
                    let species = details.species.as_str();
                    if side.find_pokemon(species).is_none() {
                        let idx = side.get_or_insert(species, species);
                        side.pokemon[idx].types = lookup.types_of(species);
                    }
                }
            }

            BattleEvent::Team {
                player,
                pokemon,
                moves,
            } => {
                let poke = self
                    .get_side_mut(*player)
                    .and_then(|side| side.get_pokemon_mut(pokemon));
                if let Some(poke) = poke {
                    poke.set_moves(moves.iter().map(|name| Move::lookup(name, lookup)));
                }
            }

            // === Major Actions ===
            BattleEvent::Switch {
                pokemon,
                details,
                hp,
            } => {
                self.handle_switch(pokemon, details, *hp, lookup);
            }

            BattleEvent::Move { pokemon, move_name } => {
                let active = self
                    .get_side_mut(pokemon.player)
                    .and_then(|side| side.active_pokemon_mut());
                if let Some(active) = active {
                    if !active.knows_move(move_name) {
                        active.record_move(Move::lookup(move_name, lookup));
                    }
                }
            }

            BattleEvent::Faint(pokemon) => {
                if let Some(poke) = self.find_pokemon_mut(pokemon) {
                    poke.fainted = true;
                }
            }

            // === HP and Status ===
            BattleEvent::Damage { pokemon, hp } => {
                if let Some(poke) = self.find_pokemon_mut(pokemon) {
                    poke.apply_hp(*hp);
                }
            }

            BattleEvent::Status { pokemon, status } => {
                if let Some(poke) = self.find_pokemon_mut(pokemon) {
                    poke.status = Some(status.clone());
                }
            }

            BattleEvent::CureStatus(pokemon) => {
                if let Some(poke) = self.find_pokemon_mut(pokemon) {
                    poke.status = None;
                }
            }

            // === Stat Changes ===
            BattleEvent::Boost {
                pokemon,
                stat,
                amount,
            } => {
                if let Some(poke) = self.find_pokemon_mut(pokemon) {
                    poke.add_boost(stat, *amount);
                }
            }

            BattleEvent::Unboost {
                pokemon,
                stat,
                amount,
            } => {
                if let Some(poke) = self.find_pokemon_mut(pokemon) {
                    poke.sub_boost(stat, *amount);
                }
            }

            BattleEvent::SetBoost {
                pokemon,
                stat,
                amount,
            } => {
                if let Some(poke) = self.find_pokemon_mut(pokemon) {
                    poke.set_boost(stat, *amount);
                }
            }

            BattleEvent::Ability { pokemon, ability } => {
                if let Some(poke) = self.find_pokemon_mut(pokemon) {
                    poke.ability = Some(ability.clone());
                }
            }

            // === Field ===
            BattleEvent::Weather(weather) => {
                self.field.set_weather(weather.clone());
            }

            BattleEvent::FieldStart(effect) => {
                self.field.start_effect(effect);
            }

            BattleEvent::FieldEnd(effect) => {
                self.field.end_effect(effect);
            }

            // === Progress ===
            BattleEvent::Turn(turn) => {
                // A rejoin replays the log from the top
                self.turn = self.turn.max(*turn);
            }

            BattleEvent::Start | BattleEvent::Upkeep => {}

            BattleEvent::Win(user) => return Some(BattleEnd::Won(user.clone())),

            BattleEvent::Lose(user) => return Some(BattleEnd::Lost(user.clone())),
        }

        None
    }

    fn handle_switch(
        &mut self,
        pokemon: &PokemonRef,
        details: &PokemonDetails,
        hp: Option<HpFraction>,
        lookup: &dyn ReferenceLookup,
    ) {
        let Some(side) = self.get_side_mut(pokemon.player) else {
            return;
        };

        let species = if details.species.is_empty() {
            pokemon.name.as_str()
        } else {
            details.species.as_str()
        };

        let idx = side.get_or_insert(&pokemon.name, species);
        let poke = &mut side.pokemon[idx];

        let mut types = lookup.types_of(species);
        if types.is_empty() {
            types = lookup.types_of(&pokemon.name);
        }
        if !types.is_empty() {
            poke.types = types;
        }

        if let Some(hp) = hp {
            poke.apply_hp(hp);
        }

        side.set_active(idx);
    }
}
