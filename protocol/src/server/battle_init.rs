//! Battle initialization message parsers
//!
//! These messages introduce the players and, where the server reveals them,
//! their teams.

use super::battle::{parse_player, required_field, PokemonDetails};
use super::BattleEvent;
use crate::ParseError;
use anyhow::Result;

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
pub fn parse_player_line(parts: &[&str]) -> Result<BattleEvent> {
    let player = parse_player(parts, 2)?;
    let username = parts
        .get(3)
        .ok_or_else(|| ParseError::MissingField("username".to_string()))?
        .to_string();

    Ok(BattleEvent::Player { player, username })
}

/// Parse |poke|PLAYER|DETAILS|ITEM
pub fn parse_poke(parts: &[&str]) -> Result<BattleEvent> {
    let player = parse_player(parts, 2)?;
    let details = PokemonDetails::parse(&required_field(parts, 3, "details")?);
    if details.species.is_empty() {
        return Err(ParseError::InvalidFormat("empty species".to_string()).into());
    }

    Ok(BattleEvent::Poke { player, details })
}

/// Parse |team|PLAYER|POKEMON|MOVE1, MOVE2, ...
pub fn parse_team(parts: &[&str]) -> Result<BattleEvent> {
    let player = parse_player(parts, 2)?;
    let pokemon = required_field(parts, 3, "pokemon")?;
    let moves = required_field(parts, 4, "moves")?
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();

    Ok(BattleEvent::Team {
        player,
        pokemon,
        moves,
    })
}
