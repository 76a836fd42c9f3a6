//! Major battle action message parsers
//!
//! These are the primary actions in battle: moves, switches, faints.

use super::battle::{parse_details, parse_pokemon, required_field, HpFraction};
use super::BattleEvent;
use anyhow::Result;

/// Parse |move|POKEMON|MOVE|TARGET
pub fn parse_move(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = required_field(parts, 3, "move")?;

    Ok(BattleEvent::Move { pokemon, move_name })
}

/// Parse |switch|POKEMON|DETAILS|HP STATUS (also |drag|)
///
/// A missing or malformed HP field still switches the Pokemon in; only the HP
/// update is skipped.
pub fn parse_switch(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp = parts.get(4).and_then(|s| HpFraction::parse(s));

    Ok(BattleEvent::Switch {
        pokemon,
        details,
        hp,
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::Faint(pokemon))
}
