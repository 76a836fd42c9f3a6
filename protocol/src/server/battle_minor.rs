//! Minor battle action message parsers
//!
//! These are secondary effects in battle: damage, stat changes, status, field.

use super::battle::{parse_hp, parse_pokemon, required_field, PokemonRef};
use super::BattleEvent;
use crate::ParseError;
use anyhow::Result;

/// Parse |damage|POKEMON|HP STATUS (and |-damage|, |-heal|, |-sethp|)
pub fn parse_damage(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp = parse_hp(parts, 3)?;

    Ok(BattleEvent::Damage { pokemon, hp })
}

/// Parse |-status|POKEMON|STATUS
pub fn parse_status(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let status = required_field(parts, 3, "status")?;

    Ok(BattleEvent::Status { pokemon, status })
}

/// Parse |-curestatus|POKEMON|STATUS
pub fn parse_curestatus(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::CureStatus(pokemon))
}

/// Shared shape of |-boost|, |-unboost| and |-setboost|: POKEMON|STAT|AMOUNT
fn boost_fields(parts: &[&str]) -> Result<(PokemonRef, String, i32)> {
    let pokemon = parse_pokemon(parts, 2)?;
    let stat = required_field(parts, 3, "stat")?;
    let amount = parts
        .get(4)
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| ParseError::InvalidFormat("boost amount".to_string()))?;

    Ok((pokemon, stat, amount))
}

/// Parse |-boost|POKEMON|STAT|AMOUNT
pub fn parse_boost(parts: &[&str]) -> Result<BattleEvent> {
    let (pokemon, stat, amount) = boost_fields(parts)?;
    Ok(BattleEvent::Boost {
        pokemon,
        stat,
        amount,
    })
}

/// Parse |-unboost|POKEMON|STAT|AMOUNT
pub fn parse_unboost(parts: &[&str]) -> Result<BattleEvent> {
    let (pokemon, stat, amount) = boost_fields(parts)?;
    Ok(BattleEvent::Unboost {
        pokemon,
        stat,
        amount,
    })
}

/// Parse |-setboost|POKEMON|STAT|AMOUNT
pub fn parse_setboost(parts: &[&str]) -> Result<BattleEvent> {
    let (pokemon, stat, amount) = boost_fields(parts)?;
    Ok(BattleEvent::SetBoost {
        pokemon,
        stat,
        amount,
    })
}

/// Parse |-weather|WEATHER; "none" clears it
pub fn parse_weather(parts: &[&str]) -> Result<BattleEvent> {
    let weather = required_field(parts, 2, "weather")?;
    if weather == "none" {
        return Ok(BattleEvent::Weather(None));
    }
    Ok(BattleEvent::Weather(Some(weather)))
}

/// Parse |-fieldstart|CONDITION
pub fn parse_fieldstart(parts: &[&str]) -> Result<BattleEvent> {
    Ok(BattleEvent::FieldStart(required_field(parts, 2, "condition")?))
}

/// Parse |-fieldend|CONDITION
pub fn parse_fieldend(parts: &[&str]) -> Result<BattleEvent> {
    Ok(BattleEvent::FieldEnd(required_field(parts, 2, "condition")?))
}

/// Parse |-ability|POKEMON|ABILITY
pub fn parse_ability(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let ability = required_field(parts, 3, "ability")?;

    Ok(BattleEvent::Ability { pokemon, ability })
}
