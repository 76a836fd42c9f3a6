//! Battle progress message parsers
//!
//! These messages track the flow of a battle and its end.

use super::BattleEvent;
use crate::ParseError;
use anyhow::Result;

/// Parse |turn|NUMBER
pub fn parse_turn(parts: &[&str]) -> Result<BattleEvent> {
    let turn = parts
        .get(2)
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| ParseError::InvalidFormat("turn number".to_string()))?;

    Ok(BattleEvent::Turn(turn))
}

/// Parse |win|USER
pub fn parse_win(parts: &[&str]) -> Result<BattleEvent> {
    let user = parts.get(2).unwrap_or(&"").to_string();
    Ok(BattleEvent::Win(user))
}

/// Parse |lose|USER
pub fn parse_lose(parts: &[&str]) -> Result<BattleEvent> {
    let user = parts.get(2).unwrap_or(&"").to_string();
    Ok(BattleEvent::Lose(user))
}
