//! Shared types for battle protocol messages

use serde::Serialize;

use crate::ParseError;

/// Player in a battle (p1, p2, p3, p4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    P1,
    P2,
    P3,
    P4,
}

impl Player {
    pub const ALL: [Player; 4] = [Player::P1, Player::P2, Player::P3, Player::P4];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            "p3" => Some(Player::P3),
            "p4" => Some(Player::P4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
            Player::P3 => "p3",
            Player::P4 => "p4",
        }
    }

    /// Slot index into a fixed four-side array
    pub fn index(&self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
            Player::P3 => 2,
            Player::P4 => 3,
        }
    }

    /// The side facing this one in a 1v1 battle
    pub fn foe(&self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
            Player::P3 => Player::P4,
            Player::P4 => Player::P3,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pokemon reference in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
///
/// The slot letter after the player token is not tracked; a roster is keyed
/// by name alone.
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonRef {
    /// Side taken from the first two characters of the position
    pub player: Player,
    /// Display name, used as the roster key
    pub name: String,
}

impl PokemonRef {
    /// Parse a reference like "p1a: Pikachu" or "p1: Pikachu"
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(": ")?;
        let player = Player::parse(pos_part.get(..2)?)?;

        Some(PokemonRef {
            player,
            name: name.to_string(),
        })
    }
}

/// Pokemon details string; only the species is kept
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PokemonDetails {
    pub species: String,
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny"
    pub fn parse(s: &str) -> Self {
        let species = s.split(',').next().unwrap_or_default().trim();

        PokemonDetails {
            species: species.to_string(),
        }
    }
}

/// HP fraction with an optional trailing status (e.g., "35/35", "12/100 par")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpFraction {
    pub current: i32,
    pub max: i32,
}

impl HpFraction {
    /// Parse "CURRENT/MAX", ignoring anything after the first whitespace.
    /// Bare values such as "0 fnt" carry no max and are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let hp_part = s.split_whitespace().next()?;
        let (current, max) = hp_part.split_once('/')?;

        Some(HpFraction {
            current: current.trim().parse().ok()?,
            max: max.trim().parse().ok()?,
        })
    }
}

/// Helper to parse a Player slot token from message parts
pub fn parse_player(parts: &[&str], index: usize) -> Result<Player, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| ParseError::MissingField("player".to_string()).into())
}

/// Helper to parse a PokemonRef from message parts
pub fn parse_pokemon(parts: &[&str], index: usize) -> Result<PokemonRef, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| PokemonRef::parse(s))
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()).into())
}

/// Helper to parse PokemonDetails from message parts
pub fn parse_details(parts: &[&str], index: usize) -> PokemonDetails {
    parts
        .get(index)
        .map(|s| PokemonDetails::parse(s))
        .unwrap_or_default()
}

/// Helper to parse a required HpFraction from message parts
pub fn parse_hp(parts: &[&str], index: usize) -> Result<HpFraction, anyhow::Error> {
    let raw = parts
        .get(index)
        .ok_or_else(|| ParseError::MissingField("hp".to_string()))?;
    HpFraction::parse(raw)
        .ok_or_else(|| ParseError::InvalidFormat(format!("hp fraction: {raw}")).into())
}

/// Helper to fetch a required, non-empty text field
pub fn required_field(parts: &[&str], index: usize, name: &str) -> Result<String, anyhow::Error> {
    match parts.get(index) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ParseError::MissingField(name.to_string()).into()),
    }
}
