mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;
mod tests;

use anyhow::Result;

pub use battle::{HpFraction, Player, PokemonDetails, PokemonRef};

/// Kind of a battle protocol line, selected by its second `|` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Player,
    Poke,
    Team,
    Switch,
    Drag,
    Move,
    Damage,
    MinorDamage,
    Heal,
    SetHp,
    Faint,
    Turn,
    Status,
    CureStatus,
    Boost,
    Unboost,
    SetBoost,
    Weather,
    FieldStart,
    FieldEnd,
    Ability,
    Start,
    Upkeep,
    Win,
    Lose,
}

impl EventKind {
    /// Classify a line tag such as `switch` or `-boost`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "player" => EventKind::Player,
            "poke" => EventKind::Poke,
            "team" => EventKind::Team,
            "switch" => EventKind::Switch,
            "drag" => EventKind::Drag,
            "move" => EventKind::Move,
            "damage" => EventKind::Damage,
            "-damage" => EventKind::MinorDamage,
            "-heal" => EventKind::Heal,
            "-sethp" => EventKind::SetHp,
            "faint" => EventKind::Faint,
            "turn" => EventKind::Turn,
            "-status" => EventKind::Status,
            "-curestatus" => EventKind::CureStatus,
            "-boost" => EventKind::Boost,
            "-unboost" => EventKind::Unboost,
            "-setboost" => EventKind::SetBoost,
            "-weather" => EventKind::Weather,
            "-fieldstart" => EventKind::FieldStart,
            "-fieldend" => EventKind::FieldEnd,
            "-ability" => EventKind::Ability,
            "start" => EventKind::Start,
            "upkeep" => EventKind::Upkeep,
            "win" => EventKind::Win,
            "lose" => EventKind::Lose,
            _ => return None,
        };
        Some(kind)
    }

    /// Classify a raw line by its tag, without parsing the remaining fields
    pub fn of_line(line: &str) -> Option<Self> {
        let mut fields = line.trim().split('|');
        fields.next()?;
        Self::from_tag(fields.next()?)
    }

    /// Notable kinds trigger a fresh snapshot for the output sink
    pub fn is_notable(&self) -> bool {
        matches!(
            self,
            EventKind::Player
                | EventKind::Turn
                | EventKind::Move
                | EventKind::Switch
                | EventKind::Damage
                | EventKind::Faint
                | EventKind::Start
                | EventKind::Upkeep
                | EventKind::Win
                | EventKind::Lose
        )
    }

    /// Terminal kinds end the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::Win | EventKind::Lose)
    }
}

/// A parsed battle protocol line
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    Player {
        player: Player,
        username: String,
    },
    Poke {
        player: Player,
        details: PokemonDetails,
    },
    Team {
        player: Player,
        pokemon: String,
        moves: Vec<String>,
    },
    Switch {
        pokemon: PokemonRef,
        details: PokemonDetails,
        hp: Option<HpFraction>,
    },
    Move {
        pokemon: PokemonRef,
        move_name: String,
    },
    Damage {
        pokemon: PokemonRef,
        hp: HpFraction,
    },
    Faint(PokemonRef),
    Turn(u32),
    Status {
        pokemon: PokemonRef,
        status: String,
    },
    CureStatus(PokemonRef),
    Boost {
        pokemon: PokemonRef,
        stat: String,
        amount: i32,
    },
    Unboost {
        pokemon: PokemonRef,
        stat: String,
        amount: i32,
    },
    SetBoost {
        pokemon: PokemonRef,
        stat: String,
        amount: i32,
    },
    Weather(Option<String>),
    FieldStart(String),
    FieldEnd(String),
    Ability {
        pokemon: PokemonRef,
        ability: String,
    },
    Start,
    Upkeep,
    Win(String),
    Lose(String),
}

/// A WebSocket frame: an optional `>ROOMID` header followed by protocol lines
#[derive(Debug, Clone, PartialEq)]
pub struct ServerFrame {
    pub room_id: Option<String>,
    pub lines: Vec<String>,
}

/// Split a raw frame into its room header and non-empty lines
pub fn parse_server_frame(frame: &str) -> ServerFrame {
    let mut lines = frame.lines().peekable();
    let mut room_id = None;

    // Check if first line is >ROOMID
    if let Some(room) = lines.peek().copied().and_then(|first| first.strip_prefix('>')) {
        room_id = Some(room.trim().to_string());
        lines.next();
    }

    let lines = lines
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    ServerFrame { room_id, lines }
}

/// Parse a single battle line.
///
/// `Ok(None)` means the line has fewer than two fields or an unknown kind;
/// `Err` means a known kind with malformed fields. Callers treat both as a
/// line to skip.
pub fn parse_battle_event(line: &str) -> Result<Option<BattleEvent>> {
    let parts: Vec<&str> = line.trim().split('|').collect();

    if parts.len() < 2 {
        return Ok(None);
    }

    let Some(kind) = EventKind::from_tag(parts[1]) else {
        return Ok(None);
    };

    let event = match kind {
        EventKind::Player => battle_init::parse_player_line(&parts)?,
        EventKind::Poke => battle_init::parse_poke(&parts)?,
        EventKind::Team => battle_init::parse_team(&parts)?,
        EventKind::Switch | EventKind::Drag => battle_major::parse_switch(&parts)?,
        EventKind::Move => battle_major::parse_move(&parts)?,
        EventKind::Faint => battle_major::parse_faint(&parts)?,
        EventKind::Damage | EventKind::MinorDamage | EventKind::Heal | EventKind::SetHp => {
            battle_minor::parse_damage(&parts)?
        }
        EventKind::Status => battle_minor::parse_status(&parts)?,
        EventKind::CureStatus => battle_minor::parse_curestatus(&parts)?,
        EventKind::Boost => battle_minor::parse_boost(&parts)?,
        EventKind::Unboost => battle_minor::parse_unboost(&parts)?,
        EventKind::SetBoost => battle_minor::parse_setboost(&parts)?,
        EventKind::Weather => battle_minor::parse_weather(&parts)?,
        EventKind::FieldStart => battle_minor::parse_fieldstart(&parts)?,
        EventKind::FieldEnd => battle_minor::parse_fieldend(&parts)?,
        EventKind::Ability => battle_minor::parse_ability(&parts)?,
        EventKind::Turn => battle_progress::parse_turn(&parts)?,
        EventKind::Start => BattleEvent::Start,
        EventKind::Upkeep => BattleEvent::Upkeep,
        EventKind::Win => battle_progress::parse_win(&parts)?,
        EventKind::Lose => battle_progress::parse_lose(&parts)?,
    };

    Ok(Some(event))
}
