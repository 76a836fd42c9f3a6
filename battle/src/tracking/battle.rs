//! BattleState - the reduced view of one battle

use scout_protocol::{Player, PokemonRef};
use serde::{Serialize, Serializer};

use crate::types::{FieldState, PokemonState, SideState};

/// A battle reconstructed from protocol lines
///
/// Owned by a single session; the reducer in `updater` is its only writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleState {
    /// Current turn number (0 = not started). Never moves backwards.
    pub turn: u32,

    /// Weather and field effects
    pub field: FieldState,

    /// Player sides, indexed by slot
    #[serde(rename = "players", serialize_with = "serialize_sides")]
    pub(crate) sides: [Option<SideState>; 4],
}

impl BattleState {
    pub fn new() -> Self {
        Self {
            turn: 0,
            field: FieldState::new(),
            sides: [None, None, None, None],
        }
    }

    /// Get a side by player
    pub fn get_side(&self, player: Player) -> Option<&SideState> {
        self.sides[player.index()].as_ref()
    }

    /// Get a side mutably by player
    pub fn get_side_mut(&mut self, player: Player) -> Option<&mut SideState> {
        self.sides[player.index()].as_mut()
    }

    /// Create a side unless one already occupies the slot
    pub fn create_side(&mut self, player: Player, username: &str) -> &mut SideState {
        self.sides[player.index()].get_or_insert_with(|| SideState::new(player, username))
    }

    pub fn has_side(&self, player: Player) -> bool {
        self.sides[player.index()].is_some()
    }

    /// Iterate over known sides in slot order
    pub fn sides(&self) -> impl Iterator<Item = &SideState> {
        self.sides.iter().flatten()
    }

    /// The side opposite `player`, if it has joined
    pub fn opponent_of(&self, player: Player) -> Option<&SideState> {
        self.get_side(player.foe())
    }

    /// Resolve a `p1a: Name` reference to its roster entry
    pub fn find_pokemon(&self, pokemon: &PokemonRef) -> Option<&PokemonState> {
        self.get_side(pokemon.player)?.get_pokemon(&pokemon.name)
    }

    pub fn find_pokemon_mut(&mut self, pokemon: &PokemonRef) -> Option<&mut PokemonState> {
        self.get_side_mut(pokemon.player)?
            .get_pokemon_mut(&pokemon.name)
    }
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_sides<S: Serializer>(
    sides: &[Option<SideState>; 4],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(sides.iter().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_battle() {
        let battle = BattleState::new();
        assert_eq!(battle.turn, 0);
        assert_eq!(battle.sides().count(), 0);
        assert!(battle.field.weather.is_none());
    }

    #[test]
    fn test_create_side_keeps_first_name() {
        let mut battle = BattleState::new();

        assert!(!battle.has_side(Player::P1));
        battle.create_side(Player::P1, "Alice");
        battle.create_side(Player::P1, "Mallory");

        assert_eq!(battle.get_side(Player::P1).unwrap().username, "Alice");
    }

    #[test]
    fn test_opponent_of() {
        let mut battle = BattleState::new();
        battle.create_side(Player::P1, "Alice");
        assert!(battle.opponent_of(Player::P1).is_none());

        battle.create_side(Player::P2, "Bob");
        assert_eq!(battle.opponent_of(Player::P1).unwrap().username, "Bob");
        assert_eq!(battle.opponent_of(Player::P2).unwrap().username, "Alice");
    }

    #[test]
    fn test_sides_in_slot_order() {
        let mut battle = BattleState::new();
        battle.create_side(Player::P2, "Bob");
        battle.create_side(Player::P1, "Alice");

        let names: Vec<&str> = battle.sides().map(|s| s.username.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_serialize_players_as_list() {
        let mut battle = BattleState::new();
        battle.create_side(Player::P2, "Bob");

        let json = serde_json::to_value(&battle).unwrap();
        assert_eq!(json["turn"], 0);
        assert_eq!(json["players"].as_array().unwrap().len(), 1);
        assert_eq!(json["players"][0]["player"], "p2");
        assert_eq!(json["players"][0]["username"], "Bob");
        assert!(json["field"]["weather"].is_null());
    }
}
