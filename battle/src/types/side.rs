//! Side (player) state

use scout_protocol::Player;
use serde::Serialize;

use super::pokemon::PokemonState;

/// One player's side of the battle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideState {
    /// Player identifier (P1, P2, etc.)
    pub player: Player,

    /// Player's display name
    pub username: String,

    /// Roster in discovery order; names are unique
    pub pokemon: Vec<PokemonState>,

    /// Index of the active Pokemon in `pokemon`
    pub active: Option<usize>,
}

impl SideState {
    pub fn new(player: Player, username: impl Into<String>) -> Self {
        Self {
            player,
            username: username.into(),
            pokemon: Vec::new(),
            active: None,
        }
    }

    /// Find a roster index by name
    pub fn find_pokemon(&self, name: &str) -> Option<usize> {
        self.pokemon.iter().position(|p| p.name == name)
    }

    pub fn get_pokemon(&self, name: &str) -> Option<&PokemonState> {
        self.pokemon.iter().find(|p| p.name == name)
    }

    pub fn get_pokemon_mut(&mut self, name: &str) -> Option<&mut PokemonState> {
        self.pokemon.iter_mut().find(|p| p.name == name)
    }

    /// Roster index for `name`, appending a fresh entry when absent
    pub fn get_or_insert(&mut self, name: &str, species: &str) -> usize {
        match self.find_pokemon(name) {
            Some(idx) => idx,
            None => {
                self.pokemon.push(PokemonState::new(name, species));
                self.pokemon.len() - 1
            }
        }
    }

    pub fn active_pokemon(&self) -> Option<&PokemonState> {
        self.active.and_then(|idx| self.pokemon.get(idx))
    }

    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonState> {
        self.active.and_then(|idx| self.pokemon.get_mut(idx))
    }

    /// Make the roster entry at `idx` active
    pub fn set_active(&mut self, idx: usize) {
        if idx < self.pokemon.len() {
            self.active = Some(idx);
        }
    }

    /// Roster members that could be switched in: not active, not fainted
    pub fn bench(&self) -> impl Iterator<Item = &PokemonState> {
        self.pokemon
            .iter()
            .enumerate()
            .filter(move |(idx, poke)| Some(*idx) != self.active && !poke.fainted)
            .map(|(_, poke)| poke)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_keeps_names_unique() {
        let mut side = SideState::new(Player::P1, "Ash");
        let first = side.get_or_insert("Pikachu", "Pikachu");
        let again = side.get_or_insert("Pikachu", "Pikachu");
        assert_eq!(first, again);
        assert_eq!(side.pokemon.len(), 1);
    }

    #[test]
    fn test_active_points_into_roster() {
        let mut side = SideState::new(Player::P1, "Ash");
        assert!(side.active_pokemon().is_none());

        let idx = side.get_or_insert("Pikachu", "Pikachu");
        side.set_active(idx);
        assert_eq!(side.active_pokemon().unwrap().name, "Pikachu");

        // Out-of-range indices are never stored
        side.set_active(7);
        assert_eq!(side.active, Some(idx));
    }

    #[test]
    fn test_bench_excludes_active_and_fainted() {
        let mut side = SideState::new(Player::P2, "Gary");
        let active = side.get_or_insert("Blastoise", "Blastoise");
        side.get_or_insert("Arcanine", "Arcanine");
        let fainted = side.get_or_insert("Alakazam", "Alakazam");
        side.pokemon[fainted].fainted = true;
        side.set_active(active);

        let bench: Vec<&str> = side.bench().map(|p| p.name.as_str()).collect();
        assert_eq!(bench, vec!["Arcanine"]);
    }
}
