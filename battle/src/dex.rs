//! Reference data: species types and move type/power
//!
//! The battle model never reaches for ambient tables. A [`ReferenceLookup`] is
//! loaded once and handed to the reducer explicitly.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::types::Type;

/// Lookup contract for species and move reference data
pub trait ReferenceLookup: Send + Sync {
    /// Types of a species, in dex order. Empty when the species is unknown.
    fn types_of(&self, species: &str) -> Vec<Type>;

    /// Type and base power of a move, or `None` when the move is unknown
    fn move_info(&self, name: &str) -> Option<MoveInfo>;
}

/// Reference data for a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInfo {
    /// `None` when the data names a type outside the canonical 18
    pub move_type: Option<Type>,
    /// Base power; 0 for status moves and unknown power
    pub power: u32,
}

#[derive(Error, Debug)]
pub enum DexError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid {what} data: {source}")]
    Json {
        what: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct RawSpecies {
    name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Deserialize)]
struct RawMove {
    name: String,
    #[serde(rename = "type", default)]
    move_type: String,
    #[serde(rename = "basePower", default)]
    base_power: u32,
}

/// Normalize a display name to a lookup id ("U-turn" -> "uturn")
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// In-memory reference data, keyed by normalized name
#[derive(Debug, Clone, Default)]
pub struct Dex {
    species: HashMap<String, Vec<Type>>,
    moves: HashMap<String, MoveInfo>,
}

impl Dex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from Showdown-style `pokedex.json` and `moves.json` contents
    pub fn from_json(pokedex: &str, moves: &str) -> Result<Self, DexError> {
        let raw_species: HashMap<String, RawSpecies> = serde_json::from_str(pokedex)
            .map_err(|source| DexError::Json {
                what: "pokedex",
                source,
            })?;
        let raw_moves: HashMap<String, RawMove> =
            serde_json::from_str(moves).map_err(|source| DexError::Json {
                what: "moves",
                source,
            })?;

        let mut dex = Dex::new();
        for species in raw_species.into_values() {
            let types: Vec<Type> = species
                .types
                .iter()
                .filter_map(|t| Type::from_protocol(t))
                .collect();
            dex.insert_species(&species.name, &types);
        }
        for mv in raw_moves.into_values() {
            dex.insert_move(
                &mv.name,
                MoveInfo {
                    move_type: Type::from_protocol(&mv.move_type),
                    power: mv.base_power,
                },
            );
        }

        Ok(dex)
    }

    /// Read and parse the two reference files
    pub fn load(pokedex_path: impl AsRef<Path>, moves_path: impl AsRef<Path>) -> Result<Self, DexError> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| DexError::Io {
                path: path.display().to_string(),
                source,
            })
        };

        let pokedex = read(pokedex_path.as_ref())?;
        let moves = read(moves_path.as_ref())?;
        Self::from_json(&pokedex, &moves)
    }

    pub fn insert_species(&mut self, name: &str, types: &[Type]) {
        self.species.insert(to_id(name), types.to_vec());
    }

    pub fn insert_move(&mut self, name: &str, info: MoveInfo) {
        self.moves.insert(to_id(name), info);
    }

    /// Builder-style species insert
    pub fn with_species(mut self, name: &str, types: &[Type]) -> Self {
        self.insert_species(name, types);
        self
    }

    /// Builder-style move insert
    pub fn with_move(mut self, name: &str, move_type: Type, power: u32) -> Self {
        self.insert_move(
            name,
            MoveInfo {
                move_type: Some(move_type),
                power,
            },
        );
        self
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

impl ReferenceLookup for Dex {
    fn types_of(&self, species: &str) -> Vec<Type> {
        self.species.get(&to_id(species)).cloned().unwrap_or_default()
    }

    fn move_info(&self, name: &str) -> Option<MoveInfo> {
        self.moves.get(&to_id(name)).copied()
    }
}
