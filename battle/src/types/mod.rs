//! Domain types for battle state tracking

mod field;
mod pokemon;
mod pokemon_type;
mod side;

pub use field::FieldState;
pub use pokemon::{Move, PokemonState};
pub use pokemon_type::{move_effectiveness, Type, Verdict, TYPE_CHART};
pub use side::SideState;
