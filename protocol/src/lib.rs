use thiserror::Error;

pub mod client;
pub mod server;

pub use client::ClientMessage;
pub use server::{
    BattleEvent, EventKind, HpFraction, Player, PokemonDetails, PokemonRef, ServerFrame,
    parse_battle_event, parse_server_frame,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}
