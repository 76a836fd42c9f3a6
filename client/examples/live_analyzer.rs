//! Live Battle Analyzer Example
//!
//! Joins a battle room as a spectator and prints every session fragment as a
//! JSON line: status notices, notable protocol lines and analysis snapshots.
//!
//! ```text
//! cargo run --example live_analyzer -- gen9randombattle-2001 [pokedex.json moves.json]
//! ```
//!
//! Without reference data every species is typeless and every move is a
//! neutral 80 power hit.

use std::sync::Arc;

use anyhow::{Context, Result};
use scout_battle::Dex;
use scout_client::{ChannelSink, PumpConfig, Session, WebSocketConnector};
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let room = args
        .next()
        .context("usage: live_analyzer <room> [pokedex.json moves.json]")?;

    let dex = match (args.next(), args.next()) {
        (Some(pokedex), Some(moves)) => Dex::load(&pokedex, &moves)?,
        _ => Dex::new(),
    };
    tracing::info!(
        species = dex.species_count(),
        moves = dex.move_count(),
        "Reference data loaded"
    );

    let config = PumpConfig::default();
    let connector = WebSocketConnector::new(config.server_url.clone());
    let session = Session::new(config, Arc::new(connector), Arc::new(dex));

    let (cancel_tx, cancel_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("Stopping...");
            let _ = cancel_tx.send(());
        }
    });

    let (mut sink, mut fragments) = ChannelSink::channel(64);
    let printer = tokio::spawn(async move {
        while let Some(fragment) = fragments.recv().await {
            match serde_json::to_string(&fragment) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::warn!(error = %e, "Failed to encode fragment"),
            }
        }
    });

    let outcome = session.run(&room, &mut sink, cancel_rx).await;
    drop(sink);
    printer.await?;

    match outcome {
        Ok(outcome) => println!("Session ended: {:?}", outcome),
        Err(e) => println!("Session failed: {}", e),
    }

    Ok(())
}
