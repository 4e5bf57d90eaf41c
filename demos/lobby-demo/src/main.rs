use std::time::Duration;

use roundtable::prelude::*;
use roundtable::telemetry;

// ---------------------------------------------------------------------------
// Table setup
// ---------------------------------------------------------------------------

const KNIGHTS: [&str; 7] = [
    "arthur", "bedivere", "gawain", "kay", "lancelot", "percy", "tristan",
];

/// A five-seat table with Oberon replacing Morganna.
fn small_table() -> RoomConfiguration {
    RoomConfiguration {
        num_players: 5,
        has_morganna: false,
        has_oberon: true,
        ..RoomConfiguration::default()
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let lobby = Lobby::builder()
        .room_timeout(Duration::from_secs(60 * 60))
        .sweep_interval(Duration::from_secs(10))
        .spawn();
    let store = lobby.store().clone();
    let mut refresh = lobby.subscribe();

    // A full seven-player game on the default configuration.
    let camelot = store.create_room("arthur");
    for name in KNIGHTS {
        store.join_room(camelot, name)?;
    }

    // A second, smaller room that stays in the lobby.
    let tintagel = store.create_room("mark");
    store.update_config(tintagel, small_table())?;
    for name in ["mark", "iseult", "brangaine"] {
        store.join_room(tintagel, name)?;
    }

    println!("Open rooms:");
    println!("{}", serde_json::to_string_pretty(&store.list_descriptions())?);

    store.start_game(camelot)?;
    if let Some(update) = refresh.changed().await {
        tracing::info!(generation = update.generation, reason = ?update.reason, "lobby refreshed");
    }

    println!();
    println!("Roles in {camelot}:");
    for name in KNIGHTS {
        let info = store.game_information(camelot, name)?;
        println!("  {name:<9} {}", info.role);
        for line in &info.knowledge {
            println!("            {line}");
        }
    }

    // Starting twice is refused.
    if let Err(err) = store.start_game(camelot) {
        println!();
        println!("second start refused: {err}");
    }

    let metrics = lobby.shutdown().await?;
    tracing::info!(sweeps = metrics.total_sweeps, "demo finished");
    Ok(())
}
