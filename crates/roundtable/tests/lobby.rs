//! Integration tests for the lobby: store + sweeper + refresh wiring.
//!
//! All tests run on a paused Tokio clock so two-hour timeouts and
//! thirty-second sweeps elapse instantly.

use std::time::Duration;

use roundtable::prelude::*;
use roundtable::sweep::SweepConfig;

// =========================================================================
// Helpers
// =========================================================================

const TWO_HOURS: Duration = Duration::from_secs(2 * 60 * 60);

fn lobby() -> Lobby {
    Lobby::builder()
        .sweep_config(SweepConfig {
            initial_jitter: Duration::ZERO,
            ..SweepConfig::default()
        })
        .spawn()
}

/// Lets the sweeper task run until the clock has moved by `by`.
async fn elapse(by: Duration) {
    tokio::time::sleep(by).await;
}

// =========================================================================
// Builder
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_builder_applies_room_timeout() {
    let lobby = Lobby::builder()
        .room_timeout(Duration::from_secs(90))
        .spawn();
    assert_eq!(
        lobby.store().config().room_timeout,
        Duration::from_secs(90)
    );
    lobby.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn test_default_lobby_uses_two_hour_timeout() {
    let lobby = lobby();
    assert_eq!(lobby.store().config().room_timeout, TWO_HOURS);
    lobby.shutdown().await.expect("clean shutdown");
}

// =========================================================================
// Expiration sweeps
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_sweeper_expires_stale_rooms_and_notifies() {
    let lobby = lobby();
    let mut listener = lobby.subscribe();
    let room = lobby.store().create_room("arthur");

    elapse(TWO_HOURS + Duration::from_secs(31)).await;

    assert_eq!(
        lobby.store().get_room(room).unwrap_err(),
        RoomError::NotFound(room)
    );
    assert!(listener.has_changed());
    assert_eq!(
        listener.acknowledge().reason,
        Some(RefreshReason::RoomsExpired)
    );

    let metrics = lobby.shutdown().await.expect("clean shutdown");
    assert!(metrics.total_sweeps >= 240);
    assert_eq!(metrics.productive_sweeps, 1);
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_quiet_when_nothing_expires() {
    let lobby = lobby();
    let listener = lobby.subscribe();
    lobby.store().create_room("arthur");

    elapse(Duration::from_secs(10 * 60)).await;

    assert_eq!(lobby.store().room_count(), 1);
    assert!(!listener.has_changed());

    let metrics = lobby.shutdown().await.expect("clean shutdown");
    assert!(metrics.total_sweeps >= 19);
    assert_eq!(metrics.productive_sweeps, 0);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_sweeper_never_expires() {
    let lobby = Lobby::builder().sweep_interval(Duration::ZERO).spawn();
    let room = lobby.store().create_room("arthur");

    elapse(TWO_HOURS * 2).await;
    assert!(lobby.store().get_room(room).is_ok());

    // A manual sweep still works.
    assert!(lobby.store().check_expiration());

    let metrics = lobby.shutdown().await.expect("clean shutdown");
    assert_eq!(metrics.total_sweeps, 0);
}

#[tokio::test(start_paused = true)]
async fn test_paused_sweeps_hold_expiry_until_resumed() {
    let lobby = lobby();
    let mut listener = lobby.subscribe();
    let room = lobby.store().create_room("arthur");

    lobby.pause_sweeps();
    assert!(lobby.sweeps_paused());
    elapse(TWO_HOURS + Duration::from_secs(10 * 60)).await;

    assert!(lobby.store().get_room(room).is_ok());
    assert!(!listener.has_changed());

    lobby.resume_sweeps();
    assert!(!lobby.sweeps_paused());
    elapse(Duration::from_secs(31)).await;

    assert_eq!(
        lobby.store().get_room(room).unwrap_err(),
        RoomError::NotFound(room)
    );
    assert_eq!(
        listener.acknowledge().reason,
        Some(RefreshReason::RoomsExpired)
    );

    let metrics = lobby.shutdown().await.expect("clean shutdown");
    assert_eq!(metrics.total_sweeps, 1);
    assert_eq!(metrics.productive_sweeps, 1);
}

#[tokio::test(start_paused = true)]
async fn test_pause_and_resume_are_idempotent() {
    let lobby = lobby();
    lobby.pause_sweeps();
    lobby.pause_sweeps();
    assert!(lobby.sweeps_paused());
    lobby.resume_sweeps();
    lobby.resume_sweeps();
    assert!(!lobby.sweeps_paused());
    lobby.shutdown().await.expect("clean shutdown");
}

// =========================================================================
// Refresh
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_force_refresh_reaches_every_listener() {
    let lobby = lobby();
    let mut first = lobby.subscribe();
    let mut second = lobby.subscribe();

    lobby.force_refresh();

    assert_eq!(
        first.changed().await.and_then(|r| r.reason),
        Some(RefreshReason::Forced)
    );
    assert_eq!(
        second.changed().await.and_then(|r| r.reason),
        Some(RefreshReason::Forced)
    );
    lobby.shutdown().await.expect("clean shutdown");
}

// =========================================================================
// Full game flow
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_full_flow_create_join_start() {
    let lobby = lobby();
    let store = lobby.store().clone();
    let mut listener = lobby.subscribe();

    let room = store.create_room("arthur");
    let knights = ["arthur", "bedivere", "gawain", "kay", "lancelot", "percy", "tristan"];
    for name in knights {
        store.join_room(room, name).expect("seat available");
    }
    assert_eq!(store.list_descriptions()[0].status, "(7/7 players)");

    store.start_game(room).expect("start");
    assert_eq!(
        listener.changed().await.and_then(|r| r.reason),
        Some(RefreshReason::GameStarted(room))
    );

    let evil = knights
        .iter()
        .map(|name| store.game_information(room, name).expect("dealt"))
        .filter(|info| info.role.is_evil())
        .count();
    assert_eq!(evil, 3);

    // Sitting at an active table still blocks joining another one.
    let other = store.create_room("mordred");
    assert!(matches!(
        store.join_room(other, "kay"),
        Err(RoomError::InvalidState(_))
    ));

    lobby.shutdown().await.expect("clean shutdown");
}
