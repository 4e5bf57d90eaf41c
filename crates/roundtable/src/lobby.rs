//! `Lobby` builder and background expiration sweeper.
//!
//! This ties the layers together: a shared [`RoomStore`] plus a Tokio
//! task that sweeps expired rooms on a fixed interval and publishes a
//! refresh whenever a sweep removed something.

use std::sync::Arc;
use std::time::Duration;

use roundtable_room::{RefreshListener, RefreshReason, RoomStore, StoreConfig};
use roundtable_sweep::{SweepConfig, SweepMetrics, SweepScheduler};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::RoundtableError;

/// Builder for configuring and starting a [`Lobby`].
///
/// # Example
///
/// ```rust,ignore
/// let lobby = Lobby::builder()
///     .room_timeout(Duration::from_secs(3600))
///     .sweep_interval(Duration::from_secs(10))
///     .spawn();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LobbyBuilder {
    store_config: StoreConfig,
    sweep_config: SweepConfig,
}

impl LobbyBuilder {
    /// Creates a new builder with default settings (2 h rooms, 30 s sweeps).
    pub fn new() -> Self {
        Self::default()
    }

    /// How long a room lives before the sweeper removes it.
    pub fn room_timeout(mut self, timeout: Duration) -> Self {
        self.store_config.room_timeout = timeout;
        self
    }

    /// Time between expiration sweeps. Zero turns the sweeper off.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_config.interval = interval;
        self
    }

    /// Replaces the whole store configuration.
    pub fn store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = config;
        self
    }

    /// Replaces the whole sweep configuration.
    pub fn sweep_config(mut self, config: SweepConfig) -> Self {
        self.sweep_config = config;
        self
    }

    /// Creates the store and spawns the sweeper task.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn spawn(self) -> Lobby {
        let store = Arc::new(RoomStore::new(self.store_config));
        let scheduler = SweepScheduler::new(self.sweep_config);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (paused_tx, paused_rx) = watch::channel(false);

        let sweeper = tokio::spawn(run_sweeper(
            Arc::clone(&store),
            scheduler,
            paused_rx,
            shutdown_rx,
        ));

        tracing::info!(
            room_timeout_secs = store.config().room_timeout.as_secs(),
            "lobby started"
        );

        Lobby {
            store,
            sweeps_paused: paused_tx,
            shutdown: shutdown_tx,
            sweeper,
        }
    }
}

/// A running lobby: the shared room store plus its expiration sweeper.
pub struct Lobby {
    store: Arc<RoomStore>,
    sweeps_paused: watch::Sender<bool>,
    shutdown: oneshot::Sender<()>,
    sweeper: JoinHandle<SweepMetrics>,
}

impl Lobby {
    /// Creates a new builder.
    pub fn builder() -> LobbyBuilder {
        LobbyBuilder::new()
    }

    /// The shared room store. Clone the `Arc` to hand it to request
    /// handlers.
    pub fn store(&self) -> &Arc<RoomStore> {
        &self.store
    }

    /// Registers a refresh listener.
    pub fn subscribe(&self) -> RefreshListener {
        self.store.subscribe()
    }

    /// Broadcasts a refresh to every listener.
    pub fn force_refresh(&self) {
        self.store.refresh().force();
    }

    /// Suspends expiration sweeps. Rooms keep aging while paused and are
    /// removed by the first sweep after [`resume_sweeps`](Self::resume_sweeps).
    pub fn pause_sweeps(&self) {
        if !self.sweeps_paused.send_replace(true) {
            tracing::info!("expiration sweeps paused");
        }
    }

    /// Resumes sweeping. The next sweep is one full interval from now.
    pub fn resume_sweeps(&self) {
        if self.sweeps_paused.send_replace(false) {
            tracing::info!("expiration sweeps resumed");
        }
    }

    pub fn sweeps_paused(&self) -> bool {
        *self.sweeps_paused.borrow()
    }

    /// Stops the sweeper and returns its final metrics.
    ///
    /// The store itself stays usable through any `Arc` clones still held.
    pub async fn shutdown(self) -> Result<SweepMetrics, RoundtableError> {
        // The sweeper may already be gone; joining below reports why.
        let _ = self.shutdown.send(());
        let metrics = self.sweeper.await?;
        tracing::info!(
            sweeps = metrics.total_sweeps,
            productive = metrics.productive_sweeps,
            "lobby stopped"
        );
        Ok(metrics)
    }
}

/// Sweeps expired rooms until told to stop.
async fn run_sweeper(
    store: Arc<RoomStore>,
    mut scheduler: SweepScheduler,
    mut paused: watch::Receiver<bool>,
    mut shutdown: oneshot::Receiver<()>,
) -> SweepMetrics {
    tracing::debug!("expiration sweeper started");

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = paused.changed() => {
                if changed.is_err() {
                    break;
                }
                if *paused.borrow_and_update() {
                    scheduler.pause();
                } else {
                    scheduler.resume();
                }
            }
            info = scheduler.wait_for_sweep() => {
                let removed = store.check_expiration();
                if removed {
                    store.refresh().notify(RefreshReason::RoomsExpired);
                }
                scheduler.record_sweep_end(removed);
                tracing::trace!(sweep = info.sweep, removed, "sweep finished");
            }
        }
    }

    tracing::debug!("expiration sweeper stopped");
    scheduler.metrics().clone()
}
