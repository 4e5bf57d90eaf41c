//! Refresh signalling: tells listeners that store state may have changed.
//!
//! Backed by a `tokio::sync::watch` channel. Listeners either poll
//! [`RefreshListener::has_changed`] synchronously or await
//! [`RefreshListener::changed`]. Several notifications between two polls
//! collapse into one; only the latest [`Refresh`] is kept.

use tokio::sync::watch;

use crate::RoomId;

/// Why a refresh was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// The expiration sweep removed at least one room.
    RoomsExpired,
    /// A game started in the given room.
    GameStarted(RoomId),
    /// Someone asked for a broadcast explicitly.
    Forced,
}

/// The value carried on the refresh channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh {
    /// Bumped by one on every notification.
    pub generation: u64,
    /// The most recent reason, `None` before the first notification.
    pub reason: Option<RefreshReason>,
}

/// Publisher side of the refresh channel.
#[derive(Debug)]
pub struct RefreshHub {
    tx: watch::Sender<Refresh>,
}

impl RefreshHub {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Refresh {
            generation: 0,
            reason: None,
        });
        Self { tx }
    }

    /// Registers a new listener. It starts out with nothing pending.
    pub fn subscribe(&self) -> RefreshListener {
        RefreshListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Publishes a refresh to every listener.
    ///
    /// Works with zero listeners; the generation still advances.
    pub fn notify(&self, reason: RefreshReason) {
        self.tx.send_modify(|refresh| {
            refresh.generation += 1;
            refresh.reason = Some(reason);
        });
        tracing::debug!(
            ?reason,
            listeners = self.tx.receiver_count(),
            "refresh published"
        );
    }

    /// Broadcasts a refresh regardless of whether anything changed.
    pub fn force(&self) {
        self.notify(RefreshReason::Forced);
    }

    /// Number of notifications published so far.
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RefreshHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber side of the refresh channel.
#[derive(Debug, Clone)]
pub struct RefreshListener {
    rx: watch::Receiver<Refresh>,
}

impl RefreshListener {
    /// Returns `true` if a refresh was published since the last
    /// [`acknowledge`](Self::acknowledge) (or since subscribing).
    pub fn has_changed(&self) -> bool {
        // The hub owns the sender; it can only be gone if the store is.
        self.rx.has_changed().unwrap_or(false)
    }

    /// Marks the latest refresh as seen and returns it.
    pub fn acknowledge(&mut self) -> Refresh {
        *self.rx.borrow_and_update()
    }

    /// Waits for the next refresh. Returns `None` once the hub is dropped.
    pub async fn changed(&mut self) -> Option<Refresh> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
