//! Store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Settings for a [`RoomStore`](crate::RoomStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Rooms older than this are removed by the next expiration sweep.
    pub room_timeout: Duration,
}

impl StoreConfig {
    /// Default room lifetime: two hours from creation.
    pub const DEFAULT_ROOM_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

    /// Creates a config with a custom room timeout.
    pub fn with_timeout(room_timeout: Duration) -> Self {
        Self { room_timeout }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            room_timeout: Self::DEFAULT_ROOM_TIMEOUT,
        }
    }
}
