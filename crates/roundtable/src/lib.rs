//! # Roundtable
//!
//! Room lobby and role assignment core for social-deduction party games.
//!
//! Players gather in rooms, the room owner starts the game, and every
//! player is dealt a secret role plus whatever their role lets them know
//! about the others. Rendering, transport, and process startup belong to
//! the presentation layer that calls into this crate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roundtable::prelude::*;
//!
//! # async fn demo() -> Result<(), RoundtableError> {
//! let lobby = Lobby::builder().spawn();
//! let store = lobby.store();
//!
//! let room = store.create_room("arthur");
//! for name in ["arthur", "bedivere", "gawain", "kay", "lancelot", "percy", "tristan"] {
//!     store.join_room(room, name)?;
//! }
//! store.start_game(room)?;
//! let info = store.game_information(room, "arthur")?;
//! println!("{}: {:?}", info.role, info.knowledge);
//!
//! lobby.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod lobby;
pub mod telemetry;

pub use error::RoundtableError;
pub use lobby::{Lobby, LobbyBuilder};

pub use roundtable_roles as roles;
pub use roundtable_room as room;
pub use roundtable_sweep as sweep;

pub mod prelude {
    //! The types most callers need.

    pub use crate::{Lobby, LobbyBuilder, RoundtableError};
    pub use roundtable_roles::{GameInformation, Role, RoomConfiguration};
    pub use roundtable_room::{
        RefreshListener, RefreshReason, Room, RoomError, RoomId, RoomStatus, RoomStore,
    };
}
