//! The role set and the side each role plays for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which team a role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Good,
    Evil,
}

/// A secret role dealt to one player.
///
/// The generic roles pad the pool once every enabled special role has
/// been added. Ordering (`Ord`) is only used to keep lookups stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Role {
    GenericGood,
    GenericEvil,
    Merlin,
    Percival,
    Mordred,
    Morganna,
    Assassin,
    Oberon,
}

impl Role {
    /// The side this role plays for.
    ///
    /// Oberon counts toward the evil quota even though he is cut off
    /// from the rest of the evil team.
    pub fn alignment(self) -> Alignment {
        match self {
            Self::GenericGood | Self::Merlin | Self::Percival => Alignment::Good,
            Self::GenericEvil
            | Self::Mordred
            | Self::Morganna
            | Self::Assassin
            | Self::Oberon => Alignment::Evil,
        }
    }

    pub fn is_evil(self) -> bool {
        self.alignment() == Alignment::Evil
    }

    /// Returns `true` for every role except the two generic paddings.
    pub fn is_special(self) -> bool {
        !matches!(self, Self::GenericGood | Self::GenericEvil)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenericGood => write!(f, "Loyal Servant of Arthur"),
            Self::GenericEvil => write!(f, "Minion of Mordred"),
            Self::Merlin => write!(f, "Merlin"),
            Self::Percival => write!(f, "Percival"),
            Self::Mordred => write!(f, "Mordred"),
            Self::Morganna => write!(f, "Morganna"),
            Self::Assassin => write!(f, "Assassin"),
            Self::Oberon => write!(f, "Oberon"),
        }
    }
}
