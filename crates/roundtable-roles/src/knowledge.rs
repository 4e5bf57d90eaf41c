//! Knowledge disclosure: what each role learns about the others.
//!
//! | role                          | sees                                  | as            |
//! |-------------------------------|---------------------------------------|---------------|
//! | Merlin                        | Morganna, Assassin, generic evil, Oberon | evil       |
//! | Percival                      | Merlin, Morganna                      | magical       |
//! | Assassin, Mordred, Morganna, generic evil | Morganna, Assassin, Mordred, generic evil | evil with you |
//! | everyone else                 | nobody                                |               |
//!
//! Mordred is hidden from Merlin, and Oberon is hidden from (and blind to)
//! the rest of the evil team.

use std::collections::BTreeMap;
use std::fmt;

use crate::Role;

/// How a disclosed player is described to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    Evil,
    Magical,
    EvilWithYou,
}

impl fmt::Display for Disclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evil => write!(f, "evil"),
            Self::Magical => write!(f, "magical"),
            Self::EvilWithYou => write!(f, "evil with you"),
        }
    }
}

const MERLIN_SEES: &[Role] = &[
    Role::Morganna,
    Role::Assassin,
    Role::GenericEvil,
    Role::Oberon,
];
const PERCIVAL_SEES: &[Role] = &[Role::Merlin, Role::Morganna];
const EVIL_SEES: &[Role] = &[
    Role::Morganna,
    Role::Assassin,
    Role::Mordred,
    Role::GenericEvil,
];

/// The roles a viewer can see and how they're described, if any.
fn sight(role: Role) -> Option<(Disclosure, &'static [Role])> {
    match role {
        Role::Merlin => Some((Disclosure::Evil, MERLIN_SEES)),
        Role::Percival => Some((Disclosure::Magical, PERCIVAL_SEES)),
        Role::Assassin | Role::Mordred | Role::Morganna | Role::GenericEvil => {
            Some((Disclosure::EvilWithYou, EVIL_SEES))
        }
        Role::GenericGood | Role::Oberon => None,
    }
}

/// Builds every player's disclosure statements from a finished deal.
///
/// Each statement reads `"<name> is <description>."`. A player never
/// hears about themselves. Statements are sorted so the output depends
/// only on the deal.
pub fn disclose(roles: &BTreeMap<String, Role>) -> BTreeMap<String, Vec<String>> {
    let mut holders: BTreeMap<Role, Vec<&str>> = BTreeMap::new();
    for (name, role) in roles {
        holders.entry(*role).or_default().push(name);
    }

    roles
        .iter()
        .map(|(viewer, role)| {
            let mut knowledge = Vec::new();
            if let Some((description, targets)) = sight(*role) {
                for target in targets {
                    let Some(names) = holders.get(target) else {
                        continue;
                    };
                    for name in names.iter().filter(|n| **n != viewer.as_str()) {
                        knowledge.push(format!("{name} is {description}."));
                    }
                }
            }
            knowledge.sort();
            (viewer.clone(), knowledge)
        })
        .collect()
}
