//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The two parties of the wargame: the attacker and the defender.
//!
//! ## SideMap
//!
//! Per-side storage with O(1) access, indexable by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Spends resources on attacks to drive the security level down.
    Attacker,
    /// Deploys defenses to protect nodes and restore security.
    Defender,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Attacker => write!(f, "attacker"),
            Side::Defender => write!(f, "defender"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use netwar::core::{Side, SideMap};
///
/// let mut resources = SideMap::new(|side| match side {
///     Side::Attacker => 20,
///     Side::Defender => 15,
/// });
///
/// resources[Side::Defender] += 3;
/// assert_eq!(resources[Side::Defender], 18);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    attacker: T,
    defender: T,
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            attacker: factory(Side::Attacker),
            defender: factory(Side::Defender),
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        }
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
