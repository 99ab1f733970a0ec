//! Move representation.
//!
//! A move is an explicit tagged union: the discriminant says which side
//! makes it and which catalog the id refers to.

use serde::{Deserialize, Serialize};

use super::side::Side;

/// Catalog identifier of an attack or defense (e.g. `"dos"`, `"firewall"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(String);

impl MoveId {
    /// Create a move id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MoveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MoveId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MoveId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::borrow::Borrow<str> for MoveId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A single ply.
///
/// ## Example
///
/// ```
/// use netwar::core::{Move, Side};
///
/// let mv = Move::attack("dos");
/// assert_eq!(mv.side(), Side::Attacker);
/// assert_eq!(mv.id().as_str(), "dos");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Move {
    /// Launch an attack from the attack catalog.
    Attack(MoveId),
    /// Deploy a defense from the defense catalog.
    Defense(MoveId),
}

impl Move {
    /// Attack move.
    #[must_use]
    pub fn attack(id: impl Into<MoveId>) -> Self {
        Move::Attack(id.into())
    }

    /// Defense move.
    #[must_use]
    pub fn defense(id: impl Into<MoveId>) -> Self {
        Move::Defense(id.into())
    }

    /// The side entitled to make this move.
    #[must_use]
    pub fn side(&self) -> Side {
        match self {
            Move::Attack(_) => Side::Attacker,
            Move::Defense(_) => Side::Defender,
        }
    }

    /// The catalog id.
    #[must_use]
    pub fn id(&self) -> &MoveId {
        match self {
            Move::Attack(id) | Move::Defense(id) => id,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Attack(id) => write!(f, "attack:{id}"),
            Move::Defense(id) => write!(f, "defense:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_side() {
        assert_eq!(Move::attack("dos").side(), Side::Attacker);
        assert_eq!(Move::defense("firewall").side(), Side::Defender);
    }

    #[test]
    fn test_move_equality() {
        assert_eq!(Move::attack("dos"), Move::attack("dos"));
        assert_ne!(Move::attack("dos"), Move::defense("dos"));
        assert_ne!(Move::attack("dos"), Move::attack("sql"));
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::attack("sql").to_string(), "attack:sql");
        assert_eq!(Move::defense("ids").to_string(), "defense:ids");
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::defense("firewall");
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, r#"{"kind":"defense","id":"firewall"}"#);

        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, back);
    }
}
