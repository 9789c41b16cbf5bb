//! Square labels and move origins.
//!
//! Square labels are game-specific and opaque to the engine: `"e4"`, `"5c"`,
//! or anything else a ruleset document chooses. The engine only compares
//! them for equality.
//!
//! One origin label is reserved: [`HAND_SENTINEL`] (`"*"`) marks a move that
//! enters the board from the mover's hand (a drop) instead of leaving a
//! square.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved origin label for drops from hand.
pub const HAND_SENTINEL: &str = "*";

/// A game-specific board square label.
///
/// The engine assigns no structure to labels; they are opaque keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareId(pub String);

impl SquareId {
    /// Create a square label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SquareId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for SquareId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a move starts: a board square, or the mover's hand.
///
/// The interchange form writes hand origins as the reserved label `"*"`.
///
/// ```
/// use moveset::Origin;
///
/// assert!(Origin::from("*").is_hand());
/// assert_eq!(Origin::from("e2").to_string(), "e2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The move drops a piece from the mover's hand.
    Hand,
    /// The move starts from this board square.
    Square(SquareId),
}

impl Origin {
    /// Whether this origin is the hand sentinel.
    #[must_use]
    pub fn is_hand(&self) -> bool {
        matches!(self, Origin::Hand)
    }

    /// The board square, if this is not a drop.
    #[must_use]
    pub fn square(&self) -> Option<&SquareId> {
        match self {
            Origin::Hand => None,
            Origin::Square(square) => Some(square),
        }
    }
}

impl From<&str> for Origin {
    fn from(label: &str) -> Self {
        if label == HAND_SENTINEL {
            Origin::Hand
        } else {
            Origin::Square(SquareId::new(label))
        }
    }
}

impl From<SquareId> for Origin {
    fn from(square: SquareId) -> Self {
        Origin::Square(square)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Hand => f.write_str(HAND_SENTINEL),
            Origin::Square(square) => square.fmt(f),
        }
    }
}

impl Serialize for Origin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Origin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Origin::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_label() {
        let square = SquareId::new("e4");
        assert_eq!(square.as_str(), "e4");
        assert_eq!(square.to_string(), "e4");
        assert_eq!(square, SquareId::from("e4"));
        assert_ne!(square, SquareId::from("e5"));
    }

    #[test]
    fn test_origin_from_label() {
        assert_eq!(Origin::from("*"), Origin::Hand);
        assert_eq!(Origin::from("e2"), Origin::Square(SquareId::from("e2")));
        assert!(Origin::from("*").is_hand());
        assert!(!Origin::from("e2").is_hand());
    }

    #[test]
    fn test_origin_square_accessor() {
        assert_eq!(Origin::Hand.square(), None);
        assert_eq!(
            Origin::from("5c").square(),
            Some(&SquareId::from("5c"))
        );
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::Hand.to_string(), "*");
        assert_eq!(Origin::from("e2").to_string(), "e2");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Origin::Hand).unwrap();
        assert_eq!(json, "\"*\"");
        let back: Origin = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Origin::Hand);

        let square: SquareId = serde_json::from_str("\"e4\"").unwrap();
        assert_eq!(square, SquareId::from("e4"));
    }
}
