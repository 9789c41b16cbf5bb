//! Square occupation predicates.
//!
//! Conditions in a rule describe squares, not pieces in motion: each one
//! names a square and the occupation it must (or must not) have for the
//! rule to apply.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{ActorId, ParseActorError, Side};

/// What a condition demands of one square.
///
/// `Empty` and `Enemy` are written as the bare keywords `"empty"` and
/// `"enemy"` in rule documents; anything else is parsed as an exact actor
/// identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OccupationState {
    /// The square has no occupant.
    Empty,
    /// The square is occupied by a piece of the non-active side.
    Enemy,
    /// The square is occupied by precisely this actor, modifiers included.
    Exact(ActorId),
}

impl OccupationState {
    /// Parse a condition value as written in a rule document.
    pub fn from_literal(literal: &str) -> Result<Self, ParseActorError> {
        match literal {
            "empty" => Ok(Self::Empty),
            "enemy" => Ok(Self::Enemy),
            other => other.parse().map(Self::Exact),
        }
    }

    /// Whether this predicate holds for a square's occupant.
    ///
    /// `Enemy` is relative to the active side: it holds exactly when the
    /// occupant exists and belongs to the opponent. `Exact` compares the
    /// whole identifier, so a promoted piece never satisfies a condition
    /// written for its base form.
    #[must_use]
    pub fn holds(&self, occupant: Option<&ActorId>, active: Side) -> bool {
        match self {
            Self::Empty => occupant.is_none(),
            Self::Enemy => occupant.is_some_and(|actor| actor.side() != active),
            Self::Exact(expected) => occupant == Some(expected),
        }
    }
}

impl fmt::Display for OccupationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Enemy => f.write_str("enemy"),
            Self::Exact(actor) => actor.fmt(f),
        }
    }
}

impl Serialize for OccupationState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OccupationState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_literal(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(s: &str) -> ActorId {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_literal() {
        assert_eq!(OccupationState::from_literal("empty"), Ok(OccupationState::Empty));
        assert_eq!(OccupationState::from_literal("enemy"), Ok(OccupationState::Enemy));
        assert_eq!(
            OccupationState::from_literal("chess:r"),
            Ok(OccupationState::Exact(actor("chess:r")))
        );
        assert!(OccupationState::from_literal("Empty").is_err());
        assert!(OccupationState::from_literal("friend").is_err());
    }

    #[test]
    fn test_empty_holds_only_on_vacancy() {
        let pawn = actor("CHESS:P");
        assert!(OccupationState::Empty.holds(None, Side::First));
        assert!(!OccupationState::Empty.holds(Some(&pawn), Side::First));
    }

    #[test]
    fn test_enemy_is_relative_to_active_side() {
        let white_pawn = actor("CHESS:P");
        let black_pawn = actor("chess:p");

        assert!(OccupationState::Enemy.holds(Some(&black_pawn), Side::First));
        assert!(!OccupationState::Enemy.holds(Some(&white_pawn), Side::First));
        assert!(OccupationState::Enemy.holds(Some(&white_pawn), Side::Second));
        assert!(!OccupationState::Enemy.holds(None, Side::First));
    }

    #[test]
    fn test_exact_requires_full_identifier_match() {
        let expected = OccupationState::Exact(actor("SHOGI:P"));

        assert!(expected.holds(Some(&actor("SHOGI:P")), Side::First));
        assert!(!expected.holds(Some(&actor("SHOGI:+P")), Side::First));
        assert!(!expected.holds(Some(&actor("shogi:p")), Side::First));
        assert!(!expected.holds(None, Side::First));
    }

    #[test]
    fn test_display_round_trips_through_literal() {
        for s in ["empty", "enemy", "CHESS:P", "shogi:+p'"] {
            let state = OccupationState::from_literal(s).unwrap();
            assert_eq!(state.to_string(), s);
        }
    }

    #[test]
    fn test_serde_uses_literal_form() {
        let json = serde_json::to_string(&OccupationState::Enemy).unwrap();
        assert_eq!(json, "\"enemy\"");

        let exact: OccupationState = serde_json::from_str("\"CHESS:K'\"").unwrap();
        assert_eq!(exact, OccupationState::Exact(actor("CHESS:K'")));

        assert!(serde_json::from_str::<OccupationState>("\"occupied\"").is_err());
    }
}
