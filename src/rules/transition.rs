//! Resolved state changes.
//!
//! A [`Transition`] is the output side of a rule: the exact board diff plus
//! any hand credit or debit. It carries no conditions; by the time one is
//! produced, its rule has already matched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{ActorId, SquareId};

/// Board diff: squares to rewrite, `None` meaning vacate.
///
/// Squares absent from the diff are untouched. A `BTreeMap` keeps the
/// entries in a stable order for display and comparison.
pub type Diff = BTreeMap<SquareId, Option<ActorId>>;

/// A fully resolved state change.
///
/// Applying one to a position means merging [`Transition::diff`] into the
/// board, crediting [`Transition::gain`] to the mover's hand in base form,
/// and debiting [`Transition::drop`] from it. [`Board::apply`] and
/// [`Hand::apply`] do exactly that.
///
/// [`Board::apply`]: crate::core::Board::apply
/// [`Hand::apply`]: crate::core::Hand::apply
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Squares rewritten by this change.
    pub diff: Diff,
    /// Base-form piece credited to the mover's hand, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<ActorId>,
    /// Base-form piece debited from the mover's hand, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop: Option<ActorId>,
}

impl Transition {
    /// Assemble a transition from its parts.
    #[must_use]
    pub fn new(diff: Diff, gain: Option<ActorId>, drop: Option<ActorId>) -> Self {
        Self { diff, gain, drop }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(s: &str) -> ActorId {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_diff_is_a_valid_transition() {
        let pass = Transition::new(Diff::new(), None, None);
        assert!(pass.diff.is_empty());
        assert_eq!(pass.gain, None);
    }

    #[test]
    fn test_serialization_skips_absent_hand_fields() {
        let mut diff = Diff::new();
        diff.insert(SquareId::from("e2"), None);
        diff.insert(SquareId::from("e4"), Some(actor("CHESS:P")));
        let quiet = Transition::new(diff, None, None);

        let json = serde_json::to_string(&quiet).unwrap();
        assert_eq!(json, r#"{"diff":{"e2":null,"e4":"CHESS:P"}}"#);

        let back: Transition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quiet);
    }

    #[test]
    fn test_serialization_keeps_hand_fields() {
        let capture = Transition::new(Diff::new(), Some(actor("SHOGI:P")), None);
        let json = serde_json::to_string(&capture).unwrap();
        assert_eq!(json, r#"{"diff":{},"gain":"SHOGI:P"}"#);
    }
}
