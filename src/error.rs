//! Error taxonomy.
//!
//! Failures are split by when they can happen:
//!
//! - [`StructuralError`]: the ruleset document has the wrong shape.
//! - [`LogicalConsistencyError`]: the document is well-shaped but a rule
//!   can never, or need never, apply as written.
//! - [`LookupError`]: a navigation step named an actor, origin, or target
//!   the ruleset does not declare.
//! - [`InvalidArgumentError`]: a caller-supplied evaluation argument is
//!   malformed.
//!
//! Document-level errors carry a [`RulePath`] so the report names the exact
//! rule, and where relevant the field and square, that failed.

use std::fmt;

use thiserror::Error;

use crate::core::{ActorId, Origin, ParseActorError, SquareId};
use crate::rules::OccupationState;

/// Address of one rule inside a ruleset document.
///
/// Displays as `rule 2 of CHESS:P e2 -> e4`, with the hand origin shown as
/// its `*` sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulePath {
    /// The actor whose rule list contains the rule.
    pub actor: ActorId,
    /// The origin the rule moves from.
    pub origin: Origin,
    /// The target square the rule moves to.
    pub target: SquareId,
    /// Zero-based position in the declared rule list.
    pub index: usize,
}

impl RulePath {
    /// Address a rule by its coordinates.
    #[must_use]
    pub fn new(actor: ActorId, origin: Origin, target: SquareId, index: usize) -> Self {
        Self {
            actor,
            origin,
            target,
            index,
        }
    }
}

impl fmt::Display for RulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule {} of {} {} -> {}",
            self.index, self.actor, self.origin, self.target
        )
    }
}

/// The ruleset document does not have the expected shape.
///
/// Raised while walking the nested JSON tables, before any logic runs.
/// Every variant pins the failure to the narrowest location known at that
/// point of the walk.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The document root is not a JSON object.
    #[error("ruleset document must be a JSON object")]
    RootNotObject,

    /// A top-level key is not a well-formed actor identifier.
    #[error("invalid actor identifier {actor:?}: {source}")]
    InvalidActor {
        actor: String,
        source: ParseActorError,
    },

    /// An actor's value is not an origin table.
    #[error("origin table for {actor} must be a JSON object")]
    OriginTableNotObject { actor: ActorId },

    /// An origin label is the empty string.
    #[error("{actor} has an empty origin label")]
    EmptyOrigin { actor: ActorId },

    /// An origin's value is not a target table.
    #[error("target table for {actor} at {origin} must be a JSON object")]
    TargetTableNotObject { actor: ActorId, origin: Origin },

    /// A target label is empty or the reserved `*` sentinel.
    #[error("invalid target label {target:?} for {actor} at {origin}")]
    InvalidTarget {
        actor: ActorId,
        origin: Origin,
        target: String,
    },

    /// A target's value is not an array of rules.
    #[error("rules for {actor} {origin} -> {target} must be a JSON array")]
    RuleListNotArray {
        actor: ActorId,
        origin: Origin,
        target: SquareId,
    },

    /// A rule list entry is not a JSON object.
    #[error("{path} must be a JSON object")]
    RuleNotObject { path: RulePath },

    /// A rule object carries a key outside the rule vocabulary.
    #[error("{path} has unknown key {key:?}")]
    UnknownKey { path: RulePath, key: String },

    /// A rule object has no perform table.
    #[error("{path} is missing its perform table")]
    MissingPerform { path: RulePath },

    /// A require, prevent, or perform value is not a JSON object.
    #[error("{field} of {path} must be a JSON object")]
    FieldNotObject {
        path: RulePath,
        field: &'static str,
    },

    /// A square key inside a rule field is empty or reserved.
    #[error("invalid square label {square:?} in {field} of {path}")]
    InvalidSquare {
        path: RulePath,
        field: &'static str,
        square: String,
    },

    /// A condition value is not a string.
    #[error("condition on {square} in {field} of {path} must be a string")]
    ConditionNotString {
        path: RulePath,
        field: &'static str,
        square: SquareId,
    },

    /// A condition string is neither a keyword nor an actor identifier.
    #[error("invalid condition on {square} in {field} of {path}: {source}")]
    InvalidCondition {
        path: RulePath,
        field: &'static str,
        square: SquareId,
        source: ParseActorError,
    },

    /// A perform value is neither `null` nor a string.
    #[error("perform entry for {square} in {path} must be null or an actor string")]
    PerformEntryNotActor { path: RulePath, square: SquareId },

    /// A perform value names a malformed actor.
    #[error("invalid actor in perform entry for {square} in {path}: {source}")]
    InvalidPerformActor {
        path: RulePath,
        square: SquareId,
        source: ParseActorError,
    },

    /// A gain or drop value is neither `null` nor a string.
    #[error("{field} of {path} must be an actor string")]
    HandFieldNotString {
        path: RulePath,
        field: &'static str,
    },

    /// A gain or drop value names a malformed actor.
    #[error("invalid actor in {field} of {path}: {source}")]
    InvalidHandActor {
        path: RulePath,
        field: &'static str,
        source: ParseActorError,
    },

    /// A gain or drop names a modified actor; hands hold base forms only.
    #[error("{field} of {path} must name a base-form piece, got {actor}")]
    HandPieceNotBase {
        path: RulePath,
        field: &'static str,
        actor: ActorId,
    },
}

/// A well-shaped rule that cannot, or need not, apply as written.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LogicalConsistencyError {
    /// The same square is both required and prevented in the same state,
    /// so the rule can never match.
    #[error("{path} both requires and prevents {state} on {square}")]
    Contradiction {
        path: RulePath,
        square: SquareId,
        state: OccupationState,
    },

    /// The rule requires its own mover to stand on the origin square. That
    /// presence is already checked before any rule runs.
    #[error("{path} requires its own mover on {square}; origin presence is implicit")]
    ImplicitRequirement { path: RulePath, square: SquareId },
}

/// A navigation step named something the ruleset does not declare.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No rules are registered for this actor.
    #[error("no rules registered for actor {0}")]
    UnknownActor(ActorId),

    /// The actor has rules, but none from this origin.
    #[error("no rules for {actor} at {origin}")]
    UnknownOrigin { actor: ActorId, origin: Origin },

    /// The actor moves from this origin, but never to this target.
    #[error("no rules for {actor} {origin} -> {target}")]
    UnknownTarget {
        actor: ActorId,
        origin: Origin,
        target: SquareId,
    },
}

/// A caller-supplied evaluation argument is malformed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidArgumentError {
    /// The active-player identifier is the empty string.
    #[error("active player identifier is empty")]
    EmptyPlayer,

    /// The active-player identifier contains non-letter characters.
    #[error("active player identifier {0:?} contains non-alphabetic characters")]
    NonAlphabeticPlayer(String),

    /// The active-player identifier mixes upper and lower case.
    #[error("active player identifier {0:?} mixes letter cases")]
    MixedCasePlayer(String),
}

/// Any reason a ruleset document can be rejected at construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The document shape is wrong.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// The document is well-shaped but logically inconsistent.
    #[error(transparent)]
    Logical(#[from] LogicalConsistencyError),
}

/// Any reason loading a ruleset from text or disk can fail.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read ruleset file: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid JSON.
    #[error("ruleset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is not a valid ruleset.
    #[error(transparent)]
    Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> RulePath {
        RulePath::new(
            "CHESS:P".parse().unwrap(),
            Origin::from("e2"),
            SquareId::from("e4"),
            2,
        )
    }

    #[test]
    fn test_rule_path_display() {
        assert_eq!(path().to_string(), "rule 2 of CHESS:P e2 -> e4");

        let drop_path = RulePath::new(
            "SHOGI:P".parse().unwrap(),
            Origin::Hand,
            SquareId::from("5e"),
            0,
        );
        assert_eq!(drop_path.to_string(), "rule 0 of SHOGI:P * -> 5e");
    }

    #[test]
    fn test_structural_error_names_location() {
        let err = StructuralError::UnknownKey {
            path: path(),
            key: "applies".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rule 2 of CHESS:P e2 -> e4 has unknown key \"applies\""
        );
    }

    #[test]
    fn test_contradiction_names_state() {
        let err = LogicalConsistencyError::Contradiction {
            path: path(),
            square: SquareId::from("e3"),
            state: OccupationState::Empty,
        };
        assert_eq!(
            err.to_string(),
            "rule 2 of CHESS:P e2 -> e4 both requires and prevents empty on e3"
        );
    }

    #[test]
    fn test_build_error_is_transparent() {
        let err: BuildError = StructuralError::RootNotObject.into();
        assert_eq!(err.to_string(), "ruleset document must be a JSON object");
    }

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::UnknownOrigin {
            actor: "CHESS:P".parse().unwrap(),
            origin: Origin::from("e5"),
        };
        assert_eq!(err.to_string(), "no rules for CHESS:P at e5");
    }
}
