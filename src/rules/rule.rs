//! Transition rules: guarded state changes.
//!
//! A rule pairs a context test with an outcome. The test side reads the
//! board through square conditions; the outcome side is a ready-made
//! [`Transition`]. Rules never mutate anything themselves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::occupation::OccupationState;
use super::transition::{Diff, Transition};
use crate::core::{ActorId, Board, Side, SquareId};

/// Square conditions keyed by the square they inspect.
pub type Conditions = BTreeMap<SquareId, OccupationState>;

/// One guarded state change.
///
/// A rule applies to a position when every [`require`] condition holds and
/// no [`prevent`] condition holds. Both tables may be empty; a rule with
/// neither matches unconditionally.
///
/// The outcome is `perform` (the board diff) plus the optional hand
/// movements `gain` and `drop`. Hand movements always name base-form
/// actors.
///
/// ```
/// use moveset::{Diff, OccupationState, SquareId, TransitionRule};
///
/// let advance = TransitionRule::new(Diff::from([
///     (SquareId::from("e2"), None),
///     (SquareId::from("e3"), Some("CHESS:P".parse()?)),
/// ]))
/// .with_require("e3", OccupationState::Empty);
///
/// assert_eq!(advance.require.len(), 1);
/// # Ok::<(), moveset::ParseActorError>(())
/// ```
///
/// [`require`]: TransitionRule::require
/// [`prevent`]: TransitionRule::prevent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionRule {
    /// Conditions that must all hold.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub require: Conditions,
    /// Conditions that must all fail.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prevent: Conditions,
    /// Board diff produced when the rule applies.
    pub perform: Diff,
    /// Base-form piece the mover's hand gains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<ActorId>,
    /// Base-form piece the mover's hand loses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop: Option<ActorId>,
}

impl TransitionRule {
    /// A rule that performs `perform` unconditionally.
    #[must_use]
    pub fn new(perform: Diff) -> Self {
        Self {
            require: Conditions::new(),
            prevent: Conditions::new(),
            perform,
            gain: None,
            drop: None,
        }
    }

    /// Add a condition that must hold.
    #[must_use]
    pub fn with_require(mut self, square: impl Into<SquareId>, state: OccupationState) -> Self {
        self.require.insert(square.into(), state);
        self
    }

    /// Add a condition that must fail.
    #[must_use]
    pub fn with_prevent(mut self, square: impl Into<SquareId>, state: OccupationState) -> Self {
        self.prevent.insert(square.into(), state);
        self
    }

    /// Set the hand gain.
    #[must_use]
    pub fn with_gain(mut self, actor: ActorId) -> Self {
        self.gain = Some(actor);
        self
    }

    /// Set the hand drop.
    #[must_use]
    pub fn with_drop(mut self, actor: ActorId) -> Self {
        self.drop = Some(actor);
        self
    }

    /// Whether this rule applies to a position.
    ///
    /// Every `require` entry must hold and every `prevent` entry must
    /// fail; a single holding `prevent` vetoes the rule.
    #[must_use]
    pub fn matches(&self, board: &Board, active: Side) -> bool {
        self.require
            .iter()
            .all(|(square, state)| state.holds(board.occupant(square), active))
            && !self
                .prevent
                .iter()
                .any(|(square, state)| state.holds(board.occupant(square), active))
    }

    /// The transition this rule produces when it applies.
    #[must_use]
    pub fn transition(&self) -> Transition {
        Transition::new(self.perform.clone(), self.gain.clone(), self.drop.clone())
    }
}
