//! Move evaluation.
//!
//! An [`Engine`] is the last navigation step: one actor, one origin, one
//! target square, and that cell's ordered rule list. [`Engine::evaluate`]
//! runs two phases:
//!
//! 1. **Context phase**: checked once, before any rule. The actor must
//!    belong to the active side, and it must actually be available at the
//!    origin: standing on the origin square for board moves, or present in
//!    the hand (base form, count above zero) for drops. Failing context
//!    yields an empty result without reading a single rule, which is what
//!    makes whole-ruleset scans cheap.
//! 2. **Rule phase**: every rule in declared order, collecting a
//!    [`Transition`] for each one that matches. All matches are collected;
//!    a destination can legitimately hold several simultaneously valid
//!    outcomes, promotion choices being the canonical case.
//!
//! Evaluation is pure. The engine borrows the ruleset and reads the
//! caller's snapshots; nothing is retained or mutated.

pub mod generate;

pub use generate::Move;

use smallvec::SmallVec;

use crate::core::{ActorId, Board, Hand, Origin, Side, SquareId};
use crate::error::InvalidArgumentError;
use crate::rules::{Transition, TransitionRule};
use crate::ruleset::TargetTable;

/// Transitions produced by one evaluation.
///
/// Most evaluations yield zero or one transition; the inline capacity
/// covers those without allocating, and fan-outs spill to the heap.
pub type Transitions = SmallVec<[Transition; 1]>;

/// Evaluator for one (actor, origin, target) rule list.
///
/// Obtained through [`Destination::to`] or [`Destination::engines`];
/// copyable and freely cacheable while the ruleset lives.
///
/// ```
/// use moveset::{Board, Hand, Ruleset};
/// use serde_json::json;
///
/// let ruleset = Ruleset::new(&json!({
///     "CHESS:P": {"e2": {"e4": [
///         {"require": {"e3": "empty", "e4": "empty"},
///          "perform": {"e2": null, "e4": "CHESS:P"}}
///     ]}}
/// }))?;
///
/// let engine = ruleset
///     .select(&"CHESS:P".parse()?)?
///     .from(&"e2".into())?
///     .to(&"e4".into())?;
///
/// let board = Board::from_iter([("e2", "CHESS:P".parse()?)]);
/// let transitions = engine.evaluate(&board, &Hand::new(), "CHESS")?;
/// assert_eq!(transitions.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// [`Destination::to`]: crate::ruleset::Destination::to
/// [`Destination::engines`]: crate::ruleset::Destination::engines
#[derive(Clone, Copy, Debug)]
pub struct Engine<'a> {
    actor: &'a ActorId,
    origin: &'a Origin,
    table: &'a TargetTable,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(actor: &'a ActorId, origin: &'a Origin, table: &'a TargetTable) -> Self {
        Self {
            actor,
            origin,
            table,
        }
    }

    /// The moving actor.
    #[must_use]
    pub fn actor(&self) -> &'a ActorId {
        self.actor
    }

    /// Where the move starts.
    #[must_use]
    pub fn origin(&self) -> &'a Origin {
        self.origin
    }

    /// Where the move ends.
    #[must_use]
    pub fn target(&self) -> &'a SquareId {
        &self.table.target
    }

    /// The cell's rules, in declared order.
    #[must_use]
    pub fn rules(&self) -> &'a [TransitionRule] {
        &self.table.rules
    }

    /// Evaluate this move against a position.
    ///
    /// `active` is the caller's player identifier; it only has to be
    /// non-empty, alphabetic, and uniformly cased, and its case selects
    /// the active side. A malformed identifier fails before anything is
    /// read. An actor of the wrong side, a missing mover, or no matching
    /// rule all yield an empty result, not an error.
    pub fn evaluate(
        &self,
        board: &Board,
        hand: &Hand,
        active: &str,
    ) -> Result<Transitions, InvalidArgumentError> {
        let side = Side::from_ident(active)?;
        Ok(self.evaluate_for(board, hand, side))
    }

    /// Evaluation body shared with the generator, after argument checks.
    pub(crate) fn evaluate_for(&self, board: &Board, hand: &Hand, active: Side) -> Transitions {
        let mut transitions = Transitions::new();
        if self.actor.side() != active || !origin_available(self.actor, self.origin, board, hand) {
            return transitions;
        }
        for rule in &self.table.rules {
            if rule.matches(board, active) {
                transitions.push(rule.transition());
            }
        }
        transitions
    }
}

/// Whether the mover is actually where the origin says it is.
///
/// Drops read the hand (base-form count), board moves demand the exact
/// actor on the origin square. The two sourcings never mix.
pub(crate) fn origin_available(
    actor: &ActorId,
    origin: &Origin,
    board: &Board,
    hand: &Hand,
) -> bool {
    match origin {
        Origin::Hand => hand.count(actor) > 0,
        Origin::Square(square) => board.occupant(square) == Some(actor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::Ruleset;
    use serde_json::json;

    fn actor(s: &str) -> ActorId {
        s.parse().unwrap()
    }

    fn pawn_push_ruleset() -> Ruleset {
        Ruleset::new(&json!({
            "CHESS:P": {"e2": {"e4": [
                {"require": {"e3": "empty", "e4": "empty"},
                 "perform": {"e2": null, "e4": "CHESS:P"}}
            ]}}
        }))
        .unwrap()
    }

    fn pawn_engine(ruleset: &Ruleset) -> Engine<'_> {
        ruleset
            .select(&actor("CHESS:P"))
            .unwrap()
            .from(&Origin::from("e2"))
            .unwrap()
            .to(&SquareId::from("e4"))
            .unwrap()
    }

    #[test]
    fn test_invalid_player_fails_before_evaluation() {
        let ruleset = pawn_push_ruleset();
        let engine = pawn_engine(&ruleset);
        let board = Board::from_iter([("e2", actor("CHESS:P"))]);

        assert_eq!(
            engine.evaluate(&board, &Hand::new(), "").unwrap_err(),
            InvalidArgumentError::EmptyPlayer
        );
        assert_eq!(
            engine.evaluate(&board, &Hand::new(), "Chess").unwrap_err(),
            InvalidArgumentError::MixedCasePlayer("Chess".to_string())
        );
        assert_eq!(
            engine.evaluate(&board, &Hand::new(), "CHESS2").unwrap_err(),
            InvalidArgumentError::NonAlphabeticPlayer("CHESS2".to_string())
        );
    }

    #[test]
    fn test_context_requires_mover_on_origin() {
        let ruleset = pawn_push_ruleset();
        let engine = pawn_engine(&ruleset);

        // Empty origin square.
        assert!(engine
            .evaluate(&Board::new(), &Hand::new(), "CHESS")
            .unwrap()
            .is_empty());

        // Wrong piece on the origin square.
        let wrong = Board::from_iter([("e2", actor("CHESS:N"))]);
        assert!(engine
            .evaluate(&wrong, &Hand::new(), "CHESS")
            .unwrap()
            .is_empty());

        // A modified form is not the declared actor.
        let modified = Board::from_iter([("e2", actor("CHESS:P'"))]);
        assert!(engine
            .evaluate(&modified, &Hand::new(), "CHESS")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_context_enforces_ownership() {
        let ruleset = pawn_push_ruleset();
        let engine = pawn_engine(&ruleset);
        let board = Board::from_iter([("e2", actor("CHESS:P"))]);

        // Opponent to move: an uppercase actor can never act.
        assert!(engine
            .evaluate(&board, &Hand::new(), "chess")
            .unwrap()
            .is_empty());
        assert_eq!(engine.evaluate(&board, &Hand::new(), "CHESS").unwrap().len(), 1);
    }

    #[test]
    fn test_double_push_scenario() {
        let ruleset = pawn_push_ruleset();
        let engine = pawn_engine(&ruleset);
        let board = Board::from_iter([("e2", actor("CHESS:P"))]);

        let transitions = engine.evaluate(&board, &Hand::new(), "CHESS").unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(
            transitions[0].diff,
            crate::rules::Diff::from([
                (SquareId::from("e2"), None),
                (SquareId::from("e4"), Some(actor("CHESS:P"))),
            ])
        );

        // Blocked on the pass-through square: no match, no error.
        let blocked = Board::from_iter([
            ("e2", actor("CHESS:P")),
            ("e3", actor("CHESS:N")),
        ]);
        assert!(engine
            .evaluate(&blocked, &Hand::new(), "CHESS")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_promotion_fan_out_collects_every_match() {
        let ruleset = Ruleset::new(&json!({
            "CHESS:P": {"e7": {"e8": [
                {"require": {"e8": "empty"}, "perform": {"e7": null, "e8": "CHESS:Q"}},
                {"require": {"e8": "empty"}, "perform": {"e7": null, "e8": "CHESS:R"}},
                {"require": {"e8": "empty"}, "perform": {"e7": null, "e8": "CHESS:B"}},
                {"require": {"e8": "empty"}, "perform": {"e7": null, "e8": "CHESS:N"}}
            ]}}
        }))
        .unwrap();
        let engine = ruleset
            .select(&actor("CHESS:P"))
            .unwrap()
            .from(&Origin::from("e7"))
            .unwrap()
            .to(&SquareId::from("e8"))
            .unwrap();

        let board = Board::from_iter([("e7", actor("CHESS:P"))]);
        let transitions = engine.evaluate(&board, &Hand::new(), "CHESS").unwrap();

        let promoted: Vec<String> = transitions
            .iter()
            .map(|transition| {
                transition.diff[&SquareId::from("e8")]
                    .as_ref()
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(promoted, ["CHESS:Q", "CHESS:R", "CHESS:B", "CHESS:N"]);
    }

    #[test]
    fn test_vacuous_rule_matches_once_context_passes() {
        let ruleset = Ruleset::new(&json!({
            "X:K": {"a1": {"a2": [{"perform": {"a1": null, "a2": "X:K"}}]}}
        }))
        .unwrap();
        let engine = ruleset
            .select(&actor("X:K"))
            .unwrap()
            .from(&Origin::from("a1"))
            .unwrap()
            .to(&SquareId::from("a2"))
            .unwrap();

        let board = Board::from_iter([("a1", actor("X:K"))]);
        assert_eq!(engine.evaluate(&board, &Hand::new(), "X").unwrap().len(), 1);
    }

    #[test]
    fn test_drop_gated_by_hand_count() {
        let ruleset = Ruleset::new(&json!({
            "SHOGI:P": {"*": {"5e": [
                {"require": {"5e": "empty"},
                 "perform": {"5e": "SHOGI:P"},
                 "drop": "SHOGI:P"}
            ]}}
        }))
        .unwrap();
        let engine = ruleset
            .select(&actor("SHOGI:P"))
            .unwrap()
            .from(&Origin::Hand)
            .unwrap()
            .to(&SquareId::from("5e"))
            .unwrap();

        // Piece in hand: the drop applies and carries its hand debit.
        let hand = Hand::from_iter([(actor("SHOGI:P"), 1)]);
        let transitions = engine.evaluate(&Board::new(), &hand, "SHOGI").unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].drop, Some(actor("SHOGI:P")));

        // Empty hand: context fails, rules never run.
        assert!(engine
            .evaluate(&Board::new(), &Hand::new(), "SHOGI")
            .unwrap()
            .is_empty());

        // A piece on the board is not a piece in hand.
        let on_board = Board::from_iter([("5f", actor("SHOGI:P"))]);
        assert!(engine
            .evaluate(&on_board, &Hand::new(), "SHOGI")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_board_origin_ignores_hand() {
        let ruleset = pawn_push_ruleset();
        let engine = pawn_engine(&ruleset);

        // The pawn is only in hand, not on e2; a board-origin move cannot
        // source it from there.
        let hand = Hand::from_iter([(actor("CHESS:P"), 1)]);
        assert!(engine
            .evaluate(&Board::new(), &hand, "CHESS")
            .unwrap()
            .is_empty());
    }
}
