//! Whole-ruleset enumeration.
//!
//! [`Ruleset::pseudo_legal_transitions`] walks every declared actor,
//! origin, and target, pruning as early as possible: whole actors fall
//! away on side mismatch before any square is read, whole origins fall
//! away when the mover is not available there. Every surviving cell is
//! evaluated and non-empty results are emitted as [`Move`]s in strict
//! declared order, so two walks over the same inputs are identical,
//! element for element.

use serde::{Deserialize, Serialize};

use super::{origin_available, Transitions};
use crate::core::{ActorId, Board, Hand, Origin, Side, SquareId};
use crate::error::InvalidArgumentError;
use crate::ruleset::Ruleset;

/// One enumerated move: a cell of the ruleset plus everything it can do
/// in the evaluated position.
///
/// `transitions` holds at least one element; cells with no matching rule
/// are never emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The moving actor.
    pub actor: ActorId,
    /// Where the move starts.
    pub origin: Origin,
    /// Where the move ends.
    pub target: SquareId,
    /// Every matching outcome, in declared rule order.
    pub transitions: Transitions,
}

impl Ruleset {
    /// Enumerate every currently permitted move for one player.
    ///
    /// Pure with respect to its inputs: the ruleset is read-only and the
    /// snapshots stay untouched, so repeated calls with the same position
    /// return the same ordered list.
    ///
    /// ```
    /// use moveset::{Board, Hand, Ruleset};
    /// use serde_json::json;
    ///
    /// let ruleset = Ruleset::new(&json!({
    ///     "CHESS:P": {"e2": {
    ///         "e3": [{"require": {"e3": "empty"},
    ///                 "perform": {"e2": null, "e3": "CHESS:P"}}],
    ///         "e4": [{"require": {"e3": "empty", "e4": "empty"},
    ///                 "perform": {"e2": null, "e4": "CHESS:P"}}]
    ///     }}
    /// }))?;
    ///
    /// let board = Board::from_iter([("e2", "CHESS:P".parse()?)]);
    /// let moves = ruleset.pseudo_legal_transitions(&board, &Hand::new(), "CHESS")?;
    ///
    /// assert_eq!(moves.len(), 2);
    /// assert_eq!(moves[0].target.as_str(), "e3");
    /// assert_eq!(moves[1].target.as_str(), "e4");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn pseudo_legal_transitions(
        &self,
        board: &Board,
        hand: &Hand,
        active: &str,
    ) -> Result<Vec<Move>, InvalidArgumentError> {
        let side = Side::from_ident(active)?;
        let mut moves = Vec::new();
        for source in self.sources() {
            if source.side() != side {
                continue;
            }
            for destination in source.destinations() {
                if !origin_available(destination.actor(), destination.origin(), board, hand) {
                    continue;
                }
                for engine in destination.engines() {
                    let transitions = engine.evaluate_for(board, hand, side);
                    if !transitions.is_empty() {
                        moves.push(Move {
                            actor: engine.actor().clone(),
                            origin: engine.origin().clone(),
                            target: engine.target().clone(),
                            transitions,
                        });
                    }
                }
            }
        }
        Ok(moves)
    }
}
