//! Core vocabulary: actor identifiers, squares, and state snapshots.
//!
//! These types are game-agnostic. Rulesets decide what the identifiers and
//! squares mean; the core only fixes their shape and the case convention
//! that encodes ownership.

pub mod actor;
pub mod square;
pub mod state;

pub use actor::{ActorId, ParseActorError, Side};
pub use square::{Origin, SquareId, HAND_SENTINEL};
pub use state::{Board, Hand};
