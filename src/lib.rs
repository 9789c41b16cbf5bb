//! # moveset
//!
//! A rule-agnostic evaluation engine for pseudo-legal moves in abstract
//! strategy board games. Rulesets are interchange documents mapping
//! `actor -> origin -> target` to ordered lists of guarded transitions;
//! the engine decides which candidate moves a concrete position permits
//! and can enumerate every permitted move at once.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No board geometry, no piece semantics. Squares
//!    are opaque labels, pieces are namespaced identifiers, and every
//!    movement fact lives in the ruleset document.
//!
//! 2. **Pseudo-Legal Only**: The engine answers "does this template apply
//!    here", never "is this move legal in the full game". Check,
//!    repetition, and similar global rules belong to callers.
//!
//! 3. **Immutable Ruleset, Caller-Owned State**: A ruleset is built once,
//!    validated once, and then serves unbounded concurrent read-only
//!    queries. Board and hand snapshots are supplied per call and never
//!    retained.
//!
//! ## Example
//!
//! ```
//! use moveset::{Board, Hand, Ruleset};
//! use serde_json::json;
//!
//! let ruleset = Ruleset::new(&json!({
//!     "CHESS:P": {
//!         "e2": {
//!             "e4": [
//!                 {"require": {"e3": "empty", "e4": "empty"},
//!                  "perform": {"e2": null, "e4": "CHESS:P"}}
//!             ]
//!         }
//!     }
//! }))?;
//!
//! let board = Board::from_iter([("e2", "CHESS:P".parse()?)]);
//! let moves = ruleset.pseudo_legal_transitions(&board, &Hand::new(), "CHESS")?;
//!
//! assert_eq!(moves.len(), 1);
//! assert_eq!(moves[0].target.as_str(), "e4");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - `core`: Actor identifiers, square labels, board and hand snapshots
//! - `rules`: Occupation conditions, transition rules, resolved transitions
//! - `ruleset`: Document compilation, validation, navigation views
//! - `engine`: Per-move evaluation and whole-ruleset enumeration
//! - `error`: The structural / logical / lookup / argument error taxonomy
//! - `load`: File and string loading boundary

pub mod core;
pub mod engine;
pub mod error;
pub mod load;
pub mod rules;
pub mod ruleset;

// Re-export the whole working surface
pub use crate::core::{
    ActorId, Board, Hand, Origin, ParseActorError, Side, SquareId, HAND_SENTINEL,
};

pub use crate::rules::{Conditions, Diff, OccupationState, Transition, TransitionRule};

pub use crate::ruleset::{Destination, Ruleset, Source};

pub use crate::engine::{Engine, Move, Transitions};

pub use crate::error::{
    BuildError, InvalidArgumentError, LoadError, LogicalConsistencyError, LookupError, RulePath,
    StructuralError,
};
