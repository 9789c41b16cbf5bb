//! Ruleset construction and navigation.
//!
//! A [`Ruleset`] is the compiled form of a rules document: a three-level
//! registry mapping actor, then origin, then target square to an ordered
//! rule list. Construction walks the raw JSON once ([`parse`]), optionally
//! checks each rule for logical consistency ([`validate`]), and indexes
//! every level for O(1) lookup while keeping declared order for iteration.
//!
//! Navigation hands out borrowed views ([`Source`], [`Destination`],
//! [`Engine`]) rather than owned slices, so a loaded ruleset is never
//! copied during evaluation.
//!
//! [`Engine`]: crate::engine::Engine

mod parse;
mod validate;
mod view;

pub use view::{Destination, Source};

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::core::{ActorId, Origin, SquareId};
use crate::error::{BuildError, LookupError, StructuralError};
use crate::rules::TransitionRule;

/// Ordered rules for one (actor, origin, target) cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TargetTable {
    pub(crate) target: SquareId,
    pub(crate) rules: Vec<TransitionRule>,
}

/// Targets reachable from one origin, in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OriginTable {
    pub(crate) origin: Origin,
    pub(crate) targets: Vec<TargetTable>,
    pub(crate) index: FxHashMap<SquareId, usize>,
}

/// Everything one actor can do, in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ActorTable {
    pub(crate) actor: ActorId,
    pub(crate) origins: Vec<OriginTable>,
    pub(crate) index: FxHashMap<Origin, usize>,
}

/// A compiled rules document.
///
/// ```
/// use moveset::Ruleset;
/// use serde_json::json;
///
/// let ruleset = Ruleset::new(&json!({
///     "CHESS:P": {
///         "e2": {
///             "e3": [
///                 {"require": {"e3": "empty"},
///                  "perform": {"e2": null, "e3": "CHESS:P"}}
///             ]
///         }
///     }
/// }))?;
///
/// let pawn = ruleset.select(&"CHESS:P".parse()?)?;
/// assert_eq!(pawn.origins().count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ruleset {
    actors: Vec<ActorTable>,
    index: FxHashMap<ActorId, usize>,
}

impl Ruleset {
    /// Compile a rules document, checking shape and logical consistency.
    pub fn new(document: &Value) -> Result<Self, BuildError> {
        let ruleset = parse::parse_document(document)?;
        validate::check(&ruleset)?;
        tracing::debug!(
            "compiled ruleset: {} actors, {} rules",
            ruleset.len(),
            ruleset.rule_count()
        );
        Ok(ruleset)
    }

    /// Compile a rules document, checking shape only.
    ///
    /// Skips the logical consistency pass for documents that have already
    /// been validated elsewhere. Contradictory rules then simply never
    /// match at evaluation time.
    pub fn new_trusted(document: &Value) -> Result<Self, StructuralError> {
        let ruleset = parse::parse_document(document)?;
        tracing::debug!(
            "compiled ruleset (trusted): {} actors, {} rules",
            ruleset.len(),
            ruleset.rule_count()
        );
        Ok(ruleset)
    }

    pub(crate) fn from_tables(actors: Vec<ActorTable>) -> Self {
        let index = actors
            .iter()
            .enumerate()
            .map(|(position, table)| (table.actor.clone(), position))
            .collect();
        Self { actors, index }
    }

    /// Navigate to one actor's rules.
    pub fn select(&self, actor: &ActorId) -> Result<Source<'_>, LookupError> {
        let position = *self
            .index
            .get(actor)
            .ok_or_else(|| LookupError::UnknownActor(actor.clone()))?;
        Ok(Source::new(&self.actors[position]))
    }

    /// Whether the ruleset declares this actor.
    #[must_use]
    pub fn contains(&self, actor: &ActorId) -> bool {
        self.index.contains_key(actor)
    }

    /// Declared actors, in document order.
    pub fn actors(&self) -> impl Iterator<Item = &ActorId> {
        self.actors.iter().map(|table| &table.actor)
    }

    /// Views over every declared actor, in document order.
    pub fn sources(&self) -> impl Iterator<Item = Source<'_>> {
        self.actors.iter().map(Source::new)
    }

    /// Number of declared actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the ruleset declares no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Total number of rules across every cell.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.actors
            .iter()
            .flat_map(|actor| &actor.origins)
            .flat_map(|origin| &origin.targets)
            .map(|target| target.rules.len())
            .sum()
    }
}
