//! Navigation views.
//!
//! [`Source`] and [`Destination`] are `Copy` borrows over the compiled
//! tables. They carry no logic of their own; each step either narrows to
//! the next level or fails with a [`LookupError`] naming what was asked
//! for. Callers can keep any intermediate view around to skip re-lookup.

use super::{ActorTable, OriginTable};
use crate::core::{ActorId, Origin, Side, SquareId};
use crate::engine::Engine;
use crate::error::LookupError;

/// One actor's rules: the first narrowing step.
#[derive(Clone, Copy, Debug)]
pub struct Source<'a> {
    table: &'a ActorTable,
}

impl<'a> Source<'a> {
    pub(crate) fn new(table: &'a ActorTable) -> Self {
        Self { table }
    }

    /// The actor this view covers.
    #[must_use]
    pub fn actor(&self) -> &'a ActorId {
        &self.table.actor
    }

    /// The side owning this actor.
    #[must_use]
    pub fn side(&self) -> Side {
        self.table.actor.side()
    }

    /// Narrow to one origin.
    pub fn from(self, origin: &Origin) -> Result<Destination<'a>, LookupError> {
        let position =
            *self
                .table
                .index
                .get(origin)
                .ok_or_else(|| LookupError::UnknownOrigin {
                    actor: self.table.actor.clone(),
                    origin: origin.clone(),
                })?;
        Ok(Destination {
            actor: &self.table.actor,
            table: &self.table.origins[position],
        })
    }

    /// Declared origins, in document order.
    pub fn origins(self) -> impl Iterator<Item = &'a Origin> {
        self.table.origins.iter().map(|table| &table.origin)
    }

    /// Views over every declared origin, in document order.
    pub fn destinations(self) -> impl Iterator<Item = Destination<'a>> {
        let actor = &self.table.actor;
        self.table
            .origins
            .iter()
            .map(move |table| Destination { actor, table })
    }
}

/// One (actor, origin) pair: the second narrowing step.
#[derive(Clone, Copy, Debug)]
pub struct Destination<'a> {
    actor: &'a ActorId,
    table: &'a OriginTable,
}

impl<'a> Destination<'a> {
    /// The actor this view covers.
    #[must_use]
    pub fn actor(&self) -> &'a ActorId {
        self.actor
    }

    /// The origin this view covers.
    #[must_use]
    pub fn origin(&self) -> &'a Origin {
        &self.table.origin
    }

    /// Narrow to one target square's rule list.
    pub fn to(self, target: &SquareId) -> Result<Engine<'a>, LookupError> {
        let position =
            *self
                .table
                .index
                .get(target)
                .ok_or_else(|| LookupError::UnknownTarget {
                    actor: self.actor.clone(),
                    origin: self.table.origin.clone(),
                    target: target.clone(),
                })?;
        Ok(Engine::new(
            self.actor,
            &self.table.origin,
            &self.table.targets[position],
        ))
    }

    /// Declared targets, in document order.
    pub fn targets(self) -> impl Iterator<Item = &'a SquareId> {
        self.table.targets.iter().map(|table| &table.target)
    }

    /// Engines over every declared target, in document order.
    pub fn engines(self) -> impl Iterator<Item = Engine<'a>> {
        let actor = self.actor;
        let origin = &self.table.origin;
        self.table
            .targets
            .iter()
            .map(move |table| Engine::new(actor, origin, table))
    }
}
