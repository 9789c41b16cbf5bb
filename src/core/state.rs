//! Caller-owned state snapshots: board occupancy and hand reserves.
//!
//! ## Board
//!
//! A `Board` maps occupied squares to the actor standing on them. Vacancy is
//! absence: a square is empty exactly when it has no entry, so the JSON form
//! `{"e3": null}` and a missing `"e3"` key mean the same position.
//!
//! ## Hand
//!
//! A `Hand` counts the base-form pieces a player holds off-board for later
//! drops. Counts are strictly positive; reaching zero removes the entry.
//!
//! Both types are backed by `im` persistent maps, so cloning a snapshot is
//! O(1) and [`Board::apply`] / [`Hand::apply`] produce updated snapshots
//! without touching the original. Search callers can branch thousands of
//! positions off one snapshot cheaply.
//!
//! The evaluation engine never mutates or retains a snapshot; ownership
//! stays with the caller.

use std::collections::{BTreeMap, HashMap};

use im::HashMap as ImHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::actor::ActorId;
use super::square::SquareId;
use crate::rules::Transition;

/// Board snapshot: occupied squares only.
///
/// ```
/// use moveset::{ActorId, Board, SquareId};
///
/// let pawn: ActorId = "CHESS:P".parse().unwrap();
/// let mut board = Board::new();
/// board.place("e2", pawn.clone());
///
/// assert_eq!(board.occupant(&SquareId::from("e2")), Some(&pawn));
/// assert!(board.is_vacant(&SquareId::from("e3")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    squares: ImHashMap<SquareId, ActorId>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The actor on a square, if any.
    #[must_use]
    pub fn occupant(&self, square: &SquareId) -> Option<&ActorId> {
        self.squares.get(square)
    }

    /// Whether a square has no occupant.
    #[must_use]
    pub fn is_vacant(&self, square: &SquareId) -> bool {
        !self.squares.contains_key(square)
    }

    /// Put an actor on a square, replacing any previous occupant.
    pub fn place(&mut self, square: impl Into<SquareId>, actor: ActorId) {
        self.squares.insert(square.into(), actor);
    }

    /// Vacate a square. Returns the removed occupant, if any.
    pub fn clear(&mut self, square: &SquareId) -> Option<ActorId> {
        self.squares.remove(square)
    }

    /// Number of occupied squares.
    #[must_use]
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Whether no square is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Iterate over occupied squares in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&SquareId, &ActorId)> {
        self.squares.iter()
    }

    /// A new board with a transition's diff merged in.
    ///
    /// Entries mapping to an actor become occupied, entries mapping to
    /// vacant are cleared. The receiver is left untouched; the persistent
    /// backing makes this O(diff), not O(board).
    #[must_use]
    pub fn apply(&self, transition: &Transition) -> Self {
        let mut squares = self.squares.clone();
        for (square, occupant) in &transition.diff {
            match occupant {
                Some(actor) => {
                    squares.insert(square.clone(), actor.clone());
                }
                None => {
                    squares.remove(square);
                }
            }
        }
        Self { squares }
    }
}

impl<S: Into<SquareId>> FromIterator<(S, ActorId)> for Board {
    fn from_iter<I: IntoIterator<Item = (S, ActorId)>>(iter: I) -> Self {
        Self {
            squares: iter
                .into_iter()
                .map(|(square, actor)| (square.into(), actor))
                .collect(),
        }
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.squares.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Accept the interchange shape where vacancy is an explicit null.
        let raw = BTreeMap::<SquareId, Option<ActorId>>::deserialize(deserializer)?;
        Ok(Self {
            squares: raw
                .into_iter()
                .filter_map(|(square, occupant)| occupant.map(|actor| (square, actor)))
                .collect(),
        })
    }
}

/// Hand snapshot: base-form piece counts for one player's reserve.
///
/// Keys are normalized to base form on every insert and query, so a
/// captured `SHOGI:+P` is held (and counted) as `SHOGI:P`.
///
/// ```
/// use moveset::{ActorId, Hand};
///
/// let promoted: ActorId = "SHOGI:+P".parse().unwrap();
/// let mut hand = Hand::new();
/// hand.add(&promoted);
///
/// assert_eq!(hand.count(&promoted), 1);
/// assert_eq!(hand.count(&"SHOGI:P".parse().unwrap()), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    counts: ImHashMap<ActorId, u32>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many of an actor's base form the hand holds.
    #[must_use]
    pub fn count(&self, actor: &ActorId) -> u32 {
        if actor.is_base() {
            self.counts.get(actor).copied().unwrap_or(0)
        } else {
            self.counts.get(&actor.to_base()).copied().unwrap_or(0)
        }
    }

    /// Add one piece, stored in base form.
    pub fn add(&mut self, actor: &ActorId) {
        let base = actor.to_base();
        *self.counts.entry(base).or_insert(0) += 1;
    }

    /// Remove one piece of an actor's base form.
    ///
    /// Returns false (and removes nothing) when the hand holds none.
    pub fn remove(&mut self, actor: &ActorId) -> bool {
        let base = actor.to_base();
        match self.counts.get(&base).copied() {
            None | Some(0) => false,
            Some(1) => {
                self.counts.remove(&base);
                true
            }
            Some(n) => {
                self.counts.insert(base, n - 1);
                true
            }
        }
    }

    /// Set the count for an actor's base form. Zero removes the entry.
    pub fn set_count(&mut self, actor: &ActorId, count: u32) {
        let base = actor.to_base();
        if count == 0 {
            self.counts.remove(&base);
        } else {
            self.counts.insert(base, count);
        }
    }

    /// Number of distinct piece kinds held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the hand holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (base-form actor, count) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ActorId, &u32)> {
        self.counts.iter()
    }

    /// A new hand with a transition's gain credited and drop debited.
    ///
    /// Dropping a piece the hand does not hold debits nothing; callers
    /// that evaluate before applying never reach that case.
    #[must_use]
    pub fn apply(&self, transition: &Transition) -> Self {
        let mut next = self.clone();
        if let Some(gained) = &transition.gain {
            next.add(gained);
        }
        if let Some(dropped) = &transition.drop {
            next.remove(dropped);
        }
        next
    }
}

impl FromIterator<(ActorId, u32)> for Hand {
    fn from_iter<I: IntoIterator<Item = (ActorId, u32)>>(iter: I) -> Self {
        let mut hand = Self::new();
        for (actor, count) in iter {
            let merged = hand.count(&actor) + count;
            hand.set_count(&actor, merged);
        }
        hand
    }
}

impl Serialize for Hand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Hand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<ActorId, u32>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
