//! Actor identification.
//!
//! Every piece is named by a compound identifier `NAMESPACE:code`:
//! - `NAMESPACE` is one or more ASCII letters, all uppercase or all lowercase.
//! - `code` is an optional `+`/`-` prefix, one letter in the namespace's case,
//!   and an optional `'` suffix.
//!
//! The shared case convention between the namespace and the piece letter
//! encodes which of the two sides owns the piece: uppercase identifiers
//! belong to the first side, lowercase to the second. `CHESS:K` and
//! `chess:k` are therefore the same kind of piece held by opposing sides,
//! while `SHOGI:+P'` is a first-side pawn carrying both modifiers.
//!
//! ## Base form
//!
//! An identifier without modifiers (`SHOGI:P`) is in *base form*. Hands hold
//! base-form pieces only; [`ActorId::to_base`] projects any identifier onto
//! its base form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::InvalidArgumentError;

/// Error raised when a string is not a well-formed actor identifier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseActorError {
    /// No `:` separator between namespace and code.
    #[error("missing ':' separator")]
    MissingSeparator,
    /// Namespace is empty, non-alphabetic, or mixes letter cases.
    #[error("namespace must be one or more ASCII letters of a single case")]
    InvalidNamespace,
    /// Code is not `[+-]?letter['?]`.
    #[error("piece code must be an optional '+' or '-', one letter, and an optional '''")]
    MalformedCode,
    /// The piece letter's case differs from the namespace's case.
    #[error("piece letter case must match the namespace case")]
    CaseMismatch,
}

/// Which of the two sides owns a piece, encoded by letter case.
///
/// Uppercase identifiers belong to `First`, lowercase to `Second`. The
/// engine never interprets sides beyond this distinction; "first" merely
/// follows the convention that the uppercase camp moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The side writing its identifiers in uppercase.
    First,
    /// The side writing its identifiers in lowercase.
    Second,
}

impl Side {
    /// Parse an active-player identifier into its side.
    ///
    /// The identifier must be non-empty, ASCII alphabetic, and uniformly
    /// cased; anything else is an [`InvalidArgumentError`]. This is the
    /// well-formedness gate the evaluation entry points run before touching
    /// any rule.
    ///
    /// ```
    /// use moveset::Side;
    ///
    /// assert_eq!(Side::from_ident("CHESS"), Ok(Side::First));
    /// assert_eq!(Side::from_ident("shogi"), Ok(Side::Second));
    /// assert!(Side::from_ident("Chess").is_err());
    /// assert!(Side::from_ident("").is_err());
    /// ```
    pub fn from_ident(ident: &str) -> Result<Self, InvalidArgumentError> {
        if ident.is_empty() {
            return Err(InvalidArgumentError::EmptyPlayer);
        }
        if !ident.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidArgumentError::NonAlphabeticPlayer(ident.to_string()));
        }
        if ident.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Side::First)
        } else if ident.chars().all(|c| c.is_ascii_lowercase()) {
            Ok(Side::Second)
        } else {
            Err(InvalidArgumentError::MixedCasePlayer(ident.to_string()))
        }
    }

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Parsed, validated actor identifier.
///
/// An `ActorId` can only be obtained by parsing ([`FromStr`]) or through
/// [`ActorId::base`], so every instance is case-consistent by construction.
/// Equality is exact: modifiers are part of the identity, `SHOGI:P` and
/// `SHOGI:+P` are different actors.
///
/// ```
/// use moveset::{ActorId, Side};
///
/// let pawn: ActorId = "SHOGI:+P'".parse().unwrap();
/// assert_eq!(pawn.namespace(), "SHOGI");
/// assert_eq!(pawn.letter(), 'P');
/// assert_eq!(pawn.side(), Side::First);
/// assert!(!pawn.is_base());
/// assert_eq!(pawn.to_base().to_string(), "SHOGI:P");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActorId {
    namespace: String,
    prefix: Option<char>,
    letter: char,
    suffix: bool,
}

impl ActorId {
    /// Create a base-form identifier from a namespace and piece letter.
    ///
    /// Fails like parsing would: the namespace must be uniformly cased ASCII
    /// letters and the piece letter must match that case.
    pub fn base(namespace: impl Into<String>, letter: char) -> Result<Self, ParseActorError> {
        let namespace = namespace.into();
        check_namespace(&namespace)?;
        if !letter.is_ascii_alphabetic() {
            return Err(ParseActorError::MalformedCode);
        }
        if letter.is_ascii_uppercase() != is_uppercase_namespace(&namespace) {
            return Err(ParseActorError::CaseMismatch);
        }
        Ok(Self {
            namespace,
            prefix: None,
            letter,
            suffix: false,
        })
    }

    /// The namespace part, original case preserved.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The piece letter, original case preserved.
    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }

    /// The `+`/`-` modifier prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<char> {
        self.prefix
    }

    /// The `'` modifier suffix, if any.
    #[must_use]
    pub fn suffix(&self) -> Option<char> {
        self.suffix.then_some('\'')
    }

    /// Which side owns this piece.
    #[must_use]
    pub fn side(&self) -> Side {
        if is_uppercase_namespace(&self.namespace) {
            Side::First
        } else {
            Side::Second
        }
    }

    /// Whether this identifier carries no modifiers.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.prefix.is_none() && !self.suffix
    }

    /// The base-form projection: same namespace and letter, no modifiers.
    #[must_use]
    pub fn to_base(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            prefix: None,
            letter: self.letter,
            suffix: false,
        }
    }
}

fn is_uppercase_namespace(namespace: &str) -> bool {
    // Namespaces are validated to be uniformly cased, so one char decides.
    namespace
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
}

fn check_namespace(namespace: &str) -> Result<(), ParseActorError> {
    if namespace.is_empty() || !namespace.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ParseActorError::InvalidNamespace);
    }
    let uppercase = namespace.chars().all(|c| c.is_ascii_uppercase());
    let lowercase = namespace.chars().all(|c| c.is_ascii_lowercase());
    if !uppercase && !lowercase {
        return Err(ParseActorError::InvalidNamespace);
    }
    Ok(())
}

impl FromStr for ActorId {
    type Err = ParseActorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, code) = s.split_once(':').ok_or(ParseActorError::MissingSeparator)?;
        check_namespace(namespace)?;

        let mut chars = code.chars();
        let mut next = chars.next().ok_or(ParseActorError::MalformedCode)?;
        let prefix = if next == '+' || next == '-' {
            let p = next;
            next = chars.next().ok_or(ParseActorError::MalformedCode)?;
            Some(p)
        } else {
            None
        };
        if !next.is_ascii_alphabetic() {
            return Err(ParseActorError::MalformedCode);
        }
        let letter = next;
        let suffix = match chars.next() {
            None => false,
            Some('\'') if chars.next().is_none() => true,
            Some(_) => return Err(ParseActorError::MalformedCode),
        };
        if letter.is_ascii_uppercase() != is_uppercase_namespace(namespace) {
            return Err(ParseActorError::CaseMismatch);
        }

        Ok(Self {
            namespace: namespace.to_string(),
            prefix,
            letter,
            suffix,
        })
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.namespace)?;
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix}")?;
        }
        write!(f, "{}", self.letter)?;
        if self.suffix {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl Serialize for ActorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
