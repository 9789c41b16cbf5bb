//! Document loading.
//!
//! Thin adapters between raw ruleset text and [`Ruleset::new`]. Loading
//! always runs full validation; callers that want the trusted fast path
//! parse their JSON themselves and use [`Ruleset::new_trusted`].
//!
//! [`Ruleset::new_trusted`]: crate::ruleset::Ruleset::new_trusted

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{BuildError, LoadError};
use crate::ruleset::Ruleset;

/// Build a validated ruleset from an already-parsed document.
pub fn from_value(document: &Value) -> Result<Ruleset, BuildError> {
    Ruleset::new(document)
}

/// Parse and build a validated ruleset from JSON text.
pub fn from_str(text: &str) -> Result<Ruleset, LoadError> {
    let document: Value = serde_json::from_str(text)?;
    Ok(Ruleset::new(&document)?)
}

/// Read, parse, and build a validated ruleset from a file.
pub fn from_path(path: impl AsRef<Path>) -> Result<Ruleset, LoadError> {
    let path = path.as_ref();
    tracing::debug!("loading ruleset from {}", path.display());
    let text = fs::read_to_string(path)?;
    from_str(&text)
}
