//! Logical-consistency passes.
//!
//! Two passes run over every rule in declared order: contradiction
//! detection (a square required and prevented in the same state can never
//! match) and implicit-requirement detection (requiring the mover on its
//! own origin square restates what the context phase already checks).
//! Both are document-quality checks; a ruleset that skips them evaluates
//! the same, it just carries rules that are dead or redundant.

use super::{ActorTable, OriginTable, Ruleset, TargetTable};
use crate::core::{ActorId, Origin, SquareId};
use crate::error::{LogicalConsistencyError, RulePath};
use crate::rules::{OccupationState, TransitionRule};

pub(crate) fn check(ruleset: &Ruleset) -> Result<(), LogicalConsistencyError> {
    for (actor, origin, target, index, rule) in rules(ruleset) {
        if let Some((square, state)) = contradiction(rule) {
            return Err(LogicalConsistencyError::Contradiction {
                path: path_for(actor, origin, target, index),
                square: square.clone(),
                state: state.clone(),
            });
        }
    }
    for (actor, origin, target, index, rule) in rules(ruleset) {
        if let Some(square) = implicit_requirement(&actor.actor, &origin.origin, rule) {
            return Err(LogicalConsistencyError::ImplicitRequirement {
                path: path_for(actor, origin, target, index),
                square: square.clone(),
            });
        }
    }
    tracing::trace!("logical consistency passes clean");
    Ok(())
}

/// Every rule with its coordinates, in declared order.
fn rules(
    ruleset: &Ruleset,
) -> impl Iterator<Item = (&ActorTable, &OriginTable, &TargetTable, usize, &TransitionRule)> {
    ruleset.actors.iter().flat_map(|actor| {
        actor.origins.iter().flat_map(move |origin| {
            origin.targets.iter().flat_map(move |target| {
                target
                    .rules
                    .iter()
                    .enumerate()
                    .map(move |(index, rule)| (actor, origin, target, index, rule))
            })
        })
    })
}

fn contradiction(rule: &TransitionRule) -> Option<(&SquareId, &OccupationState)> {
    rule.require
        .iter()
        .find(|(square, state)| rule.prevent.get(*square) == Some(*state))
}

fn implicit_requirement<'a>(
    actor: &ActorId,
    origin: &'a Origin,
    rule: &'a TransitionRule,
) -> Option<&'a SquareId> {
    let square = origin.square()?;
    match rule.require.get(square) {
        Some(OccupationState::Exact(expected)) if expected == actor => Some(square),
        _ => None,
    }
}

fn path_for(
    actor: &ActorTable,
    origin: &OriginTable,
    target: &TargetTable,
    index: usize,
) -> RulePath {
    RulePath::new(
        actor.actor.clone(),
        origin.origin.clone(),
        target.target.clone(),
        index,
    )
}

#[cfg(test)]
mod tests {
    use super::super::parse::parse_document;
    use super::*;
    use serde_json::json;

    fn checked(document: serde_json::Value) -> Result<(), LogicalConsistencyError> {
        check(&parse_document(&document).unwrap())
    }

    #[test]
    fn test_clean_ruleset_passes() {
        checked(json!({
            "CHESS:P": {"e2": {"e4": [
                {"require": {"e3": "empty", "e4": "empty"},
                 "prevent": {"d3": "enemy"},
                 "perform": {"e2": null, "e4": "CHESS:P"}}
            ]}}
        }))
        .unwrap();
    }

    #[test]
    fn test_contradiction_names_square_and_state() {
        let err = checked(json!({
            "CHESS:Q": {"d1": {"d3": [
                {"require": {"d2": "empty"},
                 "prevent": {"d2": "empty"},
                 "perform": {"d1": null, "d3": "CHESS:Q"}}
            ]}}
        }))
        .unwrap_err();

        match err {
            LogicalConsistencyError::Contradiction {
                path,
                square,
                state,
            } => {
                assert_eq!(path.to_string(), "rule 0 of CHESS:Q d1 -> d3");
                assert_eq!(square, SquareId::from("d2"));
                assert_eq!(state, OccupationState::Empty);
            }
            other => panic!("expected Contradiction, got {other:?}"),
        }
    }

    #[test]
    fn test_same_square_different_states_is_no_contradiction() {
        checked(json!({
            "CHESS:P": {"e2": {"e3": [
                {"require": {"e3": "empty"},
                 "prevent": {"e3": "enemy"},
                 "perform": {"e2": null, "e3": "CHESS:P"}}
            ]}}
        }))
        .unwrap();
    }

    #[test]
    fn test_implicit_requirement_names_rule_coordinates() {
        let err = checked(json!({
            "X:K": {"e1": {"e2": [
                {"require": {"e1": "X:K"},
                 "perform": {"e1": null, "e2": "X:K"}}
            ]}}
        }))
        .unwrap_err();

        match err {
            LogicalConsistencyError::ImplicitRequirement { path, square } => {
                assert_eq!(path.actor.to_string(), "X:K");
                assert_eq!(path.origin, Origin::from("e1"));
                assert_eq!(path.target, SquareId::from("e2"));
                assert_eq!(square, SquareId::from("e1"));
            }
            other => panic!("expected ImplicitRequirement, got {other:?}"),
        }
    }

    #[test]
    fn test_requiring_someone_else_on_origin_is_allowed() {
        // Pinning a different piece onto the origin square is a real
        // condition, not a restatement.
        checked(json!({
            "X:K": {"e1": {"e2": [
                {"require": {"e1": "X:R"},
                 "perform": {"e1": null, "e2": "X:K"}}
            ]}}
        }))
        .unwrap();
    }

    #[test]
    fn test_hand_origin_has_no_implicit_requirement() {
        checked(json!({
            "SHOGI:P": {"*": {"5e": [
                {"require": {"5e": "empty"},
                 "perform": {"5e": "SHOGI:P"},
                 "drop": "SHOGI:P"}
            ]}}
        }))
        .unwrap();
    }

    #[test]
    fn test_contradictions_reported_before_implicit_requirements() {
        // Both defects in one document; the contradiction pass runs first.
        let err = checked(json!({
            "X:K": {"e1": {"e2": [
                {"require": {"e1": "X:K"},
                 "perform": {"e1": null, "e2": "X:K"}}
            ]},
            "e3": {"e4": [
                {"require": {"d4": "empty"},
                 "prevent": {"d4": "empty"},
                 "perform": {"e3": null, "e4": "X:K"}}
            ]}}
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            LogicalConsistencyError::Contradiction { .. }
        ));
    }
}
