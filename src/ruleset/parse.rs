//! Structural pass: nested JSON document to compiled tables.
//!
//! The walk accepts exactly the interchange shape
//! `actor -> origin -> target -> [rule]` and rejects anything else with a
//! [`StructuralError`] naming the narrowest known location. Declared order
//! survives the walk because documents are read through `serde_json`'s
//! order-preserving map.

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::{ActorTable, OriginTable, Ruleset, TargetTable};
use crate::core::{ActorId, Origin, SquareId, HAND_SENTINEL};
use crate::error::{RulePath, StructuralError};
use crate::rules::{Conditions, Diff, OccupationState, TransitionRule};

const RULE_KEYS: [&str; 5] = ["require", "prevent", "perform", "gain", "drop"];

pub(crate) fn parse_document(document: &Value) -> Result<Ruleset, StructuralError> {
    let root = document.as_object().ok_or(StructuralError::RootNotObject)?;
    let mut actors = Vec::with_capacity(root.len());
    for (key, origins) in root {
        let actor = key
            .parse::<ActorId>()
            .map_err(|source| StructuralError::InvalidActor {
                actor: key.clone(),
                source,
            })?;
        actors.push(parse_actor_table(actor, origins)?);
    }
    Ok(Ruleset::from_tables(actors))
}

fn parse_actor_table(actor: ActorId, value: &Value) -> Result<ActorTable, StructuralError> {
    let Some(table) = value.as_object() else {
        return Err(StructuralError::OriginTableNotObject { actor });
    };
    let mut origins = Vec::with_capacity(table.len());
    let mut index = FxHashMap::default();
    for (label, targets) in table {
        if label.is_empty() {
            return Err(StructuralError::EmptyOrigin {
                actor: actor.clone(),
            });
        }
        let origin = Origin::from(label.as_str());
        index.insert(origin.clone(), origins.len());
        origins.push(parse_origin_table(&actor, origin, targets)?);
    }
    Ok(ActorTable {
        actor,
        origins,
        index,
    })
}

fn parse_origin_table(
    actor: &ActorId,
    origin: Origin,
    value: &Value,
) -> Result<OriginTable, StructuralError> {
    let Some(table) = value.as_object() else {
        return Err(StructuralError::TargetTableNotObject {
            actor: actor.clone(),
            origin,
        });
    };
    let mut targets = Vec::with_capacity(table.len());
    let mut index = FxHashMap::default();
    for (label, rules) in table {
        // The sentinel only ever names an origin; a move cannot end in hand.
        if label.is_empty() || label == HAND_SENTINEL {
            return Err(StructuralError::InvalidTarget {
                actor: actor.clone(),
                origin: origin.clone(),
                target: label.clone(),
            });
        }
        let target = SquareId::from(label.as_str());
        let rules = parse_rules(actor, &origin, &target, rules)?;
        index.insert(target.clone(), targets.len());
        targets.push(TargetTable { target, rules });
    }
    Ok(OriginTable {
        origin,
        targets,
        index,
    })
}

fn parse_rules(
    actor: &ActorId,
    origin: &Origin,
    target: &SquareId,
    value: &Value,
) -> Result<Vec<TransitionRule>, StructuralError> {
    let Some(entries) = value.as_array() else {
        return Err(StructuralError::RuleListNotArray {
            actor: actor.clone(),
            origin: origin.clone(),
            target: target.clone(),
        });
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            let path = RulePath::new(actor.clone(), origin.clone(), target.clone(), index);
            parse_rule(path, rule)
        })
        .collect()
}

fn parse_rule(path: RulePath, value: &Value) -> Result<TransitionRule, StructuralError> {
    let Some(fields) = value.as_object() else {
        return Err(StructuralError::RuleNotObject { path });
    };
    if let Some(key) = fields.keys().find(|key| !RULE_KEYS.contains(&key.as_str())) {
        return Err(StructuralError::UnknownKey {
            key: key.clone(),
            path,
        });
    }

    let require = match fields.get("require") {
        None => Conditions::new(),
        Some(value) => parse_conditions(&path, "require", value)?,
    };
    let prevent = match fields.get("prevent") {
        None => Conditions::new(),
        Some(value) => parse_conditions(&path, "prevent", value)?,
    };
    let perform = match fields.get("perform") {
        None => return Err(StructuralError::MissingPerform { path }),
        Some(value) => parse_perform(&path, value)?,
    };
    let gain = parse_hand_field(&path, "gain", fields.get("gain"))?;
    let drop = parse_hand_field(&path, "drop", fields.get("drop"))?;

    Ok(TransitionRule {
        require,
        prevent,
        perform,
        gain,
        drop,
    })
}

fn parse_conditions(
    path: &RulePath,
    field: &'static str,
    value: &Value,
) -> Result<Conditions, StructuralError> {
    let Some(entries) = value.as_object() else {
        return Err(StructuralError::FieldNotObject {
            path: path.clone(),
            field,
        });
    };
    let mut conditions = Conditions::new();
    for (square, literal) in entries {
        check_square(path, field, square)?;
        let square = SquareId::from(square.as_str());
        let Some(literal) = literal.as_str() else {
            return Err(StructuralError::ConditionNotString {
                path: path.clone(),
                field,
                square,
            });
        };
        let state = OccupationState::from_literal(literal).map_err(|source| {
            StructuralError::InvalidCondition {
                path: path.clone(),
                field,
                square: square.clone(),
                source,
            }
        })?;
        conditions.insert(square, state);
    }
    Ok(conditions)
}

fn parse_perform(path: &RulePath, value: &Value) -> Result<Diff, StructuralError> {
    let Some(entries) = value.as_object() else {
        return Err(StructuralError::FieldNotObject {
            path: path.clone(),
            field: "perform",
        });
    };
    let mut diff = Diff::new();
    for (square, occupant) in entries {
        check_square(path, "perform", square)?;
        let square = SquareId::from(square.as_str());
        let occupant = match occupant {
            Value::Null => None,
            Value::String(actor) => {
                Some(actor.parse::<ActorId>().map_err(|source| {
                    StructuralError::InvalidPerformActor {
                        path: path.clone(),
                        square: square.clone(),
                        source,
                    }
                })?)
            }
            _ => {
                return Err(StructuralError::PerformEntryNotActor {
                    path: path.clone(),
                    square,
                })
            }
        };
        diff.insert(square, occupant);
    }
    Ok(diff)
}

/// Gain and drop both default to absent; an explicit `null` means the same.
fn parse_hand_field(
    path: &RulePath,
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<ActorId>, StructuralError> {
    let actor = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(actor)) => {
            actor
                .parse::<ActorId>()
                .map_err(|source| StructuralError::InvalidHandActor {
                    path: path.clone(),
                    field,
                    source,
                })?
        }
        Some(_) => {
            return Err(StructuralError::HandFieldNotString {
                path: path.clone(),
                field,
            })
        }
    };
    if !actor.is_base() {
        return Err(StructuralError::HandPieceNotBase {
            path: path.clone(),
            field,
            actor,
        });
    }
    Ok(Some(actor))
}

fn check_square(
    path: &RulePath,
    field: &'static str,
    square: &str,
) -> Result<(), StructuralError> {
    if square.is_empty() || square == HAND_SENTINEL {
        return Err(StructuralError::InvalidSquare {
            path: path.clone(),
            field,
            square: square.to_string(),
        });
    }
    Ok(())
}
