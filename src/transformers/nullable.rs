//! Reconcile nullability keywords with `required` membership.
//!
//! The downstream generator infers "this field may be absent or null" from
//! required-array membership alone, so required membership has to become the
//! single source of truth: a property that is nullable in any encoding
//! (`nullable: true`, a `type` array containing `"null"`, or a `oneOf`/`anyOf`
//! with a null member) is dropped from its parent's `required`, and every
//! schema is then stripped of the null-encoding residue itself.
//!
//! The required edit must observe the *pre-cleaning* nullability signal. The
//! walker's pre-order guarantees this: a parent's `required` is edited while
//! its property schemas are still untouched, and each property is only
//! cleaned when the walker descends into it afterwards.
//!
//! Unlike the byte-format fix this pass is unconditional; it applies to every
//! document regardless of declared OpenAPI version.

use serde_yaml::{Mapping, Value};

use crate::walker::walk;

pub fn reconcile_nullable(spec: Value) -> Value {
    walk(spec, &mut rewrite)
}

fn rewrite(node: Value) -> Value {
    match node {
        Value::Mapping(map) => {
            let map = prune_nullable_required(map);
            clean_null_residue(map)
        }
        other => other,
    }
}

/// Drop nullable properties from this node's `required` list; remove the key
/// entirely rather than leave `required: []`.
fn prune_nullable_required(mut map: Mapping) -> Mapping {
    let kept = match (map.get("properties"), map.get("required")) {
        (Some(Value::Mapping(properties)), Some(Value::Sequence(required))) => {
            let kept: Vec<Value> = required
                .iter()
                .filter(|name| {
                    !properties
                        .get(*name)
                        .map(is_nullable_schema)
                        .unwrap_or(false)
                })
                .cloned()
                .collect();
            Some(kept)
        }
        _ => None,
    };

    match kept {
        Some(kept) if kept.is_empty() => {
            map.shift_remove("required");
        }
        Some(kept) => {
            map.insert(Value::String("required".to_string()), Value::Sequence(kept));
        }
        None => {}
    }
    map
}

/// Strip this node's own null encodings: the `nullable` keyword, `"null"`
/// entries in a `type` array, and null members of `oneOf`/`anyOf`.
fn clean_null_residue(mut map: Mapping) -> Value {
    map.shift_remove("nullable");

    if let Some(Value::Sequence(types)) = map.get("type") {
        let filtered: Vec<Value> = types
            .iter()
            .filter(|t| !matches!(t, Value::String(s) if s == "null"))
            .cloned()
            .collect();
        // A type list that was only ["null"] is left alone; there is no
        // sensible single type to collapse it to.
        if filtered.len() != types.len() && !filtered.is_empty() {
            let replacement = if filtered.len() == 1 {
                filtered.into_iter().next().unwrap_or(Value::Null)
            } else {
                Value::Sequence(filtered)
            };
            map.insert(Value::String("type".to_string()), replacement);
        }
    }

    for union_key in ["oneOf", "anyOf"] {
        let filtered = match map.get(union_key) {
            Some(Value::Sequence(members)) => {
                let filtered: Vec<Value> = members
                    .iter()
                    .filter(|member| !is_null_type(member))
                    .cloned()
                    .collect();
                if filtered.len() == members.len() {
                    continue;
                }
                filtered
            }
            _ => continue,
        };

        if filtered.is_empty() {
            map.shift_remove(union_key);
        } else if filtered.len() == 1 {
            let (merged, did_merge) = merge_union_member(map, union_key, filtered);
            if did_merge {
                // The merged member may itself carry null encodings
                // (`nullable: true`, a type array, another union); re-clean
                // so a single pass settles the node.
                return clean_null_residue(prune_nullable_required(merged));
            }
            map = merged;
        } else {
            map.insert(
                Value::String(union_key.to_string()),
                Value::Sequence(filtered),
            );
        }
    }

    Value::Mapping(map)
}

/// Unwrap a one-member union in place: the member's keys are merged into the
/// current schema without overwriting existing keys, and the union key goes.
fn merge_union_member(mut map: Mapping, union_key: &str, mut filtered: Vec<Value>) -> (Mapping, bool) {
    let survivor = filtered.remove(0);
    match survivor {
        Value::Mapping(member) => {
            map.shift_remove(union_key);
            for (key, value) in member {
                if !map.contains_key(&key) {
                    map.insert(key, value);
                }
            }
            (map, true)
        }
        other => {
            // Nothing to merge from a non-mapping member; keep the filtered union.
            map.insert(
                Value::String(union_key.to_string()),
                Value::Sequence(vec![other]),
            );
            (map, false)
        }
    }
}

fn is_nullable_schema(schema: &Value) -> bool {
    let Value::Mapping(map) = schema else {
        return false;
    };

    if matches!(map.get("nullable"), Some(Value::Bool(true))) {
        return true;
    }
    if let Some(Value::Sequence(types)) = map.get("type") {
        if types
            .iter()
            .any(|t| matches!(t, Value::String(s) if s == "null"))
        {
            return true;
        }
    }
    for union_key in ["oneOf", "anyOf"] {
        if let Some(Value::Sequence(members)) = map.get(union_key) {
            if members.iter().any(|member| is_null_type(member)) {
                return true;
            }
        }
    }
    false
}

fn is_null_type(member: &Value) -> bool {
    matches!(
        member,
        Value::Mapping(map) if matches!(map.get("type"), Some(Value::String(t)) if t == "null")
    )
}
