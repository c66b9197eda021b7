//! Remove explicit `{type: "null"}` members from `anyOf`/`oneOf` unions.
//!
//! Some schema dialects express optionality as a union with a null member.
//! The downstream generator does not want those: the null member is dropped,
//! a one-member union is unwrapped into its inner schema, and a `default:
//! null` that only made sense while the type was nullable is removed.

use serde_yaml::{Mapping, Value};

use crate::walker::walk;

pub fn remove_null_unions(spec: Value) -> Value {
    walk(spec, &mut rewrite)
}

fn rewrite(mut node: Value) -> Value {
    // Both union keys are checked per node. Unwrapping a one-member union
    // replaces the node, and the replacement may itself carry a union (a
    // oneOf member that is an anyOf), so rewriting repeats until the node
    // settles. Each rewrite removes at least one null member or union key,
    // so the loop terminates.
    let mut changed = true;
    while changed {
        changed = false;
        for union_key in ["anyOf", "oneOf"] {
            node = match node {
                Value::Mapping(map) => {
                    let (rewritten, did_change) = strip_null_members(map, union_key);
                    changed |= did_change;
                    rewritten
                }
                other => other,
            };
        }
    }
    node
}

fn strip_null_members(mut schema: Mapping, union_key: &str) -> (Value, bool) {
    let members = match schema.get(union_key) {
        Some(Value::Sequence(members)) => members,
        _ => return (Value::Mapping(schema), false),
    };

    let mut filtered: Vec<Value> = members
        .iter()
        .filter(|member| !is_null_type(member))
        .cloned()
        .collect();

    // No null member: return unchanged to avoid spurious diffs.
    if filtered.len() == members.len() {
        return (Value::Mapping(schema), false);
    }

    if filtered.is_empty() {
        // The union only contained null; collapse to an explicit null type.
        let mut null_schema = Mapping::new();
        null_schema.insert(
            Value::String("type".to_string()),
            Value::String("null".to_string()),
        );
        return (Value::Mapping(null_schema), true);
    }

    if filtered.len() == 1 {
        let survivor = filtered.remove(0);
        return (unwrap_single_member(survivor, schema, union_key), true);
    }

    schema.insert(
        Value::String(union_key.to_string()),
        Value::Sequence(filtered),
    );
    drop_null_default(&mut schema);
    (Value::Mapping(schema), true)
}

/// Replace the whole node with the surviving member, carrying over sibling
/// keys (`description`, `example`, …) the member does not already define.
fn unwrap_single_member(survivor: Value, original: Mapping, union_key: &str) -> Value {
    let mut merged = match survivor {
        Value::Mapping(merged) => merged,
        // A lone non-mapping member has no keys to merge into; keep it as-is.
        other => return other,
    };

    for (key, value) in original {
        if matches!(key.as_str(), Some(k) if k == union_key) {
            continue;
        }
        if !merged.contains_key(&key) {
            merged.insert(key, value);
        }
    }
    drop_null_default(&mut merged);
    Value::Mapping(merged)
}

fn drop_null_default(schema: &mut Mapping) {
    if matches!(schema.get("default"), Some(Value::Null)) {
        schema.shift_remove("default");
    }
}

fn is_null_type(member: &Value) -> bool {
    matches!(
        member,
        Value::Mapping(map) if matches!(map.get("type"), Some(Value::String(t)) if t == "null")
    )
}
