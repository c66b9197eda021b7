//! Prune `required` arrays down to names that exist in `properties`.
//!
//! Runs last among the schema-shape passes so it also sweeps up entries made
//! dangling by earlier rewrites, not just ones invalid in the source.

use serde_yaml::Value;

use crate::walker::walk;

pub fn clean_required_arrays(spec: Value) -> Value {
    walk(spec, &mut rewrite)
}

fn rewrite(node: Value) -> Value {
    match node {
        Value::Mapping(mut map) => {
            let kept = match (map.get("properties"), map.get("required")) {
                (Some(Value::Mapping(properties)), Some(Value::Sequence(required))) => {
                    // Filter, preserving the original order of survivors.
                    Some(
                        required
                            .iter()
                            .filter(|name| properties.contains_key(*name))
                            .cloned()
                            .collect::<Vec<Value>>(),
                    )
                }
                // A required list with no properties at all is meaningless.
                (None, Some(Value::Sequence(_))) => Some(Vec::new()),
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
            Value::Mapping(map)
        }
        other => other,
    }
}
