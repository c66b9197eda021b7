use serde_yaml::{Mapping, Value};

/// Depth-first, pre-order traversal of a document tree.
///
/// Applies `transform` to the current node *first*, then recurses into the
/// (possibly replaced) result: every value of a mapping and every element of
/// a sequence is replaced by its own walk result, preserving key/element
/// order. Scalars are returned as-is.
///
/// Because the transform runs before descent, a transform that replaces a
/// node outright (e.g. unwrapping a one-member union into its inner schema)
/// still gets its replacement's children visited, so rewrites compose across
/// nesting levels in a single pass.
///
/// The walker only follows structural containment, which is acyclic by
/// construction, so no cycle guard is needed here. It never fails; transforms
/// are expected to check node shape and return unexpected shapes unchanged.
pub fn walk<F>(node: Value, transform: &mut F) -> Value
where
    F: FnMut(Value) -> Value,
{
    match transform(node) {
        Value::Mapping(map) => {
            let mut rebuilt = Mapping::with_capacity(map.len());
            for (key, value) in map {
                rebuilt.insert(key, walk(value, transform));
            }
            Value::Mapping(rebuilt)
        }
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| walk(item, transform))
                .collect(),
        ),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uppercase_strings(node: Value) -> Value {
        match node {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        }
    }

    #[test]
    fn test_walk_transforms_nested_scalars() {
        let tree: Value = serde_yaml::from_str(
            r#"
            name: john
            tags:
              - alpha
              - beta
            nested:
              inner: value
            "#,
        )
        .unwrap();

        let result = walk(tree, &mut uppercase_strings);

        assert_eq!(result["name"], Value::String("JOHN".to_string()));
        assert_eq!(result["tags"][0], Value::String("ALPHA".to_string()));
        assert_eq!(result["tags"][1], Value::String("BETA".to_string()));
        assert_eq!(result["nested"]["inner"], Value::String("VALUE".to_string()));
    }

    #[test]
    fn test_walk_recurses_into_replacement_node() {
        // A transform that unwraps {wrapper: X} into X. The replacement's own
        // children must still be visited, so nested wrappers collapse in one pass.
        let mut unwrap_wrapper = |node: Value| -> Value {
            match node {
                Value::Mapping(mut map) => match map.shift_remove("wrapper") {
                    Some(inner) if map.is_empty() => inner,
                    Some(inner) => {
                        map.insert(Value::String("wrapper".to_string()), inner);
                        Value::Mapping(map)
                    }
                    None => Value::Mapping(map),
                },
                other => other,
            }
        };

        let tree: Value = serde_yaml::from_str(
            r#"
            field:
              wrapper:
                wrapper:
                  type: string
            "#,
        )
        .unwrap();

        let result = walk(tree, &mut unwrap_wrapper);
        assert_eq!(result["field"]["type"], Value::String("string".to_string()));
    }

    #[test]
    fn test_walk_preserves_mapping_order() {
        let tree: Value = serde_yaml::from_str("{b: 1, a: 2, c: 3}").unwrap();
        let result = walk(tree, &mut |node| node);

        let keys: Vec<String> = result
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_walk_scalar_passthrough() {
        assert_eq!(walk(Value::Null, &mut |n| n), Value::Null);
        assert_eq!(
            walk(Value::Bool(true), &mut uppercase_strings),
            Value::Bool(true)
        );
    }
}
