//! Convert `const` keywords to single-value `enum` arrays.
//!
//! The downstream generator understands `enum` but not `const`. The rewrite
//! is unconditional and touches no other keys.

use serde_yaml::Value;

use crate::walker::walk;

pub fn convert_const_to_enum(spec: Value) -> Value {
    walk(spec, &mut rewrite)
}

fn rewrite(node: Value) -> Value {
    match node {
        Value::Mapping(mut map) => {
            if let Some(const_value) = map.shift_remove("const") {
                map.insert(
                    Value::String("enum".to_string()),
                    Value::Sequence(vec![const_value]),
                );
            }
            Value::Mapping(map)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_becomes_single_value_enum() {
        let schema: Value = serde_yaml::from_str(
            r#"
            type: string
            const: active
            "#,
        )
        .unwrap();

        let expected: Value = serde_yaml::from_str(
            r#"
            type: string
            enum: [active]
            "#,
        )
        .unwrap();
        assert_eq!(convert_const_to_enum(schema), expected);
    }

    #[test]
    fn test_const_null_converted() {
        let schema: Value = serde_yaml::from_str("{const: null}").unwrap();
        let expected: Value = serde_yaml::from_str("{enum: [null]}").unwrap();
        assert_eq!(convert_const_to_enum(schema), expected);
    }

    #[test]
    fn test_nested_consts_converted() {
        let schema: Value = serde_yaml::from_str(
            r#"
            properties:
              status:
                const: active
              kind:
                items:
                  const: 3
            "#,
        )
        .unwrap();

        let result = convert_const_to_enum(schema);
        assert_eq!(
            result["properties"]["status"]["enum"],
            serde_yaml::from_str::<Value>("[active]").unwrap()
        );
        assert_eq!(
            result["properties"]["kind"]["items"]["enum"],
            serde_yaml::from_str::<Value>("[3]").unwrap()
        );
    }

    #[test]
    fn test_node_without_const_unchanged() {
        let schema: Value = serde_yaml::from_str("{type: string, enum: [a, b]}").unwrap();
        assert_eq!(convert_const_to_enum(schema.clone()), schema);
    }

    #[test]
    fn test_idempotent() {
        let schema: Value = serde_yaml::from_str("{const: active}").unwrap();
        let once = convert_const_to_enum(schema);
        let twice = convert_const_to_enum(once.clone());
        assert_eq!(once, twice);
    }
}
