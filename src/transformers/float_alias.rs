//! Correct the invalid `type: float` alias.
//!
//! `float` is not an OpenAPI type token; the valid spelling is
//! `type: number` with `format: float`.

use serde_yaml::Value;

use crate::walker::walk;

pub fn convert_float_to_number(spec: Value) -> Value {
    walk(spec, &mut rewrite)
}

fn rewrite(node: Value) -> Value {
    match node {
        Value::Mapping(mut map) => {
            if matches!(map.get("type"), Some(Value::String(t)) if t == "float") {
                map.insert(
                    Value::String("type".to_string()),
                    Value::String("number".to_string()),
                );
                map.insert(
                    Value::String("format".to_string()),
                    Value::String("float".to_string()),
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
    fn test_float_type_corrected() {
        let schema: Value = serde_yaml::from_str("{type: float}").unwrap();
        let expected: Value = serde_yaml::from_str("{type: number, format: float}").unwrap();
        assert_eq!(convert_float_to_number(schema), expected);
    }

    #[test]
    fn test_float_inside_items_and_unions() {
        let schema: Value = serde_yaml::from_str(
            r#"
            type: object
            properties:
              scores:
                type: array
                items:
                  type: float
              value:
                oneOf:
                  - type: float
                  - type: string
            "#,
        )
        .unwrap();

        let result = convert_float_to_number(schema);
        assert_eq!(
            result["properties"]["scores"]["items"]["type"],
            Value::String("number".to_string())
        );
        assert_eq!(
            result["properties"]["scores"]["items"]["format"],
            Value::String("float".to_string())
        );
        assert_eq!(
            result["properties"]["value"]["oneOf"][0]["type"],
            Value::String("number".to_string())
        );
    }

    #[test]
    fn test_valid_number_type_unchanged() {
        let schema: Value = serde_yaml::from_str("{type: number, format: double}").unwrap();
        assert_eq!(convert_float_to_number(schema.clone()), schema);
    }

    #[test]
    fn test_idempotent() {
        let schema: Value = serde_yaml::from_str("{type: float}").unwrap();
        let once = convert_float_to_number(schema);
        let twice = convert_float_to_number(once.clone());
        assert_eq!(once, twice);
    }
}
