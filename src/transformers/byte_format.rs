//! Convert `format: byte` to `contentEncoding: base64` for 3.1+ documents.
//!
//! Version-gated: the rewrite only applies when the document declares
//! OpenAPI 3.1 or later. A missing, non-string, or unparseable `openapi`
//! value means skip — the deliberate opposite of the nullable pass, which is
//! unconditional.

use serde_yaml::Value;

use crate::spec_version::document_version;
use crate::walker::walk;

pub fn fix_byte_format(spec: Value) -> Value {
    let convert = document_version(&spec)
        .map(|version| version.is_31_or_later())
        .unwrap_or(false);
    if !convert {
        return spec;
    }
    walk(spec, &mut rewrite)
}

fn rewrite(node: Value) -> Value {
    match node {
        Value::Mapping(mut map) => {
            let is_byte_string = matches!(map.get("type"), Some(Value::String(t)) if t == "string")
                && matches!(map.get("format"), Some(Value::String(f)) if f == "byte");
            if is_byte_string {
                map.shift_remove("format");
                map.insert(
                    Value::String("contentEncoding".to_string()),
                    Value::String("base64".to_string()),
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

    fn doc(version: &str) -> Value {
        serde_yaml::from_str(&format!(
            r#"
            openapi: "{version}"
            components:
              schemas:
                File:
                  type: object
                  properties:
                    data:
                      type: string
                      format: byte
            "#
        ))
        .unwrap()
    }

    fn data_prop(doc: &Value) -> &Value {
        &doc["components"]["schemas"]["File"]["properties"]["data"]
    }

    #[test]
    fn test_byte_format_converted_for_31() {
        let result = fix_byte_format(doc("3.1.0"));
        let prop = data_prop(&result);
        assert!(prop.get("format").is_none());
        assert_eq!(
            prop["contentEncoding"],
            Value::String("base64".to_string())
        );
    }

    #[test]
    fn test_byte_format_untouched_for_30() {
        let input = doc("3.0.0");
        assert_eq!(fix_byte_format(input.clone()), input);
    }

    #[test]
    fn test_missing_version_means_skip() {
        let input: Value = serde_yaml::from_str(
            r#"
            components:
              schemas:
                File:
                  type: string
                  format: byte
            "#,
        )
        .unwrap();
        assert_eq!(fix_byte_format(input.clone()), input);
    }

    #[test]
    fn test_unparseable_version_means_skip() {
        let input = doc("three.one");
        assert_eq!(fix_byte_format(input.clone()), input);
    }

    #[test]
    fn test_non_string_type_with_byte_format_untouched() {
        let input: Value = serde_yaml::from_str(
            r#"
            openapi: "3.1.0"
            components:
              schemas:
                Odd:
                  type: integer
                  format: byte
            "#,
        )
        .unwrap();
        assert_eq!(fix_byte_format(input.clone()), input);
    }

    #[test]
    fn test_idempotent() {
        let once = fix_byte_format(doc("3.1.0"));
        let twice = fix_byte_format(once.clone());
        assert_eq!(once, twice);
    }
}
