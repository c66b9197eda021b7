//! Repair Header Objects carrying bare Schema Object keywords.
//!
//! Some upstream documents put `type`, `enum`, `items`, … directly on a
//! Header Object instead of nesting them under `schema`. Those keywords are
//! moved into a new `schema` sub-mapping; null-valued header entries are
//! deleted outright. Only `components.headers` is touched — inline headers
//! inside response objects are left alone.

use serde_yaml::{Mapping, Value};

/// Keywords only valid inside a Schema Object, never on a Header Object.
/// Found on a bare header, they are moved into the `schema` sub-mapping.
const PURE_SCHEMA_KEYS: [&str; 27] = [
    "type",
    "properties",
    "items",
    "enum",
    "format",
    "default",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "pattern",
    "additionalProperties",
    "allOf",
    "anyOf",
    "oneOf",
    "not",
    "title",
    "readOnly",
    "writeOnly",
    "nullable",
    "discriminator",
    "xml",
    "externalDocs",
];

/// Keywords valid on both objects: kept at the header level AND copied into
/// `schema`.
const DUAL_KEYS: [&str; 3] = ["description", "example", "examples"];

// `required` is the ambiguous one: a boolean on a Header Object ("is this
// header required?"), a list of property names inside a Schema Object. The
// value type decides which meaning applies. Header-only keywords
// (`deprecated`, `style`, `explode`, `allowEmptyValue`, `allowReserved`,
// boolean `required`) always stay at the top level.

pub fn wrap_header_schemas(mut spec: Value) -> Value {
    let Some(headers) = spec
        .get_mut("components")
        .and_then(|components| components.get_mut("headers"))
        .and_then(Value::as_mapping_mut)
    else {
        return spec;
    };

    let null_names: Vec<Value> = headers
        .iter()
        .filter(|(_, value)| value.is_null())
        .map(|(name, _)| name.clone())
        .collect();
    for name in null_names {
        headers.shift_remove(&name);
    }

    let names: Vec<Value> = headers.keys().cloned().collect();
    for name in names {
        let Some(header) = headers.get_mut(&name).and_then(Value::as_mapping_mut) else {
            continue;
        };
        if header.contains_key("schema") || header.contains_key("content") {
            continue;
        }

        let required_is_schema_list = matches!(header.get("required"), Some(Value::Sequence(_)));
        let has_pure_schema_key = header
            .keys()
            .any(|key| matches!(key.as_str(), Some(k) if PURE_SCHEMA_KEYS.contains(&k)));
        if !has_pure_schema_key && !required_is_schema_list {
            continue;
        }

        let mut schema_obj = Mapping::new();
        let mut moved: Vec<Value> = Vec::new();
        for (key, value) in header.iter() {
            let Some(key_str) = key.as_str() else {
                continue;
            };
            if PURE_SCHEMA_KEYS.contains(&key_str)
                || (key_str == "required" && required_is_schema_list)
            {
                schema_obj.insert(key.clone(), value.clone());
                moved.push(key.clone());
            } else if DUAL_KEYS.contains(&key_str) {
                schema_obj.insert(key.clone(), value.clone());
            }
        }

        for key in moved {
            header.shift_remove(&key);
        }
        header.insert(Value::String("schema".to_string()), Value::Mapping(schema_obj));
    }

    spec
}
