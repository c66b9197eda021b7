//! Promote schemas misplaced under `components.headers`.
//!
//! Some upstream documents define a reusable schema under
//! `components.headers` while the rest of the document references it as
//! `#/components/schemas/{name}`. Detection is data-driven: every string in
//! the tree is scanned for the schema-reference pattern, and each referenced
//! name that lives in `components.headers` but not `components.schemas` is
//! moved over (preferring the nested `schema` sub-object the header-wrap pass
//! produces). Existing `components.schemas` entries are never overwritten.

use std::collections::HashSet;

use regex::Regex;
use serde_yaml::{Mapping, Value};

pub fn promote_misplaced_schemas(mut spec: Value) -> Value {
    let referenced = collect_schema_refs(&spec);

    let Some(components) = spec.get_mut("components").and_then(Value::as_mapping_mut) else {
        return spec;
    };
    if !matches!(components.get("headers"), Some(Value::Mapping(_))) {
        return spec;
    }
    if !components.contains_key("schemas") {
        components.insert(
            Value::String("schemas".to_string()),
            Value::Mapping(Mapping::new()),
        );
    }

    let promotions: Vec<(Value, Value)> = match (components.get("headers"), components.get("schemas"))
    {
        (Some(Value::Mapping(headers)), Some(Value::Mapping(schemas))) => headers
            .iter()
            .filter_map(|(name, header)| {
                let name_str = name.as_str()?;
                if !referenced.contains(name_str) || schemas.contains_key(name_str) {
                    return None;
                }
                let header_map = header.as_mapping()?;
                // Prefer the schema sub-object the header-wrap pass nests;
                // fall back to the raw header mapping.
                let schema_value = header_map
                    .get("schema")
                    .cloned()
                    .unwrap_or_else(|| header.clone());
                Some((name.clone(), schema_value))
            })
            .collect(),
        _ => Vec::new(),
    };

    for (name, schema_value) in promotions {
        if let Some(Value::Mapping(schemas)) = components.get_mut("schemas") {
            schemas.insert(name.clone(), schema_value);
        }
        if let Some(Value::Mapping(headers)) = components.get_mut("headers") {
            headers.shift_remove(&name);
        }
    }

    spec
}

/// Collect every `{name}` referenced as `#/components/schemas/{name}`
/// anywhere in the document, by a typed recursive scan over string scalars
/// (keys included).
fn collect_schema_refs(spec: &Value) -> HashSet<String> {
    let pattern = Regex::new(r#"#/components/schemas/([^"]+)"#).unwrap();
    let mut names = HashSet::new();
    scan_strings(spec, &pattern, &mut names);
    names
}

fn scan_strings(node: &Value, pattern: &Regex, names: &mut HashSet<String>) {
    match node {
        Value::String(text) => {
            for captures in pattern.captures_iter(text) {
                if let Some(name) = captures.get(1) {
                    names.insert(name.as_str().to_string());
                }
            }
        }
        Value::Mapping(map) => {
            for (key, value) in map {
                scan_strings(key, pattern, names);
                scan_strings(value, pattern, names);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                scan_strings(item, pattern, names);
            }
        }
        Value::Tagged(tagged) => scan_strings(&tagged.value, pattern, names),
        _ => {}
    }
}
