//! Inline multipart properties whose schema is a `$ref` to an array schema.
//!
//! The downstream generator decides "this multipart part repeats" by
//! following the `$ref`, but then unwraps the original, still-a-`$ref` node
//! as if it were the array schema and crashes. Replacing the bare reference
//! with an inline `{type: array, items: …}` node sidesteps the defect.
//!
//! Only `multipart/*` content entries are rewritten; the same pattern under
//! `application/json` is deliberately left alone, because the defect lives in
//! the generator's multipart path only.
//!
//! The pass runs in two phases: a read-only scan over the tree collects
//! path-addressed property replacements (resolving `$ref`s against the same
//! tree), then the edits are applied. Edits target the `$ref` destination, so
//! a schema shared by several operations is rewritten once and the fix is
//! visible everywhere, like the aliased in-place mutation it replaces.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

use crate::resolver::{is_array_schema, lookup};

const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

pub fn inline_multipart_array_refs(spec: Value) -> Value {
    let edits = collect_edits(&spec);
    apply_edits(spec, edits)
}

struct PropertyEdit {
    /// Mapping-key path from the root to the schema node owning `properties`.
    schema_path: Vec<String>,
    property: String,
    replacement: Value,
}

fn collect_edits(spec: &Value) -> Vec<PropertyEdit> {
    let mut edits = Vec::new();

    if let Some(paths) = spec.get("paths").and_then(Value::as_mapping) {
        for (path_key, path_item) in paths {
            let (Some(path_str), Some(operations)) = (path_key.as_str(), path_item.as_mapping())
            else {
                continue;
            };
            for method in HTTP_METHODS {
                let Some(operation) = operations.get(method).and_then(Value::as_mapping) else {
                    continue;
                };
                let Some(request_body) = operation.get("requestBody") else {
                    continue;
                };
                match ref_string(request_body) {
                    Some(reference) => {
                        // A shared request body; edit at the $ref target.
                        let Some(resolved) = lookup(reference, spec) else {
                            continue;
                        };
                        let Some(mut base) = ref_segments(reference) else {
                            continue;
                        };
                        base.push("content".to_string());
                        scan_content(&base, resolved.get("content"), spec, &mut edits);
                    }
                    None => {
                        let base = vec![
                            "paths".to_string(),
                            path_str.to_string(),
                            method.to_string(),
                            "requestBody".to_string(),
                            "content".to_string(),
                        ];
                        scan_content(&base, request_body.get("content"), spec, &mut edits);
                    }
                }
            }
        }
    }

    if let Some(bodies) = spec
        .get("components")
        .and_then(|components| components.get("requestBodies"))
        .and_then(Value::as_mapping)
    {
        for (name, body) in bodies {
            let Some(name_str) = name.as_str() else {
                continue;
            };
            let base = vec![
                "components".to_string(),
                "requestBodies".to_string(),
                name_str.to_string(),
                "content".to_string(),
            ];
            scan_content(&base, body.get("content"), spec, &mut edits);
        }
    }

    edits
}

fn scan_content(
    content_path: &[String],
    content: Option<&Value>,
    spec: &Value,
    edits: &mut Vec<PropertyEdit>,
) {
    let Some(content) = content.and_then(Value::as_mapping) else {
        return;
    };

    for (content_type, media) in content {
        let Some(ct) = content_type.as_str() else {
            continue;
        };
        if !ct.contains("multipart") {
            continue;
        }
        let Some(media_map) = media.as_mapping() else {
            continue;
        };
        let Some(raw_schema) = media_map.get("schema") else {
            continue;
        };

        // The content's schema may itself be a top-level $ref; the edit then
        // targets the referenced location.
        let (schema, schema_path): (&Value, Vec<String>) = match ref_string(raw_schema) {
            Some(reference) => {
                let Some(resolved) = lookup(reference, spec) else {
                    continue;
                };
                let Some(segments) = ref_segments(reference) else {
                    continue;
                };
                (resolved, segments)
            }
            None => {
                let mut inline = content_path.to_vec();
                inline.push(ct.to_string());
                inline.push("schema".to_string());
                (raw_schema, inline)
            }
        };

        let Some(properties) = schema.get("properties").and_then(Value::as_mapping) else {
            continue;
        };
        for (prop_key, prop_schema) in properties {
            let Some(prop_name) = prop_key.as_str() else {
                continue;
            };
            let Some(prop_map) = prop_schema.as_mapping() else {
                continue;
            };
            if !prop_map.contains_key("$ref") {
                continue;
            }
            if !is_array_schema(prop_schema, spec) {
                continue;
            }
            edits.push(PropertyEdit {
                schema_path: schema_path.clone(),
                property: prop_name.to_string(),
                replacement: inline_array(prop_schema, spec),
            });
        }
    }
}

/// Build the inline `{type: array, items, description?}` replacement for a
/// property that is a `$ref` chain ending in an array schema.
fn inline_array(prop_schema: &Value, spec: &Value) -> Value {
    let mut seen: HashSet<String> = HashSet::new();
    let mut current = prop_schema;
    while let Some(reference) = ref_string(current) {
        if !seen.insert(reference.to_string()) {
            return prop_schema.clone();
        }
        match lookup(reference, spec) {
            Some(resolved) => current = resolved,
            None => return prop_schema.clone(),
        }
    }

    let mut inlined = Mapping::new();
    inlined.insert(
        Value::String("type".to_string()),
        Value::String("array".to_string()),
    );
    let items = current
        .get("items")
        .cloned()
        .unwrap_or_else(|| Value::Mapping(Mapping::new()));
    inlined.insert(Value::String("items".to_string()), items);
    if let Some(description) = current.get("description") {
        inlined.insert(
            Value::String("description".to_string()),
            description.clone(),
        );
    }
    Value::Mapping(inlined)
}

fn apply_edits(mut spec: Value, edits: Vec<PropertyEdit>) -> Value {
    for edit in edits {
        let Some(schema) = descend_mut(&mut spec, &edit.schema_path) else {
            continue;
        };
        let Some(Value::Mapping(properties)) = schema
            .as_mapping_mut()
            .and_then(|map| map.get_mut("properties"))
        else {
            continue;
        };
        properties.insert(Value::String(edit.property), edit.replacement);
    }
    spec
}

fn descend_mut<'a>(root: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut node = root;
    for segment in path {
        node = node.as_mapping_mut()?.get_mut(segment.as_str())?;
    }
    Some(node)
}

fn ref_string(node: &Value) -> Option<&str> {
    node.as_mapping()?.get("$ref")?.as_str()
}

fn ref_segments(reference: &str) -> Option<Vec<String>> {
    reference
        .strip_prefix("#/")
        .map(|path| path.split('/').map(str::to_string).collect())
}
