use std::collections::HashSet;

use serde_yaml::Value;

/// Outcome of resolving a `$ref` string against the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTarget<'a> {
    /// The reference resolved to a node in the same document.
    Resolved(&'a Value),
    /// A fragment-local reference whose path does not exist.
    NotFound,
    /// Not a fragment-local reference (external file, URL); not our concern.
    External,
}

/// Resolve a fragment-local JSON-pointer-style reference (`#/a/b/c`) to the
/// node it denotes within the same document tree.
///
/// Resolution is a pure read: the returned node is a view into `root`, never
/// a copy. A missing segment, or a non-mapping where a segment must be
/// indexed, yields `NotFound` rather than an error.
pub fn resolve_ref<'a>(reference: &str, root: &'a Value) -> RefTarget<'a> {
    let Some(path) = reference.strip_prefix("#/") else {
        return RefTarget::External;
    };

    let mut node = root;
    for segment in path.split('/') {
        match node {
            Value::Mapping(map) => match map.get(segment) {
                Some(next) => node = next,
                None => return RefTarget::NotFound,
            },
            _ => return RefTarget::NotFound,
        }
    }
    RefTarget::Resolved(node)
}

/// Convenience wrapper over [`resolve_ref`] collapsing the skip cases.
pub fn lookup<'a>(reference: &str, root: &'a Value) -> Option<&'a Value> {
    match resolve_ref(reference, root) {
        RefTarget::Resolved(node) => Some(node),
        RefTarget::NotFound | RefTarget::External => None,
    }
}

/// Whether `schema` ultimately denotes `type: array`, following `$ref`
/// indirection one hop per recursive step.
///
/// A visited set of reference strings guarantees termination: the instant a
/// reference repeats, the answer is `false` (a cycle cannot prove an array).
/// Dangling references likewise answer `false`.
pub fn is_array_schema(schema: &Value, root: &Value) -> bool {
    resolves_to_array(schema, root, &mut HashSet::new())
}

fn resolves_to_array(schema: &Value, root: &Value, visited: &mut HashSet<String>) -> bool {
    let Value::Mapping(map) = schema else {
        return false;
    };

    if let Some(Value::String(reference)) = map.get("$ref") {
        if !visited.insert(reference.clone()) {
            return false;
        }
        return match lookup(reference, root) {
            Some(resolved) => resolves_to_array(resolved, root, visited),
            None => false,
        };
    }

    matches!(map.get("type"), Some(Value::String(t)) if t == "array")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Value {
        serde_yaml::from_str(
            r#"
            components:
              schemas:
                Tags:
                  type: array
                  items:
                    type: string
                TagsAlias:
                  $ref: '#/components/schemas/Tags'
                User:
                  type: object
                Loop:
                  $ref: '#/components/schemas/Loop'
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_ref_found() {
        let doc = sample_doc();
        match resolve_ref("#/components/schemas/Tags", &doc) {
            RefTarget::Resolved(node) => {
                assert_eq!(node["type"], Value::String("array".to_string()));
            }
            other => panic!("expected Resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_ref_dangling_path_is_not_found() {
        let doc = sample_doc();
        assert_eq!(
            resolve_ref("#/components/schemas/Missing", &doc),
            RefTarget::NotFound
        );
        assert_eq!(
            resolve_ref("#/components/schemas/Tags/type/deeper", &doc),
            RefTarget::NotFound
        );
    }

    #[test]
    fn test_resolve_ref_external_is_skipped() {
        let doc = sample_doc();
        assert_eq!(
            resolve_ref("other.yaml#/components/schemas/Tags", &doc),
            RefTarget::External
        );
        assert_eq!(resolve_ref("https://example.com/spec", &doc), RefTarget::External);
    }

    #[test]
    fn test_is_array_schema_direct_and_via_ref() {
        let doc = sample_doc();
        assert!(is_array_schema(&doc["components"]["schemas"]["Tags"], &doc));
        assert!(is_array_schema(&doc["components"]["schemas"]["TagsAlias"], &doc));
        assert!(!is_array_schema(&doc["components"]["schemas"]["User"], &doc));
    }

    #[test]
    fn test_is_array_schema_terminates_on_reference_cycle() {
        let doc = sample_doc();
        assert!(!is_array_schema(&doc["components"]["schemas"]["Loop"], &doc));
    }

    #[test]
    fn test_is_array_schema_non_mapping_is_false() {
        let doc = sample_doc();
        assert!(!is_array_schema(&Value::String("array".to_string()), &doc));
    }
}
