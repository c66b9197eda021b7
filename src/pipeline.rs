//! The ordered transformation pipeline.
//!
//! Order is significant and fixed: nullability reconciliation judges
//! nullability on constructs the null-union pass has (or has not yet)
//! simplified, and required-array pruning must run after both to sweep up
//! entries they made dangling. The orchestrator itself does no tree
//! inspection — it is pure sequencing plus optional progress reporting.

use serde_yaml::Value;

use crate::transformers::{
    clean_required_arrays, convert_const_to_enum, convert_float_to_number, fix_byte_format,
    inline_multipart_array_refs, promote_misplaced_schemas, reconcile_nullable,
    remove_null_unions, wrap_header_schemas,
};

pub type TransformFn = fn(Value) -> Value;

/// One pipeline stage: a human-readable label and the pass it runs.
#[derive(Clone, Copy)]
pub struct Stage {
    pub label: &'static str,
    run: TransformFn,
}

pub struct TransformPipeline {
    stages: Vec<Stage>,
}

impl TransformPipeline {
    /// The standard stage order.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Stage {
                    label: "op1: remove null from anyOf/oneOf",
                    run: remove_null_unions,
                },
                Stage {
                    label: "op2: convert const to enum",
                    run: convert_const_to_enum,
                },
                Stage {
                    label: "op3: convert type float to number",
                    run: convert_float_to_number,
                },
                Stage {
                    label: "op4: reconcile nullable with required",
                    run: reconcile_nullable,
                },
                Stage {
                    label: "op5: convert format byte to contentEncoding",
                    run: fix_byte_format,
                },
                Stage {
                    label: "op6: clean required arrays",
                    run: clean_required_arrays,
                },
                Stage {
                    label: "op7: inline multipart array refs",
                    run: inline_multipart_array_refs,
                },
                Stage {
                    label: "op8: wrap bare header schemas",
                    run: wrap_header_schemas,
                },
                Stage {
                    label: "op9: promote misplaced header schemas",
                    run: promote_misplaced_schemas,
                },
            ],
        }
    }

    pub fn stage_labels(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.label).collect()
    }

    /// Run every stage in order, threading the tree through.
    pub fn transform(&self, spec: Value) -> Value {
        self.transform_with_progress(spec, |_| {})
    }

    /// Like [`transform`](Self::transform), reporting each stage label to the
    /// observer before the stage runs. Purely presentational.
    pub fn transform_with_progress<F>(&self, mut spec: Value, mut progress: F) -> Value
    where
        F: FnMut(&str),
    {
        for stage in &self.stages {
            progress(stage.label);
            spec = (stage.run)(spec);
        }
        spec
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
