// OpenAPI document normalization for code-generator compatibility
pub mod document;
pub mod pipeline;
pub mod resolver;
pub mod spec_version;
pub mod transformers;
pub mod walker;

// Re-export core types for convenience
pub use document::{load_document, write_document, DocumentError, DocumentFormat};
pub use pipeline::{Stage, TransformPipeline};
pub use resolver::{is_array_schema, resolve_ref, RefTarget};
pub use spec_version::{document_version, SpecVersion};
pub use walker::walk;
