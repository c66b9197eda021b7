//! The transformer units: one pass per generator incompatibility.
//!
//! Every pass is a pure `fn(Value) -> Value` over the owned document tree,
//! idempotent, and tolerant of malformed input — an unexpected node shape is
//! left untouched, never an error.

pub mod byte_format;
pub mod const_enum;
pub mod float_alias;
pub mod header_schema;
pub mod multipart_array_ref;
pub mod null_union;
pub mod nullable;
pub mod promote_schemas;
pub mod required_arrays;

pub use byte_format::fix_byte_format;
pub use const_enum::convert_const_to_enum;
pub use float_alias::convert_float_to_number;
pub use header_schema::wrap_header_schemas;
pub use multipart_array_ref::inline_multipart_array_refs;
pub use null_union::remove_null_unions;
pub use nullable::reconcile_nullable;
pub use promote_schemas::promote_misplaced_schemas;
pub use required_arrays::clean_required_arrays;
