pub mod canonical;
pub mod field_path;
pub mod fingerprint;
pub mod issues;

pub use canonical::{canonical_json_bytes, canonical_key, canonical_value, CanonicalKey};
pub use field_path::{FieldPath, FieldPathParseError, FieldPathSegment};
pub use fingerprint::fingerprint_hex;
pub use issues::{render_template, IssueCategory, IssueKind, StructuredIssue};
