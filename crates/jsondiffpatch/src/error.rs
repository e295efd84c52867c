//! Error type shared by patch and unpatch.

use jsondiffpatch_text::TextPatchError;
use thiserror::Error;

/// Failure while applying or reversing a delta.
///
/// Diffing never fails; every error comes from executing a malformed delta or
/// executing a delta against a base of the wrong shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    /// The delta does not match any wire shape: wrong arity, unknown op code,
    /// bad positional key, or a member where that member kind is not allowed.
    #[error("invalid delta: {0}")]
    InvalidDelta(String),

    /// A nested delta was executed against a base of the wrong kind, e.g. a
    /// text delta against a non-string or an array delta against a non-array.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The text patch carried by a text delta could not be parsed, or its
    /// source side did not match the base string.
    #[error("malformed text patch: {0}")]
    MalformedTextPatch(String),
}

impl From<TextPatchError> for PatchError {
    fn from(err: TextPatchError) -> Self {
        PatchError::MalformedTextPatch(err.to_string())
    }
}
