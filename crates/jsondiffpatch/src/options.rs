//! Diff configuration.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Default [`Options::min_efficient_text_diff_length`].
pub const DEFAULT_MIN_EFFICIENT_TEXT_DIFF_LENGTH: usize = 50;

/// How arrays are diffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayDiffMode {
    /// Treat unequal arrays as opaque replaced values.
    Simple,
    /// Head/tail trimming plus LCS alignment.
    #[default]
    Efficient,
}

/// How long string pairs are diffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDiffMode {
    /// Treat unequal strings as opaque replaced values.
    Simple,
    /// Emit a text delta once either side exceeds the length threshold.
    #[default]
    Efficient,
}

/// User-supplied identity function for object elements during array
/// alignment. Returning an empty string means "no identity for this value".
pub type ObjectHash = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Diff behavior knobs. Immutable once handed to a
/// [`DiffPatcher`](crate::DiffPatcher); patch and unpatch do not consult it.
#[derive(Clone)]
pub struct Options {
    pub array_diff: ArrayDiffMode,
    pub text_diff: TextDiffMode,
    /// Text deltas require either string to be strictly longer than this.
    pub min_efficient_text_diff_length: usize,
    /// Collapse delete/insert pairs of identical array elements into moves.
    pub detect_move: bool,
    /// Carry the moved value in the move delta instead of an empty slot.
    pub include_value_on_move: bool,
    pub object_hash: Option<ObjectHash>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            array_diff: ArrayDiffMode::default(),
            text_diff: TextDiffMode::default(),
            min_efficient_text_diff_length: DEFAULT_MIN_EFFICIENT_TEXT_DIFF_LENGTH,
            detect_move: false,
            include_value_on_move: false,
            object_hash: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("array_diff", &self.array_diff)
            .field("text_diff", &self.text_diff)
            .field(
                "min_efficient_text_diff_length",
                &self.min_efficient_text_diff_length,
            )
            .field("detect_move", &self.detect_move)
            .field("include_value_on_move", &self.include_value_on_move)
            .field(
                "object_hash",
                &self.object_hash.as_ref().map(|_| "Fn(&Value) -> String"),
            )
            .finish()
    }
}
