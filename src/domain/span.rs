//! Entity span data model

use super::label::EntityLabel;
use serde::{Deserialize, Serialize};

/// A detected entity span
///
/// `start` and `end` are half-open byte offsets into the original text
/// (`0 <= start < end <= text.len()`), always on UTF-8 character
/// boundaries. At creation time `text` equals the slice
/// `&original[start..end]`; the NER adapter validates this after
/// converting the sidecar's character offsets and drops spans that fail.
///
/// Spans are source-agnostic: regex-detected and NER-supplied spans are
/// structurally identical, and the merger treats them uniformly. The
/// classifier may reassign `label`; offsets never change after creation.
/// Spans live for a single request and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// The exact matched substring
    pub text: String,
    /// Entity category
    pub label: EntityLabel,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl EntitySpan {
    /// Create a new entity span
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no text
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two spans overlap as open intervals
    ///
    /// Touching spans (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }
}
