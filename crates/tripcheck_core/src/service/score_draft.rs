//! Locally buffered score edits.
//!
//! A draft keeps the raw text being typed and only produces a score when
//! committed; afterwards the buffer shows the normalized committed value.

use crate::model::score::{normalize_score, Score};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDraft {
    committed: Score,
    buffer: String,
}

impl ScoreDraft {
    pub fn new(committed: Score) -> Self {
        Self {
            committed,
            buffer: committed.to_string(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn committed(&self) -> Score {
        self.committed
    }

    /// Replaces the buffered text; nothing is normalized yet.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer != self.committed.to_string()
    }

    /// Normalizes the buffer, records it as committed and resets the buffer
    /// to the committed value.
    pub fn commit(&mut self) -> Score {
        let score = normalize_score(self.buffer.as_str());
        self.committed = score;
        self.buffer = score.to_string();
        score
    }

    /// Drops uncommitted edits.
    pub fn discard(&mut self) {
        self.buffer = self.committed.to_string();
    }
}
