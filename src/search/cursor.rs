use std::ops::Range;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageState {
    Empty,      // No results at all
    Partial,    // More records to materialize
    Complete,   // Everything materialized
}

/// Incremental materialization over a filtered+sorted sequence
#[derive(Debug, Clone)]
pub struct PageCursor {
    pub display_count: usize,
    pub page_size: usize,
    pub len: usize,
}

impl PageCursor {
    pub fn new(len: usize, page_size: usize) -> Self {
        PageCursor {
            display_count: 0,
            page_size: page_size.max(1),
            len,
        }
    }

    /// Rewind over a new sequence length
    pub fn reset(&mut self, len: usize) {
        self.display_count = 0;
        self.len = len;
    }

    /// Next page as a range of sequence positions; empty at the end
    pub fn advance(&mut self) -> Range<usize> {
        let start = self.display_count;
        let end = (start + self.page_size).min(self.len);
        self.display_count = end;
        start..end
    }

    pub fn has_more(&self) -> bool {
        self.display_count < self.len
    }

    pub fn state(&self) -> PageState {
        if self.len == 0 {
            PageState::Empty
        } else if self.has_more() {
            PageState::Partial
        } else {
            PageState::Complete
        }
    }

    pub fn remaining(&self) -> usize {
        self.len - self.display_count
    }
}
