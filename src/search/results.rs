use std::sync::Arc;
use crate::core::types::Record;
use crate::search::cursor::{PageCursor, PageState};

/// Filtered+sorted sequence and how much of it is materialized
#[derive(Debug, Clone)]
pub struct ViewState {
    pub hits: Arc<Vec<Arc<Record>>>,
    pub cursor: PageCursor,
    pub took_ms: u64,
}

impl ViewState {
    pub fn new(hits: Arc<Vec<Arc<Record>>>, page_size: usize, took_ms: u64) -> Self {
        let cursor = PageCursor::new(hits.len(), page_size);
        ViewState { hits, cursor, took_ms }
    }

    pub fn empty(page_size: usize) -> Self {
        ViewState::new(Arc::new(Vec::new()), page_size, 0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.len()
    }

    /// Materialize the next page and return its records
    pub fn advance(&mut self) -> Vec<Arc<Record>> {
        let range = self.cursor.advance();
        self.hits[range].to_vec()
    }

    /// The materialized prefix
    pub fn materialized(&self) -> &[Arc<Record>] {
        &self.hits[..self.cursor.display_count]
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    pub fn state(&self) -> PageState {
        self.cursor.state()
    }
}
