use serde::{Deserialize, Serialize};
use crate::core::catalog::LoadState;
use crate::query::cache::CacheStats;
use crate::search::cursor::PageState;

/// Catalog statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub state: LoadState,

    // Load
    pub total_records: usize,
    pub skipped_lines: usize,
    pub load_took_ms: u64,

    // Current view
    pub matched_records: usize,
    pub displayed_records: usize,
    pub page_state: PageState,
    pub view_took_ms: u64,
    pub view_recomputations: u64,

    pub cache_stats: Option<CacheStats>,
}

