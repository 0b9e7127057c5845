pub mod core;
pub mod ingest;
pub mod index;
pub mod query;
pub mod search;

pub use crate::core::catalog::{Catalog, LoadState};
pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::shared::SharedCatalog;
pub use crate::core::types::{Category, Record};
pub use crate::query::filter::{FilterPatch, FilterSpec, NumericRange};
pub use crate::query::types::{SortField, SortKey, SortOrder};
pub use crate::search::cursor::PageState;

/*
┌──────────────────────────────── CARYARD DATA FLOW ─────────────────────────────────┐
│                                                                                     │
│  raw NDJSON ──► NdjsonLoader ──► RecordNormalizer ──► Vec<Arc<Record>> (immutable)  │
│                  (skips bad lines,                         │                        │
│                   LoadReport)                              ▼                        │
│                                                       FacetIndex                    │
│                                                  (brands, models_by_brand, ...)     │
│                                                            │                        │
│  set_filter / update_filter ──► reconcile models ◄─────────┘                        │
│                                     │                                               │
│                                     ▼                                               │
│                     RecordMatcher (full set) ──► sort_records (stable)              │
│                                     │                 │                             │
│                                     │   ViewCache ◄───┤ (filter json, sort key)     │
│                                     ▼                 ▼                             │
│                               ViewState { hits, PageCursor }                        │
│                                     │                                               │
│  advance_page / current_view ◄──────┘                                               │
│                                                                                     │
│  struct Catalog                         enum LoadState                              │
│  • config: Config                       • NotLoaded → Loaded → Ready                │
│  • matcher: RecordMatcher                                                           │
│  • records: Arc<Vec<Arc<Record>>>       enum PageState                              │
│  • facets: FacetIndex                   • Empty | Partial | Complete                │
│  • filter: FilterSpec                                                               │
│  • sort: Option<SortKey>                struct SharedCatalog                        │
│  • view: ViewState                      • Arc<parking_lot::RwLock<Catalog>>         │
│  • cache: Option<ViewCache>                                                         │
└─────────────────────────────────────────────────────────────────────────────────────┘
*/
