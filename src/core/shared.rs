use std::sync::Arc;
use parking_lot::{RwLock, RwLockReadGuard};
use crate::core::catalog::Catalog;
use crate::core::error::Result;
use crate::core::stats::CatalogStats;
use crate::core::types::Record;
use crate::index::facet::FacetSnapshot;
use crate::ingest::loader::LoadReport;
use crate::query::filter::{FilterPatch, FilterSpec};
use crate::query::types::{SortField, SortKey, SortOrder};

/// Cloneable handle for hosts that drive one catalog from several threads.
/// Every mutation runs under the write lock from facet reconciliation
/// through the cursor reset, so readers never observe a half-applied change.
#[derive(Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        SharedCatalog {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    pub fn load(&self, raw: &str) -> Result<LoadReport> {
        self.inner.write().load(raw)
    }

    pub fn set_filter(&self, spec: FilterSpec) -> Result<()> {
        self.inner.write().set_filter(spec)
    }

    pub fn update_filter(&self, patch: FilterPatch) -> Result<()> {
        self.inner.write().update_filter(patch)
    }

    pub fn set_sort(&self, field: SortField, order: SortOrder) -> Result<()> {
        self.inner.write().set_sort(field, order)
    }

    pub fn toggle_sort(&self, field: SortField) -> Result<SortKey> {
        self.inner.write().toggle_sort(field)
    }

    pub fn advance_page(&self) -> Result<Vec<Arc<Record>>> {
        self.inner.write().advance_page()
    }

    pub fn current_view(&self) -> Result<Vec<Arc<Record>>> {
        Ok(self.inner.read().current_view()?.to_vec())
    }

    pub fn has_more(&self) -> Result<bool> {
        self.inner.read().has_more()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.inner.read().is_empty()
    }

    pub fn facets(&self) -> Result<FacetSnapshot> {
        self.inner.read().facets()
    }

    pub fn stats(&self) -> CatalogStats {
        self.inner.read().stats()
    }

    /// Hold a read lock across several queries
    pub fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read()
    }
}
