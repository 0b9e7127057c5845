use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::CatalogStats;
use crate::core::types::Record;
use crate::index::facet::{FacetIndex, FacetSnapshot};
use crate::ingest::loader::{LoadReport, NdjsonLoader};
use crate::query::cache::{ViewCache, ViewKey};
use crate::query::filter::{FilterPatch, FilterSpec};
use crate::query::matcher::RecordMatcher;
use crate::query::types::{SortField, SortKey, SortOrder};
use crate::search::cursor::PageState;
use crate::search::results::ViewState;
use crate::search::sorter::sort_records;

/// One-shot load lifecycle; nothing but `load` is valid before `Ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    NotLoaded,
    Loaded,     // Records parsed, facets and view not built yet
    Ready,
}

/// The browsing engine owned by the presentation layer. Holds the
/// immutable record set and the current filter, sort and page state.
pub struct Catalog {
    config: Config,
    matcher: RecordMatcher,
    state: LoadState,

    records: Arc<Vec<Arc<Record>>>,     // Fixed after load, in load order
    facets: FacetIndex,
    load_report: Option<LoadReport>,

    filter: FilterSpec,
    sort: Option<SortKey>,
    view: ViewState,
    cache: Option<ViewCache>,

    view_recomputations: u64,
}

impl Catalog {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let matcher = RecordMatcher::new(&config)?;
        let cache = ViewCache::new(config.view_cache_size);
        let view = ViewState::empty(config.page_size);

        Ok(Catalog {
            matcher,
            state: LoadState::NotLoaded,
            records: Arc::new(Vec::new()),
            facets: FacetIndex::default(),
            load_report: None,
            filter: FilterSpec::default(),
            sort: None,
            view,
            cache,
            view_recomputations: 0,
            config,
        })
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // 1. Parse every line, skipping malformed ones       (NotLoaded → Loaded)
    // 2. Build the facet index over the final record set
    // 3. Compute the initial view with an empty filter    (Loaded → Ready)
    pub fn load(&mut self, raw: &str) -> Result<LoadReport> {
        if self.state != LoadState::NotLoaded {
            return Err(Error::new(
                ErrorKind::InvalidState,
                "catalog is already loaded; records are immutable after load".to_string(),
            ));
        }

        let (records, report) = NdjsonLoader::new(&self.config).load_str(raw);
        self.records = Arc::new(records);
        self.state = LoadState::Loaded;

        self.facets = FacetIndex::build(&self.records, &self.config.sentinel);
        debug!(
            brands = self.facets.brands.len(),
            locations = self.facets.locations.len(),
            "facet index built"
        );

        self.state = LoadState::Ready;
        self.refresh_view();
        info!(records = self.records.len(), skipped = report.skipped_lines, "catalog ready");

        self.load_report = Some(report.clone());
        Ok(report)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<LoadReport> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::Io,
                format!("failed to read catalog '{}': {}", path.display(), e),
            )
        })?;
        self.load(&text)
    }

    pub fn load_report(&self) -> Option<&LoadReport> {
        self.load_report.as_ref()
    }

    /// The full record set in load order
    pub fn records(&self) -> Result<&[Arc<Record>]> {
        self.ensure_ready("records")?;
        Ok(&self.records)
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort
    }

    /// Replace the whole selection
    pub fn set_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.ensure_ready("set_filter")?;
        let brands_changed = spec.brands != self.filter.brands;
        self.filter = spec;
        if brands_changed {
            self.reconcile_models();
        }
        self.refresh_view();
        Ok(())
    }

    /// Merge a partial selection into the current one
    pub fn update_filter(&mut self, patch: FilterPatch) -> Result<()> {
        self.ensure_ready("update_filter")?;
        let brands_changed = patch.changes_brands(&self.filter);
        patch.apply_to(&mut self.filter);
        if brands_changed {
            self.reconcile_models();
        }
        self.refresh_view();
        Ok(())
    }

    pub fn clear_filter(&mut self) -> Result<()> {
        self.set_filter(FilterSpec::default())
    }

    pub fn set_sort(&mut self, field: SortField, order: SortOrder) -> Result<()> {
        self.ensure_ready("set_sort")?;
        let key = SortKey::new(field, order);
        debug!(field = %field, order = ?order, "sort changed");
        self.sort = Some(key);
        self.refresh_view();
        Ok(())
    }

    pub fn set_sort_by_name(&mut self, field: &str, order: SortOrder) -> Result<()> {
        self.ensure_ready("set_sort")?;
        let field: SortField = field.parse()?;
        self.set_sort(field, order)
    }

    /// Column-header behaviour: the active field flips direction, any other
    /// field starts ascending
    pub fn toggle_sort(&mut self, field: SortField) -> Result<SortKey> {
        self.ensure_ready("toggle_sort")?;
        let order = match self.sort {
            Some(current) if current.field == field => current.order.flipped(),
            _ => SortOrder::Asc,
        };
        self.set_sort(field, order)?;
        Ok(SortKey::new(field, order))
    }

    /// Back to load order
    pub fn clear_sort(&mut self) -> Result<()> {
        self.ensure_ready("clear_sort")?;
        self.sort = None;
        self.refresh_view();
        Ok(())
    }

    /// Materialize the next page; empty once everything is shown
    pub fn advance_page(&mut self) -> Result<Vec<Arc<Record>>> {
        self.ensure_ready("advance_page")?;
        if !self.view.has_more() {
            return Ok(Vec::new());
        }
        Ok(self.view.advance())
    }

    /// Every record materialized since the last filter or sort change
    pub fn current_view(&self) -> Result<&[Arc<Record>]> {
        self.ensure_ready("current_view")?;
        Ok(self.view.materialized())
    }

    pub fn has_more(&self) -> Result<bool> {
        self.ensure_ready("has_more")?;
        Ok(self.view.has_more())
    }

    /// True when nothing matches the current filter
    pub fn is_empty(&self) -> Result<bool> {
        self.ensure_ready("is_empty")?;
        Ok(self.view.state() == PageState::Empty)
    }

    pub fn page_state(&self) -> Result<PageState> {
        self.ensure_ready("page_state")?;
        Ok(self.view.state())
    }

    pub fn matched_count(&self) -> Result<usize> {
        self.ensure_ready("matched_count")?;
        Ok(self.view.total_hits())
    }

    /// Model options under the current brand selection
    pub fn legal_models(&self) -> Result<Vec<String>> {
        self.ensure_ready("legal_models")?;
        Ok(self.facets.legal_models(&self.filter.brands))
    }

    pub fn facets(&self) -> Result<FacetSnapshot> {
        self.ensure_ready("facets")?;
        Ok(self.facets.snapshot(&self.filter.brands))
    }

    pub fn stats(&self) -> CatalogStats {
        let (skipped_lines, load_took_ms) = self
            .load_report
            .as_ref()
            .map(|r| (r.skipped_lines, r.took_ms))
            .unwrap_or((0, 0));

        CatalogStats {
            state: self.state,
            total_records: self.records.len(),
            skipped_lines,
            load_took_ms,
            matched_records: self.view.total_hits(),
            displayed_records: self.view.cursor.display_count,
            page_state: self.view.state(),
            view_took_ms: self.view.took_ms,
            view_recomputations: self.view_recomputations,
            cache_stats: self.cache.as_ref().map(ViewCache::stats),
        }
    }

    fn ensure_ready(&self, operation: &str) -> Result<()> {
        if self.state == LoadState::Ready {
            Ok(())
        } else {
            Err(Error::not_ready(operation))
        }
    }

    fn reconcile_models(&mut self) {
        let dropped = self.facets.reconcile(&mut self.filter);
        if !dropped.is_empty() {
            debug!(dropped = ?dropped, "dropped models no longer legal for the selected brands");
        }
    }

    /// Refilter and resort the full set, then rewind the cursor
    fn refresh_view(&mut self) {
        let start = Instant::now();

        let key = self
            .cache
            .as_ref()
            .map(|_| ViewKey::new(&self.filter, self.sort));
        let cached = match (self.cache.as_mut(), key.as_ref()) {
            (Some(cache), Some(key)) => cache.get(key),
            _ => None,
        };

        let hits = match cached {
            Some(hits) => {
                debug!(matched = hits.len(), "view served from cache");
                hits
            }
            None => {
                let mut hits: Vec<Arc<Record>> = self
                    .records
                    .iter()
                    .filter(|record| self.matcher.matches(record, &self.filter))
                    .cloned()
                    .collect();
                if let Some(sort) = &self.sort {
                    sort_records(&mut hits, sort);
                }
                let hits = Arc::new(hits);
                if let (Some(cache), Some(key)) = (self.cache.as_mut(), key) {
                    cache.put(key, hits.clone());
                }
                hits
            }
        };

        let took_ms = start.elapsed().as_millis() as u64;
        self.view = ViewState::new(hits, self.config.page_size, took_ms);
        self.view_recomputations += 1;
        if self.config.eager_first_page {
            self.view.advance();
        }

        debug!(
            matched = self.view.total_hits(),
            total = self.records.len(),
            took_ms,
            "view recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::filter::NumericRange;

    const CARS: &str = concat!(
        "{\"make\":\"Toyota\",\"model\":\"Corolla\",\"year\":2020,\"price\":10000,\"Transmission\":\"Automatic\"}\n",
        "{\"make\":\"Mercedes\",\"model\":\"Benz\",\"year\":2019,\"price\":30000,\"Transmission\":\"Manual\"}\n",
        "{\"make\":\"Mercedes\",\"model\":\"C200\",\"year\":2015,\"price\":18000}\n",
        "{\"make\":\"Toyota\",\"model\":\"Camry\",\"year\":2012,\"price\":7000}\n",
    );

    fn loaded(page_size: usize) -> Catalog {
        let mut catalog = Catalog::new(Config::default().with_page_size(page_size)).unwrap();
        catalog.load(CARS).unwrap();
        catalog
    }

    fn prices(records: &[Arc<Record>]) -> Vec<u64> {
        records.iter().map(|r| r.price).collect()
    }

    #[test]
    fn operations_before_load_are_not_ready() {
        let mut catalog = Catalog::new(Config::default()).unwrap();
        assert_eq!(catalog.state(), LoadState::NotLoaded);
        assert!(catalog.advance_page().unwrap_err().is_not_ready());
        assert!(catalog.set_filter(FilterSpec::new()).unwrap_err().is_not_ready());
        assert!(catalog.set_sort(SortField::Price, SortOrder::Asc).unwrap_err().is_not_ready());
        assert!(catalog.has_more().unwrap_err().is_not_ready());
        assert!(catalog.current_view().unwrap_err().is_not_ready());
    }

    #[test]
    fn second_load_is_rejected() {
        let mut catalog = loaded(10);
        let err = catalog.load(CARS).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
        assert_eq!(catalog.records().unwrap().len(), 4);
    }

    #[test]
    fn load_resets_cursor_without_materializing() {
        let catalog = loaded(10);
        assert!(catalog.is_ready());
        assert!(catalog.current_view().unwrap().is_empty());
        assert!(catalog.has_more().unwrap());
        assert_eq!(catalog.matched_count().unwrap(), 4);
    }

    #[test]
    fn changing_brands_drops_stale_models() {
        let mut catalog = loaded(10);
        catalog
            .set_filter(FilterSpec::new().with_brands(["Toyota"]).with_models(["Corolla"]))
            .unwrap();
        assert_eq!(catalog.matched_count().unwrap(), 1);

        let patch = FilterPatch {
            brands: Some(["Mercedes".to_string()].into_iter().collect()),
            ..FilterPatch::default()
        };
        catalog.update_filter(patch).unwrap();

        assert!(catalog.filter().models.is_empty());
        assert_eq!(catalog.legal_models().unwrap(), ["C200"]);
        assert_eq!(prices(&catalog.advance_page().unwrap()), [18000]);
    }

    #[test]
    fn toggle_sort_flips_same_field() {
        let mut catalog = loaded(10);
        assert_eq!(catalog.toggle_sort(SortField::Price).unwrap(), SortKey::asc(SortField::Price));
        assert_eq!(prices(&catalog.advance_page().unwrap()), [7000, 10000, 18000, 30000]);

        assert_eq!(catalog.toggle_sort(SortField::Price).unwrap(), SortKey::desc(SortField::Price));
        assert!(catalog.current_view().unwrap().is_empty());
        assert_eq!(prices(&catalog.advance_page().unwrap()), [30000, 18000, 10000, 7000]);

        assert_eq!(catalog.toggle_sort(SortField::Year).unwrap(), SortKey::asc(SortField::Year));
        catalog.clear_sort().unwrap();
        assert_eq!(prices(&catalog.advance_page().unwrap()), [10000, 30000, 18000, 7000]);
    }

    #[test]
    fn unknown_sort_name_is_invalid_argument() {
        let mut catalog = loaded(10);
        let err = catalog.set_sort_by_name("mileage", SortOrder::Asc).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        catalog.set_sort_by_name("body", SortOrder::Desc).unwrap();
        assert_eq!(catalog.sort_key(), Some(SortKey::desc(SortField::BodyType)));
    }

    #[test]
    fn empty_result_is_distinct_state() {
        let mut catalog = loaded(10);
        catalog.set_filter(FilterSpec::new().with_brands(["Holden"])).unwrap();
        assert!(catalog.is_empty().unwrap());
        assert_eq!(catalog.page_state().unwrap(), PageState::Empty);
        assert!(!catalog.has_more().unwrap());
        assert!(catalog.advance_page().unwrap().is_empty());
    }

    #[test]
    fn repeated_views_hit_the_cache() {
        let mut catalog = loaded(10);
        let toyota = FilterSpec::new().with_brands(["Toyota"]);
        catalog.set_filter(toyota.clone()).unwrap();
        catalog.clear_filter().unwrap();
        catalog.set_filter(toyota).unwrap();

        let stats = catalog.stats();
        let cache = stats.cache_stats.unwrap();
        assert_eq!(cache.hit_count, 2);
        assert_eq!(stats.matched_records, 2);
        assert_eq!(stats.view_recomputations, 4);
    }

    #[test]
    fn clearing_brands_keeps_selected_models() {
        let mut catalog = loaded(10);
        catalog
            .set_filter(FilterSpec::new().with_brands(["Toyota"]).with_models(["Corolla"]))
            .unwrap();

        let patch = FilterPatch {
            brands: Some(Default::default()),
            ..FilterPatch::default()
        };
        catalog.update_filter(patch).unwrap();

        assert_eq!(catalog.legal_models().unwrap(), ["C200", "Camry", "Corolla"]);
        assert!(catalog.filter().models.contains("Corolla"));
        assert_eq!(prices(&catalog.advance_page().unwrap()), [10000]);
    }

    #[test]
    fn cached_views_match_uncached_views() {
        let build = |view_cache_size| {
            let config = Config {
                view_cache_size,
                ..Config::default()
            };
            let mut catalog = Catalog::new(config).unwrap();
            catalog.load(CARS).unwrap();
            catalog
        };
        let mut uncached = build(0);
        let mut cached = build(32);

        let filters = [
            FilterSpec::new(),
            FilterSpec::new().with_price(NumericRange::at_most(f64::NEG_INFINITY)),
            FilterSpec::new().with_price(NumericRange::at_least(f64::INFINITY)),
            FilterSpec::new().with_price(NumericRange::at_most(f64::INFINITY)),
            FilterSpec::new().with_year(NumericRange::between(2015.0, 2019.0)),
            FilterSpec::new(),
        ];
        for spec in filters {
            uncached.set_filter(spec.clone()).unwrap();
            cached.set_filter(spec.clone()).unwrap();
            assert_eq!(
                prices(&uncached.advance_page().unwrap()),
                prices(&cached.advance_page().unwrap()),
                "filter {:?}",
                spec
            );
        }
        assert_eq!(cached.matched_count().unwrap(), 4);
        assert!(cached.stats().cache_stats.unwrap().hit_count > 0);
    }

    #[test]
    fn eager_first_page_materializes_on_reset() {
        let config = Config {
            page_size: 3,
            eager_first_page: true,
            view_cache_size: 0,
            ..Config::default()
        };
        let mut catalog = Catalog::new(config).unwrap();
        catalog.load(CARS).unwrap();
        assert_eq!(catalog.current_view().unwrap().len(), 3);

        catalog.set_sort(SortField::Year, SortOrder::Desc).unwrap();
        assert_eq!(catalog.current_view().unwrap().len(), 3);
        assert_eq!(catalog.advance_page().unwrap().len(), 1);
        assert!(catalog.stats().cache_stats.is_none());
    }

    #[test]
    fn load_file_reads_ndjson() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sold_cars.json");
        std::fs::write(&path, CARS).unwrap();

        let mut catalog = Catalog::new(Config::default()).unwrap();
        let report = catalog.load_file(&path).unwrap();
        assert_eq!(report.loaded, 4);
        assert!(catalog.load_report().unwrap().is_clean());
    }
}
