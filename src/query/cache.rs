use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use crate::core::types::Record;
use crate::query::filter::{CategoryToggle, FilterSpec, NumericRange, TransmissionToggle};
use crate::query::types::SortKey;

/// View cache for avoiding refilter/resort when the user toggles back to a
/// selection seen before. Only valid for one immutable record set.
pub struct ViewCache {
    cache: LruCache<ViewKey, Arc<Vec<Arc<Record>>>>,
    size_limit: usize,
    hit_count: usize,
    miss_count: usize,
}

/// Range bounds by bit pattern, so infinities and NaN stay distinct from
/// a missing bound
type RangeBits = (Option<u64>, Option<u64>);

/// Exact identity of a filter + sort selection
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ViewKey {
    sets: [BTreeSet<String>; 5],
    ranges: [RangeBits; 4],
    category: CategoryToggle,
    transmission: TransmissionToggle,
    sort: Option<SortKey>,
}

impl ViewKey {
    pub fn new(filter: &FilterSpec, sort: Option<SortKey>) -> Self {
        ViewKey {
            sets: [
                filter.brands.clone(),
                filter.models.clone(),
                filter.body_types.clone(),
                filter.fuel_types.clone(),
                filter.locations.clone(),
            ],
            ranges: [
                range_bits(&filter.year),
                range_bits(&filter.odometer),
                range_bits(&filter.engine_capacity),
                range_bits(&filter.price),
            ],
            category: filter.category,
            transmission: filter.transmission,
            sort,
        }
    }
}

fn range_bits(range: &NumericRange) -> RangeBits {
    (range.min.map(f64::to_bits), range.max.map(f64::to_bits))
}

impl ViewCache {
    /// None when caching is disabled
    pub fn new(size_limit: usize) -> Option<Self> {
        let cap = NonZeroUsize::new(size_limit)?;
        Some(ViewCache {
            cache: LruCache::new(cap),
            size_limit,
            hit_count: 0,
            miss_count: 0,
        })
    }

    pub fn get(&mut self, key: &ViewKey) -> Option<Arc<Vec<Arc<Record>>>> {
        if let Some(hits) = self.cache.get(key) {
            self.hit_count += 1;
            Some(hits.clone())
        } else {
            self.miss_count += 1;
            None
        }
    }

    pub fn put(&mut self, key: ViewKey, hits: Arc<Vec<Arc<Record>>>) {
        self.cache.put(key, hits);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count,
            miss_count: self.miss_count,
            size: self.cache.len(),
            capacity: self.size_limit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}
