use std::collections::BTreeSet;
use regex::{Regex, RegexBuilder};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::Record;
use crate::query::filter::{FilterSpec, NumericRange, TransmissionKind};

/// Record matcher - evaluates one record against a FilterSpec
#[derive(Debug, Clone)]
pub struct RecordMatcher {
    auto_pattern: Regex,
    manual_pattern: Regex,
}

impl RecordMatcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(RecordMatcher {
            auto_pattern: case_insensitive(&config.auto_transmission_pattern)?,
            manual_pattern: case_insensitive(&config.manual_transmission_pattern)?,
        })
    }

    /// Check if record passes every constraint of the filter
    pub fn matches(&self, record: &Record, spec: &FilterSpec) -> bool {
        self.matches_category(record, spec)
            && self.matches_ranges(record, spec)
            && self.matches_sets(record, spec)
            && self.matches_transmission(record, spec)
    }

    fn matches_category(&self, record: &Record, spec: &FilterSpec) -> bool {
        match spec.category.required() {
            Some(category) => record.category == category,
            None => true,
        }
    }

    fn matches_ranges(&self, record: &Record, spec: &FilterSpec) -> bool {
        in_range(&spec.price, record.price as f64)
            && in_range(&spec.year, record.year as f64)
            && in_range(&spec.odometer, record.odometer as f64)
            && in_range(&spec.engine_capacity, record.engine_capacity)
    }

    fn matches_sets(&self, record: &Record, spec: &FilterSpec) -> bool {
        is_member(&spec.locations, &record.location)
            && is_member(&spec.body_types, &record.body_type)
            && is_member(&spec.brands, &record.brand)
            && is_member(&spec.models, &record.model)
            && is_member(&spec.fuel_types, &record.fuel_type)
    }

    fn matches_transmission(&self, record: &Record, spec: &FilterSpec) -> bool {
        match spec.transmission.required() {
            Some(TransmissionKind::Auto) => self.auto_pattern.is_match(&record.transmission),
            Some(TransmissionKind::Manual) => self.manual_pattern.is_match(&record.transmission),
            None => true,
        }
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

fn in_range(range: &NumericRange, value: f64) -> bool {
    range.is_unbounded() || range.contains(value)
}

// Empty selection = unconstrained; unknown ("") values are not wildcards
fn is_member(selected: &BTreeSet<String>, value: &str) -> bool {
    selected.is_empty() || selected.contains(value)
}
