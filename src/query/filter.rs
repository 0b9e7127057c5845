use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use crate::core::types::Category;

/// Closed interval; a missing bound is unbounded on that side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        NumericRange { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        NumericRange::new(Some(min), Some(max))
    }

    pub fn at_least(min: f64) -> Self {
        NumericRange::new(Some(min), None)
    }

    pub fn at_most(max: f64) -> Self {
        NumericRange::new(None, Some(max))
    }

    /// Build from free-text form inputs: blank or non-numeric means unbounded
    pub fn parse(min: &str, max: &str) -> Self {
        NumericRange::new(parse_bound(min), parse_bound(max))
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

fn parse_bound(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Vehicle / motorcycle checkboxes. Both or neither checked: no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryToggle {
    pub vehicle: bool,
    pub motorcycle: bool,
}

impl CategoryToggle {
    /// The single category required, if exactly one box is checked
    pub fn required(&self) -> Option<Category> {
        match (self.vehicle, self.motorcycle) {
            (true, false) => Some(Category::Vehicle),
            (false, true) => Some(Category::Motorcycle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionKind {
    Auto,
    Manual,
}

/// Automatic / manual checkboxes, same both-or-neither rule as categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransmissionToggle {
    pub auto: bool,
    pub manual: bool,
}

impl TransmissionToggle {
    pub fn required(&self) -> Option<TransmissionKind> {
        match (self.auto, self.manual) {
            (true, false) => Some(TransmissionKind::Auto),
            (false, true) => Some(TransmissionKind::Manual),
            _ => None,
        }
    }
}

/// The current user selection. Empty sets and unbounded ranges are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    pub brands: BTreeSet<String>,   // The make facet, matched against Record::brand
    pub models: BTreeSet<String>,
    pub body_types: BTreeSet<String>,
    pub fuel_types: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub year: NumericRange,
    pub odometer: NumericRange,
    pub engine_capacity: NumericRange,
    pub price: NumericRange,
    pub category: CategoryToggle,
    pub transmission: TransmissionToggle,
}

impl FilterSpec {
    pub fn new() -> Self {
        FilterSpec::default()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
            && self.models.is_empty()
            && self.body_types.is_empty()
            && self.fuel_types.is_empty()
            && self.locations.is_empty()
            && self.year.is_unbounded()
            && self.odometer.is_unbounded()
            && self.engine_capacity.is_unbounded()
            && self.price.is_unbounded()
            && self.category.required().is_none()
            && self.transmission.required().is_none()
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price(mut self, range: NumericRange) -> Self {
        self.price = range;
        self
    }

    pub fn with_year(mut self, range: NumericRange) -> Self {
        self.year = range;
        self
    }
}

/// Partial update from the presentation layer. Present fields replace the
/// current value; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterPatch {
    pub brands: Option<BTreeSet<String>>,
    pub models: Option<BTreeSet<String>>,
    pub body_types: Option<BTreeSet<String>>,
    pub fuel_types: Option<BTreeSet<String>>,
    pub locations: Option<BTreeSet<String>>,
    pub year: Option<NumericRange>,
    pub odometer: Option<NumericRange>,
    pub engine_capacity: Option<NumericRange>,
    pub price: Option<NumericRange>,
    pub category: Option<CategoryToggle>,
    pub transmission: Option<TransmissionToggle>,
}

impl FilterPatch {
    /// True when applying the patch would change the brand selection
    pub fn changes_brands(&self, spec: &FilterSpec) -> bool {
        self.brands.as_ref().is_some_and(|brands| *brands != spec.brands)
    }

    pub fn apply_to(self, spec: &mut FilterSpec) {
        if let Some(brands) = self.brands {
            spec.brands = brands;
        }
        if let Some(models) = self.models {
            spec.models = models;
        }
        if let Some(body_types) = self.body_types {
            spec.body_types = body_types;
        }
        if let Some(fuel_types) = self.fuel_types {
            spec.fuel_types = fuel_types;
        }
        if let Some(locations) = self.locations {
            spec.locations = locations;
        }
        if let Some(year) = self.year {
            spec.year = year;
        }
        if let Some(odometer) = self.odometer {
            spec.odometer = odometer;
        }
        if let Some(engine_capacity) = self.engine_capacity {
            spec.engine_capacity = engine_capacity;
        }
        if let Some(price) = self.price {
            spec.price = price;
        }
        if let Some(category) = self.category {
            spec.category = category;
        }
        if let Some(transmission) = self.transmission {
            spec.transmission = transmission;
        }
    }
}
