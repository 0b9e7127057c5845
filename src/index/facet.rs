use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::core::types::Record;
use crate::query::filter::FilterSpec;

/// Every facet's option list, for the presentation layer's checkbox groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSnapshot {
    pub brands: Vec<String>,
    pub models: Vec<String>,    // Legal under the current brand selection
    pub body_types: Vec<String>,
    pub fuel_types: Vec<String>,
    pub locations: Vec<String>,
}

/// Facet values derived once from the immutable record set
#[derive(Debug, Clone, Default)]
pub struct FacetIndex {
    pub brands: BTreeSet<String>,
    pub body_types: BTreeSet<String>,
    pub fuel_types: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub models_by_brand: BTreeMap<String, BTreeSet<String>>,
    sentinel: String,
}

impl FacetIndex {
    pub fn build(records: &[Arc<Record>], sentinel: &str) -> Self {
        let mut index = FacetIndex {
            sentinel: sentinel.to_string(),
            ..FacetIndex::default()
        };

        for record in records {
            insert_known(&mut index.locations, &record.location);
            insert_known(&mut index.body_types, &record.body_type);
            insert_known(&mut index.fuel_types, &record.fuel_type);

            if record.brand.is_empty() {
                continue;
            }
            index.brands.insert(record.brand.clone());
            let models = index.models_by_brand.entry(record.brand.clone()).or_default();
            if index_model(&record.brand, &record.model, &index.sentinel) {
                models.insert(record.model.clone());
            }
        }

        index
    }

    /// Models of the selected brands, or of every brand when none is
    /// selected; sorted and deduplicated
    pub fn legal_models(&self, selected_brands: &BTreeSet<String>) -> Vec<String> {
        let models: BTreeSet<&String> = if selected_brands.is_empty() {
            self.models_by_brand.values().flatten().collect()
        } else {
            selected_brands
                .iter()
                .filter_map(|brand| self.models_by_brand.get(brand))
                .flatten()
                .collect()
        };
        models.into_iter().cloned().collect()
    }

    /// Drop selected models no longer legal under the filter's brands.
    /// Returns what was dropped.
    pub fn reconcile(&self, spec: &mut FilterSpec) -> Vec<String> {
        if spec.models.is_empty() {
            return Vec::new();
        }
        let legal: BTreeSet<String> = self.legal_models(&spec.brands).into_iter().collect();
        let (kept, dropped): (BTreeSet<String>, BTreeSet<String>) =
            std::mem::take(&mut spec.models)
                .into_iter()
                .partition(|model| legal.contains(model));
        spec.models = kept;
        dropped.into_iter().collect()
    }

    pub fn snapshot(&self, selected_brands: &BTreeSet<String>) -> FacetSnapshot {
        FacetSnapshot {
            brands: self.brands.iter().cloned().collect(),
            models: self.legal_models(selected_brands),
            body_types: self.body_types.iter().cloned().collect(),
            fuel_types: self.fuel_types.iter().cloned().collect(),
            locations: self.locations.iter().cloned().collect(),
        }
    }
}

fn insert_known(set: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() {
        set.insert(value.to_string());
    }
}

// "Benz" under "Mercedes Benz" is the brand repeated, not a model
fn index_model(brand: &str, model: &str, sentinel: &str) -> bool {
    if model.is_empty() || model == sentinel {
        return false;
    }
    let repeats_brand = brand == model
        || brand
            .strip_suffix(model)
            .is_some_and(|head| head.ends_with(' '));
    !repeats_brand
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Category;

    fn car(brand: &str, model: &str, location: &str) -> Arc<Record> {
        Arc::new(Record {
            brand: brand.to_string(),
            make: brand.split(' ').next().unwrap_or_default().to_string(),
            model: model.to_string(),
            variant: String::new(),
            body_type: "Sedan".to_string(),
            location: location.to_string(),
            fuel_type: String::new(),
            transmission: String::new(),
            year: 0,
            odometer: 0,
            engine_capacity: 0.0,
            price: 0,
            bids: 0,
            date: String::new(),
            category: Category::Vehicle,
            url: "#".to_string(),
        })
    }

    fn catalog() -> Vec<Arc<Record>> {
        vec![
            car("Toyota", "Corolla", "Sydney"),
            car("Toyota", "Camry", ""),
            car("Mercedes Benz", "Benz", "Perth"),
            car("Mercedes", "C200", "Perth"),
            car("Mazda", "", "Hobart"),
        ]
    }

    fn brands(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn compound_brand_does_not_list_its_own_suffix() {
        let index = FacetIndex::build(&catalog(), "?");
        assert!(index.legal_models(&brands(&["Mercedes Benz"])).is_empty());
        assert_eq!(index.legal_models(&brands(&["Mercedes"])), ["C200"]);
        assert!(!index.legal_models(&BTreeSet::new()).contains(&"Benz".to_string()));
    }

    #[test]
    fn no_selection_lists_every_model_sorted() {
        let index = FacetIndex::build(&catalog(), "?");
        assert_eq!(index.legal_models(&BTreeSet::new()), ["C200", "Camry", "Corolla"]);
    }

    #[test]
    fn unknown_values_are_not_facet_options() {
        let index = FacetIndex::build(&catalog(), "?");
        let locations: Vec<_> = index.locations.iter().cloned().collect();
        assert_eq!(locations, ["Hobart", "Perth", "Sydney"]);
        assert!(index.fuel_types.is_empty());
        assert!(index.models_by_brand["Mazda"].is_empty());
    }

    #[test]
    fn suffix_must_be_word_aligned() {
        assert!(!index_model("Mercedes Benz", "Benz", "?"));
        assert!(!index_model("Tesla", "Tesla", "?"));
        assert!(index_model("Kia", "a", "?"));
        assert!(!index_model("Kia", "?", "?"));
    }

    #[test]
    fn reconcile_drops_stale_models() {
        let index = FacetIndex::build(&catalog(), "?");
        let mut spec = FilterSpec::new()
            .with_brands(["Mercedes"])
            .with_models(["Corolla", "C200"]);

        let dropped = index.reconcile(&mut spec);
        assert_eq!(dropped, ["Corolla"]);
        assert_eq!(spec.models, brands(&["C200"]));
    }

    #[test]
    fn reconcile_with_no_brands_keeps_known_models() {
        let index = FacetIndex::build(&catalog(), "?");
        let mut spec = FilterSpec::new().with_models(["Corolla", "C200", "Benz"]);

        let dropped = index.reconcile(&mut spec);
        assert_eq!(dropped, ["Benz"]);
        assert_eq!(spec.models, brands(&["C200", "Corolla"]));
    }

    #[test]
    fn snapshot_carries_all_facets() {
        let index = FacetIndex::build(&catalog(), "?");
        let snapshot = index.snapshot(&brands(&["Toyota"]));
        assert_eq!(snapshot.brands, ["Mazda", "Mercedes", "Mercedes Benz", "Toyota"]);
        assert_eq!(snapshot.models, ["Camry", "Corolla"]);
        assert_eq!(snapshot.body_types, ["Sedan"]);
    }
}
