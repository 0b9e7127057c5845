use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Vehicle,
    Motorcycle,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::Vehicle => write!(f, "Vehicle"),
            Category::Motorcycle => write!(f, "Motorcycle"),
        }
    }
}

/// A field read off a record for comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

/// One normalized vehicle listing. Immutable once built by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub brand: String,
    pub make: String,
    pub model: String,
    pub variant: String,
    pub body_type: String,
    pub location: String,
    pub fuel_type: String,
    pub transmission: String,   // Lowercased
    pub year: u32,              // 0 = unknown
    pub odometer: u64,
    pub engine_capacity: f64,   // 0 = unknown
    pub price: u64,
    pub bids: u32,
    pub date: String,
    pub category: Category,
    pub url: String,
}
