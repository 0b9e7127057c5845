use serde::Deserialize;
use serde_json::Value;
use crate::core::config::{CompoundBrand, Config};
use crate::core::types::{Category, Record};

const DEFAULT_URL: &str = "#";

/// Loosely-typed input row as found in the sold-cars dump. Columns with a
/// spaced dump name also accept the camelCase spelling; when a row carries
/// both, the dump spelling wins.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    pub make: Option<Value>,
    pub model: Option<Value>,
    pub variant: Option<Value>,
    #[serde(rename = "Body Type")]
    pub body_type: Option<Value>,
    #[serde(rename = "Location")]
    pub location: Option<Value>,
    pub year: Option<Value>,
    #[serde(rename = "Indicated Odometer Reading")]
    pub odometer: Option<Value>,
    pub date: Option<Value>,
    pub bids: Option<Value>,
    #[serde(rename = "Engine Capacity")]
    pub engine_capacity: Option<Value>,
    #[serde(rename = "Fuel Type")]
    pub fuel_type: Option<Value>,
    #[serde(rename = "Transmission")]
    pub transmission: Option<Value>,
    pub price: Option<Value>,
    pub url: Option<Value>,

    #[serde(rename = "bodyType")]
    body_type_camel: Option<Value>,
    #[serde(rename = "location")]
    location_camel: Option<Value>,
    #[serde(rename = "odometer")]
    odometer_camel: Option<Value>,
    #[serde(rename = "engineCapacity")]
    engine_capacity_camel: Option<Value>,
    #[serde(rename = "fuelType")]
    fuel_type_camel: Option<Value>,
    #[serde(rename = "transmission")]
    transmission_camel: Option<Value>,
}

impl RawRecord {
    fn body_type(&self) -> Option<&Value> {
        either(&self.body_type, &self.body_type_camel)
    }

    fn location(&self) -> Option<&Value> {
        either(&self.location, &self.location_camel)
    }

    fn odometer(&self) -> Option<&Value> {
        either(&self.odometer, &self.odometer_camel)
    }

    fn engine_capacity(&self) -> Option<&Value> {
        either(&self.engine_capacity, &self.engine_capacity_camel)
    }

    fn fuel_type(&self) -> Option<&Value> {
        either(&self.fuel_type, &self.fuel_type_camel)
    }

    fn transmission(&self) -> Option<&Value> {
        either(&self.transmission, &self.transmission_camel)
    }
}

fn either<'a>(dump: &'a Option<Value>, camel: &'a Option<Value>) -> Option<&'a Value> {
    match dump {
        None | Some(Value::Null) => camel.as_ref(),
        Some(value) => Some(value),
    }
}

/// Maps raw rows onto canonical records. Never fails: unknown or
/// unparseable values collapse to "" or 0.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    sentinel: String,
    compound_brands: Vec<CompoundBrand>,
}

impl RecordNormalizer {
    pub fn new(config: &Config) -> Self {
        RecordNormalizer {
            sentinel: config.sentinel.clone(),
            compound_brands: config.compound_brands.clone(),
        }
    }

    pub fn normalize(&self, raw: &RawRecord) -> Record {
        let make = self.text(raw.make.as_ref());
        let model = self.text(raw.model.as_ref());
        let variant = self.text(raw.variant.as_ref());

        let brand = if self.is_compound(&make, &model) {
            format!("{} {}", make, model)
        } else {
            make.clone()
        };

        let category = if variant.to_lowercase().contains("motorcycle") {
            Category::Motorcycle
        } else {
            Category::Vehicle
        };

        let url = match raw.url.as_ref() {
            None | Some(Value::Null) => DEFAULT_URL.to_string(),
            Some(value) => self.text(Some(value)),
        };

        Record {
            brand,
            make,
            model,
            variant,
            body_type: self.text(raw.body_type()),
            location: self.text(raw.location()),
            fuel_type: self.text(raw.fuel_type()),
            transmission: self.text(raw.transmission()).to_lowercase(),
            year: clamp_u32(self.integer(raw.year.as_ref())),
            odometer: self.integer(raw.odometer()),
            engine_capacity: self.float(raw.engine_capacity()),
            price: self.integer(raw.price.as_ref()),
            bids: clamp_u32(self.integer(raw.bids.as_ref())),
            date: self.text(raw.date.as_ref()),
            category,
            url,
        }
    }

    fn is_compound(&self, make: &str, model: &str) -> bool {
        self.compound_brands
            .iter()
            .any(|pair| pair.make == make && pair.model == model)
    }

    fn text(&self, value: Option<&Value>) -> String {
        match value {
            Some(Value::String(s)) if *s == self.sentinel => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    fn integer(&self, value: Option<&Value>) -> u64 {
        match value {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_u64() {
                    v
                } else {
                    // Negative or fractional: truncate, floor at zero
                    n.as_f64()
                        .filter(|f| f.is_finite() && *f > 0.0)
                        .map(|f| f.trunc() as u64)
                        .unwrap_or(0)
                }
            }
            Some(Value::String(s)) if *s == self.sentinel => 0,
            Some(Value::String(s)) => parse_leading_integer(s),
            _ => 0,
        }
    }

    fn float(&self, value: Option<&Value>) -> f64 {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) if *s == self.sentinel => 0.0,
            Some(Value::String(s)) => parse_leading_float(s),
            _ => 0.0,
        };
        if parsed.is_finite() && parsed > 0.0 { parsed } else { 0.0 }
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Strip thousands separators, then read the leading run of digits.
/// "12,345" → 12345, "12 345 km" → 12345, "n/a" → 0.
pub fn parse_leading_integer(input: &str) -> u64 {
    let digits: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' ' | '\u{a0}' | '\u{202f}'))
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return 0;
    }
    // Overflow saturates rather than collapsing to zero
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Read the leading decimal prefix of a string: "2.5L" → 2.5, "?" → 0.
pub fn parse_leading_float(input: &str) -> f64 {
    let trimmed = input.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in trimmed.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }
    trimmed[..end].parse::<f64>().unwrap_or(0.0)
}
