use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{Category, FieldValue, Record};

/// Sort order for catalog views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,   // Ascending: 0 → 9, A → Z
    Desc,  // Descending: 9 → 0, Z → A
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Sortable record columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Brand,
    Make,
    Model,
    Variant,
    BodyType,
    Location,
    FuelType,
    Transmission,
    Year,
    Odometer,
    EngineCapacity,
    Price,
    Bids,
    Date,
    Category,
    Url,
}

impl SortField {
    pub fn name(&self) -> &'static str {
        match self {
            SortField::Brand => "brand",
            SortField::Make => "make",
            SortField::Model => "model",
            SortField::Variant => "variant",
            SortField::BodyType => "bodyType",
            SortField::Location => "location",
            SortField::FuelType => "fuelType",
            SortField::Transmission => "transmission",
            SortField::Year => "year",
            SortField::Odometer => "odometer",
            SortField::EngineCapacity => "engineCapacity",
            SortField::Price => "price",
            SortField::Bids => "bids",
            SortField::Date => "date",
            SortField::Category => "category",
            SortField::Url => "url",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SortField::Year
                | SortField::Odometer
                | SortField::EngineCapacity
                | SortField::Price
                | SortField::Bids
        )
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SortField {
    type Err = Error;

    /// Accepts the camelCase field names plus the short table column keys
    fn from_str(s: &str) -> Result<Self> {
        let field = match s {
            "brand" => SortField::Brand,
            "make" => SortField::Make,
            "model" => SortField::Model,
            "variant" => SortField::Variant,
            "bodyType" | "body" => SortField::BodyType,
            "location" => SortField::Location,
            "fuelType" | "fuel" => SortField::FuelType,
            "transmission" => SortField::Transmission,
            "year" => SortField::Year,
            "odometer" => SortField::Odometer,
            "engineCapacity" | "engine" => SortField::EngineCapacity,
            "price" => SortField::Price,
            "bids" => SortField::Bids,
            "date" => SortField::Date,
            "category" => SortField::Category,
            "url" => SortField::Url,
            other => {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    format!("Unknown sort field '{}'", other),
                ));
            }
        };
        Ok(field)
    }
}

/// The single active sort column and its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortKey {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        SortKey { field, order }
    }

    pub fn asc(field: SortField) -> Self {
        SortKey::new(field, SortOrder::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        SortKey::new(field, SortOrder::Desc)
    }
}

impl Record {
    /// Read a column by sort field
    pub fn field(&self, field: SortField) -> FieldValue {
        match field {
            SortField::Brand => FieldValue::Text(self.brand.clone()),
            SortField::Make => FieldValue::Text(self.make.clone()),
            SortField::Model => FieldValue::Text(self.model.clone()),
            SortField::Variant => FieldValue::Text(self.variant.clone()),
            SortField::BodyType => FieldValue::Text(self.body_type.clone()),
            SortField::Location => FieldValue::Text(self.location.clone()),
            SortField::FuelType => FieldValue::Text(self.fuel_type.clone()),
            SortField::Transmission => FieldValue::Text(self.transmission.clone()),
            SortField::Year => FieldValue::Number(self.year as f64),
            SortField::Odometer => FieldValue::Number(self.odometer as f64),
            SortField::EngineCapacity => FieldValue::Number(self.engine_capacity),
            SortField::Price => FieldValue::Number(self.price as f64),
            SortField::Bids => FieldValue::Number(self.bids as f64),
            SortField::Date => FieldValue::Text(self.date.clone()),
            SortField::Category => FieldValue::Text(self.category.to_string()),
            SortField::Url => FieldValue::Text(self.url.clone()),
        }
    }

    /// Borrowing variant of [`Record::field`] for text columns
    pub fn text_field(&self, field: SortField) -> Option<&str> {
        match field {
            SortField::Brand => Some(&self.brand),
            SortField::Make => Some(&self.make),
            SortField::Model => Some(&self.model),
            SortField::Variant => Some(&self.variant),
            SortField::BodyType => Some(&self.body_type),
            SortField::Location => Some(&self.location),
            SortField::FuelType => Some(&self.fuel_type),
            SortField::Transmission => Some(&self.transmission),
            SortField::Date => Some(&self.date),
            SortField::Url => Some(&self.url),
            SortField::Category => match self.category {
                Category::Vehicle => Some("Vehicle"),
                Category::Motorcycle => Some("Motorcycle"),
            },
            _ => None,
        }
    }
}
