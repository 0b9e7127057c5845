use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::core::error::{Error, ErrorKind, Result};

/// A `(make, model)` pair whose combination is the real manufacturer name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundBrand {
    pub make: String,
    pub model: String,
}

impl CompoundBrand {
    pub fn new(make: &str, model: &str) -> Self {
        CompoundBrand {
            make: make.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page_size: usize,                       // Records materialized per advance()
    pub sentinel: String,                       // Raw placeholder for "unknown"
    pub compound_brands: Vec<CompoundBrand>,
    pub auto_transmission_pattern: String,      // Case-insensitive
    pub manual_transmission_pattern: String,    // Case-insensitive
    pub view_cache_size: usize,                 // 0 disables the view cache
    pub max_reported_errors: usize,             // LineError entries kept in a LoadReport
    pub eager_first_page: bool,                 // Advance once after every reset
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: 100,
            sentinel: "?".to_string(),
            compound_brands: vec![
                CompoundBrand::new("Mercedes", "Benz"),
                CompoundBrand::new("Land", "Rover"),
                CompoundBrand::new("Alfa", "Romeo"),
                CompoundBrand::new("Great", "Wall"),
            ],
            auto_transmission_pattern: "auto|cvt|direct".to_string(),
            manual_transmission_pattern: "man".to_string(),
            view_cache_size: 32,
            max_reported_errors: 100,
            eager_first_page: false,
        }
    }
}

impl Config {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::Io,
                format!("failed to read config '{}': {}", path.display(), e),
            )
        })?;
        Self::from_json_str(&contents).map_err(|e| {
            Error::new(
                e.kind,
                format!("failed to parse config '{}': {}", path.display(), e.context),
            )
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json_str(r#"{"page_size": 20}"#).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.sentinel, "?");
        assert_eq!(config.compound_brands.len(), 4);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = Config::from_json_str(r#"{"page_size": 0}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caryard.json");
        std::fs::write(&path, r#"{"page_size": 50, "eager_first_page": true}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.page_size, 50);
        assert!(config.eager_first_page);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
