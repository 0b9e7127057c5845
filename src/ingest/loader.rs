use std::sync::Arc;
use std::time::Instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use crate::core::config::Config;
use crate::core::types::Record;
use crate::ingest::normalizer::{RawRecord, RecordNormalizer};

/// One skipped input line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineError {
    pub line: usize,    // 1-based
    pub message: String,
}

/// Outcome of a load, exposed to the caller; skipped lines never fail it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_lines: usize,
    pub errors: Vec<LineError>,     // Capped at Config::max_reported_errors
    pub took_ms: u64,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_lines == 0
    }
}

/// Newline-delimited JSON loader
pub struct NdjsonLoader {
    normalizer: RecordNormalizer,
    max_reported_errors: usize,
}

impl NdjsonLoader {
    pub fn new(config: &Config) -> Self {
        NdjsonLoader {
            normalizer: RecordNormalizer::new(config),
            max_reported_errors: config.max_reported_errors,
        }
    }

    pub fn load_str(&self, text: &str) -> (Vec<Arc<Record>>, LoadReport) {
        let start = Instant::now();
        let mut records = Vec::new();
        let mut skipped_lines = 0;
        let mut errors = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.parse_line(line) {
                Ok(record) => records.push(Arc::new(record)),
                Err(message) => {
                    warn!(line = line_no, error = %message, "skipping malformed record");
                    skipped_lines += 1;
                    if errors.len() < self.max_reported_errors {
                        errors.push(LineError { line: line_no, message });
                    }
                }
            }
        }

        let took_ms = start.elapsed().as_millis() as u64;
        info!(loaded = records.len(), skipped = skipped_lines, took_ms, "catalog records loaded");

        let report = LoadReport {
            loaded: records.len(),
            skipped_lines,
            errors,
            took_ms,
            loaded_at: Utc::now(),
        };
        (records, report)
    }

    fn parse_line(&self, line: &str) -> std::result::Result<Record, String> {
        let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
        if !value.is_object() {
            return Err(format!("expected a JSON object, found {}", json_kind(&value)));
        }
        let raw: RawRecord = serde_json::from_value(value).map_err(|e| e.to_string())?;
        Ok(self.normalizer.normalize(&raw))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
