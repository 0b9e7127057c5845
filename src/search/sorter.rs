use std::cmp::Ordering;
use std::sync::Arc;
use crate::core::types::Record;
use crate::query::types::{SortKey, SortOrder};

/// Stable sort by a single column. Ties keep their input order in both
/// directions: descending reverses the comparator, never the output.
pub fn sort_records(records: &mut [Arc<Record>], key: &SortKey) {
    records.sort_by(|a, b| compare_records(a, b, key));
}

pub fn compare_records(a: &Record, b: &Record, key: &SortKey) -> Ordering {
    let ordering = if key.field.is_numeric() {
        let left = a.field(key.field).as_number().unwrap_or(0.0);
        let right = b.field(key.field).as_number().unwrap_or(0.0);
        left.total_cmp(&right)
    } else {
        let left = a.text_field(key.field).unwrap_or("");
        let right = b.text_field(key.field).unwrap_or("");
        compare_text(left, right)
    };

    match key.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

// Empty text first, then numeric-like text ("86", "1.8") compared
// numerically, then everything else; the ranks keep mixed columns totally
// ordered
fn compare_text(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    match (numeric_like(a), numeric_like(b)) {
        (Some(left), Some(right)) => left.total_cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_case_insensitive(a, b),
    }
}

fn numeric_like(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
