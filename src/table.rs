//! Client-side paging and search over the loaded record set.
//!
//! All functions here are pure; the TUI and the `list` command both feed
//! them from the same `PageState`.

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::Record;

/// Sub-sequence of `rows` shown on `current_page`, bounds clamped.
///
/// Page 1 starts at index 0; every later page N starts at
/// `N * rows_per_page`. The window is therefore not contiguous: rows in
/// `[rows_per_page, 2 * rows_per_page)` are never shown. Matches the web
/// client's windowing rule; do not normalize.
pub fn page_slice<T>(rows: &[T], current_page: usize, rows_per_page: usize) -> &[T] {
    let start = if current_page == 1 {
        0
    } else {
        current_page * rows_per_page
    };
    let end = start + rows_per_page;

    let start = start.min(rows.len());
    let end = end.min(rows.len());
    &rows[start..end]
}

/// Page numbers to offer as controls: the block of `rows_per_page`
/// consecutive pages containing `current_page`.
pub fn pagination_group(current_page: usize, rows_per_page: usize) -> Vec<usize> {
    let group_start = (current_page - 1) / rows_per_page * rows_per_page;
    (1..=rows_per_page).map(|i| group_start + i).collect()
}

/// The Previous control is offered on every page but the first.
pub fn show_previous(current_page: usize) -> bool {
    current_page > 1
}

/// The Next control is gated on `rows_per_page`, not on a page count,
/// matching the web client.
pub fn show_next(current_page: usize, rows_per_page: usize) -> bool {
    current_page < rows_per_page
}

/// Case-insensitive substring filter over the current page slice.
///
/// The searchable field names come from the first row's own serialized
/// shape, not from the static column set; a record missing one of those
/// fields is simply never matched on it. An empty needle matches every row.
///
/// `None` is the degraded outcome (empty input, or a row that failed to
/// serialize); callers render no rows for that pass.
pub fn filter_rows(rows: &[Record], search_text: &str) -> Option<Vec<Record>> {
    if rows.is_empty() {
        return None;
    }

    let needle = search_text.to_lowercase();

    let mut shapes = Vec::with_capacity(rows.len());
    for row in rows {
        match row_shape(row) {
            Ok(shape) => shapes.push(shape),
            Err(e) => {
                warn!("Row serialization failed during filtering: {}", e);
                return None;
            }
        }
    }

    let columns: Vec<&String> = shapes[0].keys().collect();

    let kept = rows
        .iter()
        .zip(&shapes)
        .filter(|(_, shape)| {
            columns.iter().any(|column| {
                shape
                    .get(*column)
                    .and_then(field_text)
                    .map(|text| text.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .map(|(row, _)| row.clone())
        .collect();

    Some(kept)
}

fn row_shape(row: &Record) -> serde_json::Result<Map<String, Value>> {
    serde_json::to_value(row).map(|value| match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// Text form of a field for matching. Strings match on their raw contents;
/// null fields never match; everything else matches on its JSON text.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn record(id: u64, name: &str, email: &str, phone: &str, city: &str) -> Record {
        Record {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: Address {
                city: city.to_string(),
                extra: BTreeMap::new(),
            },
            extra: BTreeMap::new(),
        }
    }

    fn sample_records() -> Vec<Record> {
        vec![
            record(1, "John Smith", "john@example.com", "555-0101", "Boston"),
            record(2, "Jane Doe", "jane@example.com", "555-0102", "Chicago"),
            record(3, "Bob Martin", "bob@example.com", "555-0103", "Denver"),
            record(4, "Alice Wong", "alice@example.com", "555-0104", "Seattle"),
            record(5, "Carol King", "carol@example.com", "555-0105", "Austin"),
        ]
    }

    #[test]
    fn test_first_page_starts_at_index_zero() {
        let rows: Vec<u32> = (0..10).collect();
        let slice = page_slice(&rows, 1, 3);
        assert_eq!(slice, &[0, 1, 2]);
    }

    #[test]
    fn test_later_pages_start_at_page_times_rows_per_page() {
        let rows: Vec<u32> = (0..20).collect();
        assert_eq!(page_slice(&rows, 2, 3), &[6, 7, 8]);
        assert_eq!(page_slice(&rows, 3, 3), &[9, 10, 11]);
        assert_eq!(page_slice(&rows, 5, 3), &[15, 16, 17]);
    }

    #[test]
    fn test_out_of_range_page_yields_empty_slice() {
        let rows: Vec<u32> = (0..5).collect();
        assert!(page_slice(&rows, 2, 3).is_empty());
        assert!(page_slice(&rows, 100, 3).is_empty());
    }

    #[test]
    fn test_partial_tail_window() {
        let rows: Vec<u32> = (0..7).collect();
        assert_eq!(page_slice(&rows, 2, 3), &[6]);
    }

    #[test]
    fn test_pagination_group_first_block() {
        assert_eq!(pagination_group(1, 3), vec![1, 2, 3]);
        assert_eq!(pagination_group(2, 3), vec![1, 2, 3]);
        assert_eq!(pagination_group(3, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_pagination_group_regroups_in_blocks() {
        assert_eq!(pagination_group(4, 3), vec![4, 5, 6]);
        assert_eq!(pagination_group(6, 3), vec![4, 5, 6]);
        assert_eq!(pagination_group(7, 3), vec![7, 8, 9]);
        assert_eq!(pagination_group(5, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(pagination_group(6, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_previous_visible_after_first_page_only() {
        assert!(!show_previous(1));
        assert!(show_previous(2));
        assert!(show_previous(10));
    }

    #[test]
    fn test_next_visibility_is_gated_on_rows_per_page() {
        assert!(show_next(1, 3));
        assert!(show_next(2, 3));
        assert!(!show_next(3, 3));
        assert!(!show_next(4, 3));
    }

    #[test]
    fn test_empty_search_is_identity_on_the_slice() {
        let rows = sample_records();
        let slice = page_slice(&rows, 1, 3);
        let filtered = filter_rows(slice, "").expect("non-empty input filters");
        assert_eq!(filtered.len(), 3);
        let ids: Vec<u64> = filtered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unmatched_needle_yields_empty_result() {
        let rows = sample_records();
        let filtered = filter_rows(&rows, "zzzzzz").expect("non-empty input filters");
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let rows = sample_records();
        let filtered = filter_rows(&rows, "JOHN").expect("non-empty input filters");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "John Smith");
    }

    #[test]
    fn test_filter_matches_numeric_fields_as_text() {
        let rows = sample_records();
        let filtered = filter_rows(&rows, "4").expect("non-empty input filters");
        // id 4 plus every phone number containing a '4'.
        assert!(filtered.iter().any(|r| r.id == 4));
    }

    #[test]
    fn test_filter_reaches_nested_address_fields() {
        let rows = sample_records();
        let filtered = filter_rows(&rows, "chicago").expect("non-empty input filters");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_empty_slice_filters_to_none() {
        assert!(filter_rows(&[], "anything").is_none());
    }

    #[test]
    fn test_searchable_fields_come_from_first_row_shape() {
        let mut rows = sample_records();
        rows.truncate(2);
        // Field present on row 2 only is invisible to the filter.
        rows[1]
            .extra
            .insert("nickname".to_string(), json!("shadowfax"));
        let filtered = filter_rows(&rows, "shadowfax").expect("non-empty input filters");
        assert!(filtered.is_empty());

        // Field present on row 1 is searched on every row.
        rows[0]
            .extra
            .insert("nickname".to_string(), json!("lightfoot"));
        let filtered = filter_rows(&rows, "shadowfax").expect("non-empty input filters");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_null_fields_never_match() {
        let mut rows = sample_records();
        rows.truncate(1);
        rows[0].extra.insert("website".to_string(), Value::Null);
        let filtered = filter_rows(&rows, "null").expect("non-empty input filters");
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_five_record_scenario_page_one() {
        let rows = sample_records();
        let slice = page_slice(&rows, 1, 3);
        assert_eq!(slice.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(pagination_group(1, 3), vec![1, 2, 3]);
        assert!(!show_previous(1));
        assert!(show_next(1, 3));
    }

    #[test]
    fn test_five_record_scenario_page_two() {
        let rows = sample_records();
        // Page 2 windows [6, 9); only 5 records exist, so nothing renders.
        let slice = page_slice(&rows, 2, 3);
        assert!(slice.is_empty());
        assert!(show_previous(2));
        assert!(show_next(2, 3));
    }
}
