use crate::core::window::TimeWindow;
use crate::domain::common::Record;

/// Applies the month/year window and an optional text query to a collection,
/// preserving input order. Records whose temporal key is missing or
/// unreadable fail closed on every constrained axis.
pub fn filter_records<'a, R: Record>(
    records: &'a [R],
    window: &TimeWindow,
    query: Option<&str>,
) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| window.matches(record.period().as_ref()))
        .filter(|record| matches_query(*record, query))
        .collect()
}

/// Case-insensitive substring match against the record's designated text
/// fields; any single field matching is enough. An empty or absent query
/// matches everything.
pub fn matches_query<R: Record>(record: &R, query: Option<&str>) -> bool {
    let needle = match query {
        Some(text) => text.trim().to_lowercase(),
        None => return true,
    };
    if needle.is_empty() {
        return true;
    }
    record
        .search_text()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
