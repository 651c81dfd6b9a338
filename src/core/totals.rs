use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::common::Record;

/// Field-name to running-sum mapping for one record kind. Every requested
/// field name is present from the start, so a consumer never sees a missing
/// key or a `NaN`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TotalsMap(BTreeMap<String, f64>);

impl TotalsMap {
    pub fn seeded(field_names: &[&str]) -> Self {
        Self(
            field_names
                .iter()
                .map(|name| (name.to_string(), 0.0))
                .collect(),
        )
    }

    /// The running sum for a field, 0 when the field was never requested.
    pub fn get(&self, field: &str) -> f64 {
        self.0.get(field).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, field: &str, value: f64) {
        *self.0.entry(field.to_string()).or_insert(0.0) += value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sums the named numeric fields over a record sequence. Pure: the same
/// input always produces the same map, and no state survives between calls.
pub fn reduce<'a, R: Record + 'a>(
    records: impl IntoIterator<Item = &'a R>,
    field_names: &[&str],
) -> TotalsMap {
    let mut totals = TotalsMap::seeded(field_names);
    for record in records {
        for &field in field_names {
            if let Some(value) = record.amount(field) {
                totals.add(field, value);
            }
        }
    }
    totals
}
