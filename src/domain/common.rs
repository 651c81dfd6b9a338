use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::window::Period;

/// Identifies records that expose the backend's stable identifier.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// The fixed business-entity categories. Each kind has its own field schema
/// and its own backend collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RecordKind {
    Sales,
    Expense,
    FranchiseSales,
    Vip,
    VipFranchise,
    CompanyRevenue,
    HoSalary,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Sales => "Sales",
            RecordKind::Expense => "Expense",
            RecordKind::FranchiseSales => "Franchise Sales",
            RecordKind::Vip => "VIP",
            RecordKind::VipFranchise => "VIP Franchise",
            RecordKind::CompanyRevenue => "Company Revenue",
            RecordKind::HoSalary => "HO Salary",
        }
    }

    /// Every numeric field name recognized for this kind. Totals maps are
    /// seeded from this list so each name is present even when no record
    /// contributed.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Sales | RecordKind::Expense => &["price", "count", "total"],
            RecordKind::FranchiseSales => {
                &["totalSales", "totalPaymentPaid", "totalPaymentPending"]
            }
            RecordKind::Vip | RecordKind::VipFranchise => {
                &["collection", "totalPayment", "paymentPaid", "paymentPending"]
            }
            RecordKind::CompanyRevenue => {
                &["courseFee", "companyRevenue", "paymentPaid", "paymentPending"]
            }
            RecordKind::HoSalary => &["salary", "days", "total"],
        }
    }

    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::Sales,
            RecordKind::Expense,
            RecordKind::FranchiseSales,
            RecordKind::Vip,
            RecordKind::VipFranchise,
            RecordKind::CompanyRevenue,
            RecordKind::HoSalary,
        ]
    }
}

/// The view the aggregation pipeline takes of any record: an optional
/// temporal key, named numeric fields, and designated searchable text.
pub trait Record {
    fn period(&self) -> Option<Period> {
        None
    }

    fn amount(&self, field: &str) -> Option<f64>;

    fn search_text(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// A numeric field as the backend sends it: a JSON number or a numeric
/// string. Non-numeric input coerces to 0 so a single bad record can never
/// push `NaN` into a sum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Amount(pub f64);

impl Amount {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(value)
    }
}

impl Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Amount(coerce_number(&value)))
    }
}

/// String-to-float coercion shared by every numeric field. Infinities and
/// `NaN` collapse to 0 along with everything else unparseable.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Deserializes a timestamp field, yielding `None` for anything that is not
/// a valid RFC 3339 string. A record with an unreadable date still loads; it
/// just fails closed under a constrained window.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => DateTime::parse_from_rfc3339(&text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

/// Deserializes a year field sent as either a number or a string.
pub fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default)]
        total: Amount,
        #[serde(default, deserialize_with = "lenient_year")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "lenient_datetime")]
        created_at: Option<DateTime<Utc>>,
    }

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        let row: Row = serde_json::from_str(r#"{"total": "100.5"}"#).unwrap();
        assert_eq!(row.total.value(), 100.5);
        let row: Row = serde_json::from_str(r#"{"total": 42}"#).unwrap();
        assert_eq!(row.total.value(), 42.0);
    }

    #[test]
    fn amount_coerces_garbage_to_zero() {
        for body in [r#"{"total": "abc"}"#, r#"{"total": null}"#, r#"{"total": "NaN"}"#, "{}"] {
            let row: Row = serde_json::from_str(body).unwrap();
            assert_eq!(row.total.value(), 0.0, "input: {body}");
        }
    }

    #[test]
    fn year_parses_both_wire_shapes() {
        let row: Row = serde_json::from_str(r#"{"year": 2024}"#).unwrap();
        assert_eq!(row.year, Some(2024));
        let row: Row = serde_json::from_str(r#"{"year": "2023"}"#).unwrap();
        assert_eq!(row.year, Some(2023));
        let row: Row = serde_json::from_str(r#"{"year": "soon"}"#).unwrap();
        assert_eq!(row.year, None);
    }

    #[test]
    fn unreadable_timestamps_do_not_fail_the_record() {
        let row: Row =
            serde_json::from_str(r#"{"created_at": "2024-10-21T10:00:00.000Z"}"#).unwrap();
        assert!(row.created_at.is_some());
        let row: Row = serde_json::from_str(r#"{"created_at": "yesterday"}"#).unwrap();
        assert!(row.created_at.is_none());
    }
}
