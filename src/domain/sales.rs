use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::window::Period;
use crate::domain::common::{lenient_datetime, Amount, Displayable, Identifiable, Record};

/// One direct sale or expense line. The sales and expense collections share
/// this shape; they differ only in which backend collection they live in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Amount,
    #[serde(default)]
    pub count: Amount,
    #[serde(default)]
    pub total: Amount,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SaleRecord {
    pub fn new(
        product_name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        count: f64,
    ) -> Self {
        Self {
            id: String::new(),
            product_name: product_name.into(),
            description: description.into(),
            price: Amount(price),
            count: Amount(count),
            total: Amount(price * count),
            created_at: None,
        }
    }

    pub fn recorded_at(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }
}

impl Record for SaleRecord {
    fn period(&self) -> Option<Period> {
        self.created_at.map(Period::from_timestamp)
    }

    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "price" => Some(self.price.value()),
            "count" => Some(self.count.value()),
            "total" => Some(self.total.value()),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.product_name, &self.description]
    }
}

impl Identifiable for SaleRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for SaleRecord {
    fn display_label(&self) -> String {
        format!("{} x{}", self.product_name, self.count.value())
    }
}
