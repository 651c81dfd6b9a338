use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::window::Period;
use crate::domain::common::{
    lenient_datetime, lenient_year, Amount, Displayable, Identifiable, Record,
};

/// A payment recorded against one franchise product line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayment {
    #[serde(default)]
    pub amount: Amount,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date: Option<DateTime<Utc>>,
}

/// One product line sold to a franchise, with its running payment state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseProduct {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub price: Amount,
    #[serde(default)]
    pub count: Amount,
    #[serde(default)]
    pub total: Amount,
    #[serde(default)]
    pub payment_paid: Amount,
    #[serde(default)]
    pub payment_pending: Amount,
    #[serde(default)]
    pub payments: Vec<ProductPayment>,
}

/// A monthly royalty row attached to a franchise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoyaltyRecord {
    #[serde(default)]
    pub month: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub royalty_amount: Amount,
    #[serde(default)]
    pub amount_paid: Amount,
    #[serde(default)]
    pub amount_pending: Amount,
}

impl Record for RoyaltyRecord {
    fn period(&self) -> Option<Period> {
        self.year.map(|year| Period::new(self.month.clone(), year))
    }

    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "royaltyAmount" => Some(self.royalty_amount.value()),
            "amountPaid" => Some(self.amount_paid.value()),
            "amountPending" => Some(self.amount_pending.value()),
            _ => None,
        }
    }
}

/// One franchise with its product lines and royalty history. The summary
/// figures every screen shows are rollups over both lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub franchise_id: String,
    #[serde(default)]
    pub franchise_name: String,
    #[serde(default)]
    pub products: Vec<FranchiseProduct>,
    #[serde(default)]
    pub financial_records: Vec<RoyaltyRecord>,
}

impl Franchise {
    /// Product totals plus royalty amounts.
    pub fn total_sales(&self) -> f64 {
        let products: f64 = self.products.iter().map(|p| p.total.value()).sum();
        let royalties: f64 = self
            .financial_records
            .iter()
            .map(|r| r.royalty_amount.value())
            .sum();
        products + royalties
    }

    /// Product payments plus royalty payments received so far.
    pub fn total_payment_paid(&self) -> f64 {
        let products: f64 = self.products.iter().map(|p| p.payment_paid.value()).sum();
        let royalties: f64 = self
            .financial_records
            .iter()
            .map(|r| r.amount_paid.value())
            .sum();
        products + royalties
    }

    pub fn total_payment_pending(&self) -> f64 {
        self.total_sales() - self.total_payment_paid()
    }
}

impl Record for Franchise {
    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "totalSales" => Some(self.total_sales()),
            "totalPaymentPaid" => Some(self.total_payment_paid()),
            "totalPaymentPending" => Some(self.total_payment_pending()),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.franchise_name, &self.franchise_id]
    }
}

impl Identifiable for Franchise {
    fn id(&self) -> &str {
        &self.franchise_id
    }
}

impl Displayable for Franchise {
    fn display_label(&self) -> String {
        format!("{} ({})", self.franchise_name, self.franchise_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn franchise_with_history() -> Franchise {
        Franchise {
            franchise_id: "FR-001".into(),
            franchise_name: "North Branch".into(),
            products: vec![
                FranchiseProduct {
                    total: Amount(500.0),
                    payment_paid: Amount(200.0),
                    payment_pending: Amount(300.0),
                    ..Default::default()
                },
                FranchiseProduct {
                    total: Amount(250.0),
                    payment_paid: Amount(250.0),
                    ..Default::default()
                },
            ],
            financial_records: vec![RoyaltyRecord {
                month: "January".into(),
                year: Some(2024),
                royalty_amount: Amount(100.0),
                amount_paid: Amount(40.0),
                amount_pending: Amount(60.0),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn rollups_combine_products_and_royalties() {
        let franchise = franchise_with_history();
        assert_eq!(franchise.total_sales(), 850.0);
        assert_eq!(franchise.total_payment_paid(), 490.0);
        assert_eq!(franchise.total_payment_pending(), 360.0);
    }

    #[test]
    fn rollups_are_reachable_as_named_fields() {
        let franchise = franchise_with_history();
        assert_eq!(franchise.amount("totalSales"), Some(850.0));
        assert_eq!(franchise.amount("totalPaymentPaid"), Some(490.0));
        assert_eq!(franchise.amount("royaltyAmount"), None);
    }

    #[test]
    fn royalty_rows_carry_their_own_period() {
        let franchise = franchise_with_history();
        let royalty = &franchise.financial_records[0];
        assert_eq!(royalty.period(), Some(Period::new("January", 2024)));
        assert_eq!(franchise.period(), None);
    }
}
