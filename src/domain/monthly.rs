use serde::{Deserialize, Serialize};

use crate::core::window::Period;
use crate::domain::common::{Amount, Record};

/// Pre-summed totals carried by a VIP or VIP-franchise monthly upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessTotals {
    #[serde(default)]
    pub collection: Amount,
    #[serde(default)]
    pub total_payment: Amount,
    #[serde(default)]
    pub payment_paid: Amount,
    #[serde(default)]
    pub payment_pending: Amount,
}

/// Pre-summed totals carried by a company-revenue monthly upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTotals {
    #[serde(default)]
    pub course_fee: Amount,
    #[serde(default)]
    pub company_revenue: Amount,
    #[serde(default)]
    pub payment_paid: Amount,
    #[serde(default)]
    pub payment_pending: Amount,
}

/// One month of bulk-uploaded VIP (or VIP-franchise) business, keyed by a
/// `"January 2024"` style label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipMonthly {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub month_year: String,
    #[serde(default)]
    pub totals: BusinessTotals,
}

impl VipMonthly {
    pub fn new(month: &str, year: i32, totals: BusinessTotals) -> Self {
        Self {
            id: String::new(),
            month_year: format!("{month} {year}"),
            totals,
        }
    }
}

impl Record for VipMonthly {
    fn period(&self) -> Option<Period> {
        Period::from_label(&self.month_year)
    }

    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "collection" => Some(self.totals.collection.value()),
            "totalPayment" => Some(self.totals.total_payment.value()),
            "paymentPaid" => Some(self.totals.payment_paid.value()),
            "paymentPending" => Some(self.totals.payment_pending.value()),
            _ => None,
        }
    }
}

/// One month of bulk-uploaded company revenue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMonthly {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub month_year: String,
    #[serde(default)]
    pub totals: CompanyTotals,
}

impl CompanyMonthly {
    pub fn new(month: &str, year: i32, totals: CompanyTotals) -> Self {
        Self {
            id: String::new(),
            month_year: format!("{month} {year}"),
            totals,
        }
    }
}

impl Record for CompanyMonthly {
    fn period(&self) -> Option<Period> {
        Period::from_label(&self.month_year)
    }

    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "courseFee" => Some(self.totals.course_fee.value()),
            "companyRevenue" => Some(self.totals.company_revenue.value()),
            "paymentPaid" => Some(self.totals.payment_paid.value()),
            "paymentPending" => Some(self.totals.payment_pending.value()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_year_label_is_the_period() {
        let upload = VipMonthly::new("March", 2024, BusinessTotals::default());
        assert_eq!(upload.period(), Some(Period::new("March", 2024)));
    }

    #[test]
    fn corrupt_label_means_no_period() {
        let upload = VipMonthly {
            month_year: "Sometime 2024".into(),
            ..Default::default()
        };
        assert_eq!(upload.period(), None);
    }

    #[test]
    fn wire_shape_decodes_with_string_amounts() {
        let body = r#"{
            "_id": "65f0",
            "monthYear": "January 2024",
            "totals": {"courseFee": "1500", "companyRevenue": 900, "paymentPaid": 400, "paymentPending": "abc"}
        }"#;
        let upload: CompanyMonthly = serde_json::from_str(body).unwrap();
        assert_eq!(upload.amount("courseFee"), Some(1500.0));
        assert_eq!(upload.amount("companyRevenue"), Some(900.0));
        assert_eq!(upload.amount("paymentPending"), Some(0.0));
    }
}
