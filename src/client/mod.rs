use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use ureq::Agent;

use crate::core::dashboard::BackendApi;
use crate::core::window::TimeWindow;
use crate::domain::franchise::Franchise;
use crate::domain::monthly::{CompanyMonthly, VipMonthly};
use crate::domain::sales::SaleRecord;
use crate::domain::staff::HoStaff;
use crate::errors::{DashboardError, Result};

/// Blocking REST client for the business-management backend.
pub struct ApiClient {
    agent: Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        for (idx, (name, value)) in query.iter().enumerate() {
            url.push(if idx == 0 { '?' } else { '&' });
            url.push_str(name);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.url(path, query);
        let mut response = self
            .agent
            .get(&url)
            .call()
            .map_err(|err| DashboardError::Fetch(err.to_string()))?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| DashboardError::Fetch(err.to_string()))?;
        let value: Value = serde_json::from_str(&body)?;
        decode_records(path, value)
    }

    fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        let url = self.url(path, query);
        self.agent
            .delete(&url)
            .call()
            .map_err(|err| DashboardError::Backend(err.to_string()))?;
        Ok(())
    }
}

fn window_query(window: &TimeWindow) -> Vec<(&'static str, String)> {
    vec![
        ("month", window.month_param()),
        ("year", window.year_param()),
    ]
}

fn month_year_query(month: &str, year: i32) -> Vec<(&'static str, String)> {
    vec![("month", month.to_string()), ("year", year.to_string())]
}

/// Normalizes the two response shapes the backend produces: a bare JSON
/// array, or an object wrapping the array under `"records"`.
pub fn normalize_records(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("records") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(DashboardError::Decode(
                "expected an array or an object with a \"records\" array".into(),
            )),
        },
        other => Err(DashboardError::Decode(format!(
            "expected an array of records, got {other}"
        ))),
    }
}

fn decode_records<T: DeserializeOwned>(path: &str, value: Value) -> Result<Vec<T>> {
    let items = normalize_records(value)?;
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value(item) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(endpoint = path, error = %err, "skipping malformed record");
            }
        }
    }
    Ok(records)
}

impl BackendApi for ApiClient {
    fn sales(&self) -> Result<Vec<SaleRecord>> {
        self.get_list("sales", &[])
    }

    fn expenses(&self) -> Result<Vec<SaleRecord>> {
        self.get_list("fsales", &[])
    }

    fn franchises(&self) -> Result<Vec<Franchise>> {
        self.get_list("franchise", &[])
    }

    fn vip_months(&self, window: &TimeWindow) -> Result<Vec<VipMonthly>> {
        self.get_list("vipdata/checkRecord", &window_query(window))
    }

    fn vip_franchise_months(&self, window: &TimeWindow) -> Result<Vec<VipMonthly>> {
        self.get_list("vipfranchiseupload/checkRecord", &window_query(window))
    }

    fn company_months(&self, window: &TimeWindow) -> Result<Vec<CompanyMonthly>> {
        self.get_list("companydata/checkRecord", &window_query(window))
    }

    fn ho_staff(&self) -> Result<Vec<HoStaff>> {
        self.get_list("hostaff", &[])
    }

    fn delete_franchise(&self, franchise_id: &str) -> Result<()> {
        self.delete(&format!("franchise/{franchise_id}"), &[])
    }

    fn delete_ho_staff(&self, ho_id: &str) -> Result<()> {
        self.delete(&format!("hostaff/{ho_id}"), &[])
    }

    fn delete_vip_month(&self, month: &str, year: i32) -> Result<()> {
        self.delete("vipdata/deleteByMonthYear", &month_year_query(month, year))
    }

    fn delete_vip_franchise_month(&self, month: &str, year: i32) -> Result<()> {
        self.delete(
            "vipfranchiseupload/deleteRecord",
            &month_year_query(month, year),
        )
    }

    fn delete_company_month(&self, month: &str, year: i32) -> Result<()> {
        self.delete("companydata/deleteRecord", &month_year_query(month, year))
    }
}
