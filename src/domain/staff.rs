use serde::{Deserialize, Serialize};

use crate::core::window::Period;
use crate::domain::common::{lenient_year, Amount, Displayable, Identifiable, Record};

/// One month of salary paid to a head-office staff member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryEntry {
    #[serde(default)]
    pub month: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub salary: Amount,
    #[serde(default)]
    pub days: Amount,
    #[serde(default)]
    pub total: Amount,
}

impl Record for SalaryEntry {
    fn period(&self) -> Option<Period> {
        self.year.map(|year| Period::new(self.month.clone(), year))
    }

    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "salary" => Some(self.salary.value()),
            "days" => Some(self.days.value()),
            "total" => Some(self.total.value()),
            _ => None,
        }
    }
}

/// A head-office staff member and their salary history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoStaff {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub ho_id: String,
    #[serde(default)]
    pub ho_name: String,
    #[serde(default)]
    pub salary: Vec<SalaryEntry>,
}

impl Record for HoStaff {
    fn amount(&self, _field: &str) -> Option<f64> {
        None
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.ho_name, &self.ho_id]
    }
}

impl Identifiable for HoStaff {
    fn id(&self) -> &str {
        &self.ho_id
    }
}

impl Displayable for HoStaff {
    fn display_label(&self) -> String {
        format!("{} ({})", self.ho_name, self.ho_id)
    }
}
