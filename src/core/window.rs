use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;

/// Canonical English month names, indexed by `chrono::Datelike::month0`.
///
/// Month-name derivation goes through this table rather than locale-aware
/// formatting so filtering behaves the same in every environment.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month0: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month0 as usize).copied()
}

/// Resolves a month name to its zero-based index, ignoring ASCII case.
pub fn month_index(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name.trim()))
        .map(|idx| idx as u32)
}

/// The temporal key of a record: a month name plus a calendar year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub month: String,
    pub year: i32,
}

impl Period {
    pub fn new(month: impl Into<String>, year: i32) -> Self {
        Self {
            month: month.into(),
            year,
        }
    }

    /// Derives the period from a timestamp via the canonical month table.
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        Self {
            month: month_name(ts.month0()).unwrap_or_default().to_string(),
            year: ts.year(),
        }
    }

    /// Parses a `"January 2024"` style label. The month must resolve against
    /// the canonical table and the year must parse whole; anything else is
    /// treated as an absent period.
    pub fn from_label(label: &str) -> Option<Self> {
        let (month, year) = label.trim().split_once(' ')?;
        month_index(month)?;
        let year: i32 = year.trim().parse().ok()?;
        Some(Self::new(month.trim(), year))
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// Month axis of a [`TimeWindow`]; `All` leaves the axis unconstrained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Name(String),
}

impl FromStr for MonthFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        match month_index(s) {
            Some(idx) => Ok(MonthFilter::Name(MONTH_NAMES[idx as usize].to_string())),
            None => Err(DashboardError::InvalidInput(format!(
                "unknown month name: {s}"
            ))),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => write!(f, "All"),
            MonthFilter::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Year axis of a [`TimeWindow`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum YearFilter {
    All,
    Year(i32),
}

impl FromStr for YearFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(YearFilter::All);
        }
        s.trim()
            .parse()
            .map(YearFilter::Year)
            .map_err(|_| DashboardError::InvalidInput(format!("invalid year: {s}")))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => write!(f, "All"),
            YearFilter::Year(year) => write!(f, "{year}"),
        }
    }
}

/// The user-selected month/year filter shared by every listing and by the
/// dashboard. Treated as an immutable snapshot per render cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    pub month: MonthFilter,
    pub year: YearFilter,
}

impl TimeWindow {
    pub fn new(month: MonthFilter, year: YearFilter) -> Self {
        Self { month, year }
    }

    pub fn all() -> Self {
        Self {
            month: MonthFilter::All,
            year: YearFilter::All,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.month == MonthFilter::All && self.year == YearFilter::All
    }

    /// Whether a record with the given period falls inside this window.
    ///
    /// A record without a period fails closed on every constrained axis.
    pub fn matches(&self, period: Option<&Period>) -> bool {
        let month_ok = match &self.month {
            MonthFilter::All => true,
            MonthFilter::Name(name) => {
                period.is_some_and(|p| p.month.eq_ignore_ascii_case(name))
            }
        };
        let year_ok = match self.year {
            YearFilter::All => true,
            YearFilter::Year(year) => period.is_some_and(|p| p.year == year),
        };
        month_ok && year_ok
    }

    /// Query-parameter form of the month axis, `"All"` when unconstrained.
    pub fn month_param(&self) -> String {
        self.month.to_string()
    }

    pub fn year_param(&self) -> String {
        self.year.to_string()
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_period_uses_canonical_month_table() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let period = Period::from_timestamp(ts);
        assert_eq!(period, Period::new("January", 2024));
    }

    #[test]
    fn label_parsing_rejects_unknown_months_and_partial_years() {
        assert_eq!(
            Period::from_label("February 2023"),
            Some(Period::new("February", 2023))
        );
        assert_eq!(Period::from_label("Febtober 2023"), None);
        assert_eq!(Period::from_label("February"), None);
        assert_eq!(Period::from_label("February 20x3"), None);
    }

    #[test]
    fn unbounded_window_matches_records_without_periods() {
        assert!(TimeWindow::all().matches(None));
    }

    #[test]
    fn constrained_axis_fails_closed_for_missing_periods() {
        let window = TimeWindow::new(MonthFilter::All, YearFilter::Year(2024));
        assert!(!window.matches(None));
        assert!(window.matches(Some(&Period::new("March", 2024))));
        assert!(!window.matches(Some(&Period::new("March", 2023))));
    }

    #[test]
    fn month_axis_compares_names_case_insensitively() {
        let window = TimeWindow::new(
            MonthFilter::Name("January".into()),
            YearFilter::All,
        );
        assert!(window.matches(Some(&Period::new("january", 2020))));
        assert!(!window.matches(Some(&Period::new("June", 2020))));
    }

    #[test]
    fn filters_parse_from_user_input() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "march".parse::<MonthFilter>().unwrap(),
            MonthFilter::Name("March".into())
        );
        assert!("Smarch".parse::<MonthFilter>().is_err());
        assert_eq!("2022".parse::<YearFilter>().unwrap(), YearFilter::Year(2022));
        assert!("20x2".parse::<YearFilter>().is_err());
    }
}
