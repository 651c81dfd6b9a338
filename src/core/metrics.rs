use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::core::totals::TotalsMap;
use crate::domain::common::RecordKind;

pub const TOTAL_INCOME: &str = "Total Income";
pub const TOTAL_EXPENSE: &str = "Total Expense";
pub const PROFIT_LOSS: &str = "Profit / Loss";

/// Coefficient of a formula term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn factor(&self) -> f64 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }
}

/// One `(kind, field, sign)` contribution to a derived metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricTerm {
    pub kind: RecordKind,
    pub field: &'static str,
    pub sign: Sign,
}

impl MetricTerm {
    pub fn plus(kind: RecordKind, field: &'static str) -> Self {
        Self {
            kind,
            field,
            sign: Sign::Plus,
        }
    }

    pub fn minus(kind: RecordKind, field: &'static str) -> Self {
        Self {
            kind,
            field,
            sign: Sign::Minus,
        }
    }
}

/// Declarative mapping from output metric names to their contributing
/// terms, in display order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Formula(Vec<(String, Vec<MetricTerm>)>);

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metric(mut self, name: impl Into<String>, terms: Vec<MetricTerm>) -> Self {
        self.0.push((name.into(), terms));
        self
    }

    pub fn metrics(&self) -> impl Iterator<Item = (&str, &[MetricTerm])> {
        self.0
            .iter()
            .map(|(name, terms)| (name.as_str(), terms.as_slice()))
    }
}

/// Cross-collection combined metrics, in the formula's display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedMetrics(Vec<(String, f64)>);

impl DerivedMetrics {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(metric, _)| metric == name)
            .map(|(_, value)| *value)
    }

    /// Like [`DerivedMetrics::get`] but degrading to 0 for unknown names.
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
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

/// Evaluates a formula against per-kind totals. Kinds or fields that never
/// arrived contribute 0, so a collection that failed to load degrades the
/// derived value toward 0 instead of breaking it.
pub fn combine(totals_by_kind: &BTreeMap<RecordKind, TotalsMap>, formula: &Formula) -> DerivedMetrics {
    DerivedMetrics(
        formula
            .metrics()
            .map(|(name, terms)| {
                let value = terms
                    .iter()
                    .map(|term| {
                        let totals = totals_by_kind.get(&term.kind);
                        term.sign.factor() * totals.map_or(0.0, |map| map.get(term.field))
                    })
                    .sum::<f64>();
                (name.to_string(), value)
            })
            .collect(),
    )
}

static DASHBOARD_FORMULA: Lazy<Formula> = Lazy::new(|| {
    let income = vec![
        MetricTerm::plus(RecordKind::CompanyRevenue, "paymentPaid"),
        MetricTerm::plus(RecordKind::FranchiseSales, "totalPaymentPaid"),
        MetricTerm::plus(RecordKind::Sales, "total"),
    ];
    let expense = vec![
        MetricTerm::plus(RecordKind::Vip, "paymentPaid"),
        MetricTerm::plus(RecordKind::VipFranchise, "paymentPaid"),
        MetricTerm::plus(RecordKind::Expense, "total"),
        MetricTerm::plus(RecordKind::HoSalary, "total"),
    ];
    let profit = income
        .iter()
        .copied()
        .chain(expense.iter().map(|term| MetricTerm {
            sign: Sign::Minus,
            ..*term
        }))
        .collect();
    Formula::new()
        .with_metric(TOTAL_INCOME, income)
        .with_metric(TOTAL_EXPENSE, expense)
        .with_metric(PROFIT_LOSS, profit)
});

/// The formula behind the dashboard's stat cards.
pub fn dashboard_formula() -> &'static Formula {
    &DASHBOARD_FORMULA
}
