use std::collections::BTreeMap;

use crate::core::filter::filter_records;
use crate::core::metrics::{combine, dashboard_formula, DerivedMetrics};
use crate::core::totals::{reduce, TotalsMap};
use crate::core::window::TimeWindow;
use crate::domain::common::{Record, RecordKind};
use crate::domain::franchise::Franchise;
use crate::domain::monthly::{CompanyMonthly, VipMonthly};
use crate::domain::sales::SaleRecord;
use crate::domain::staff::{HoStaff, SalaryEntry};
use crate::errors::Result;

/// Trait that abstracts the REST backend behind the dashboard.
///
/// Windowed kinds receive the active window so the backend can pre-filter
/// server-side; the remaining kinds are filtered client-side only.
pub trait BackendApi {
    fn sales(&self) -> Result<Vec<SaleRecord>>;
    fn expenses(&self) -> Result<Vec<SaleRecord>>;
    fn franchises(&self) -> Result<Vec<Franchise>>;
    fn vip_months(&self, window: &TimeWindow) -> Result<Vec<VipMonthly>>;
    fn vip_franchise_months(&self, window: &TimeWindow) -> Result<Vec<VipMonthly>>;
    fn company_months(&self, window: &TimeWindow) -> Result<Vec<CompanyMonthly>>;
    fn ho_staff(&self) -> Result<Vec<HoStaff>>;

    fn delete_franchise(&self, franchise_id: &str) -> Result<()>;
    fn delete_ho_staff(&self, ho_id: &str) -> Result<()>;
    fn delete_vip_month(&self, month: &str, year: i32) -> Result<()>;
    fn delete_vip_franchise_month(&self, month: &str, year: i32) -> Result<()>;
    fn delete_company_month(&self, month: &str, year: i32) -> Result<()>;
}

/// Severity of a transient, dismissible user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// One transient notification queued for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
}

/// Facade that coordinates the backend, the active time window, the per-kind
/// record collections, and the derived metrics.
///
/// Collections are independent state cells: a failed fetch empties its own
/// cell and queues a notification, and a newer fetch simply overwrites
/// whatever was there (last writer wins). Derived values are recomputed from
/// scratch on demand, so partially-arrived data degrades toward 0 instead of
/// going stale.
pub struct DashboardManager {
    backend: Box<dyn BackendApi>,
    window: TimeWindow,
    sales: Vec<SaleRecord>,
    expenses: Vec<SaleRecord>,
    franchises: Vec<Franchise>,
    vip_months: Vec<VipMonthly>,
    vip_franchise_months: Vec<VipMonthly>,
    company_months: Vec<CompanyMonthly>,
    staff: Vec<HoStaff>,
    searches: BTreeMap<RecordKind, String>,
    pages: BTreeMap<RecordKind, usize>,
    notifications: Vec<Notification>,
}

impl DashboardManager {
    pub fn new(backend: Box<dyn BackendApi>) -> Self {
        Self {
            backend,
            window: TimeWindow::all(),
            sales: Vec::new(),
            expenses: Vec::new(),
            franchises: Vec::new(),
            vip_months: Vec::new(),
            vip_franchise_months: Vec::new(),
            company_months: Vec::new(),
            staff: Vec::new(),
            searches: BTreeMap::new(),
            pages: BTreeMap::new(),
            notifications: Vec::new(),
        }
    }

    pub fn backend(&self) -> &dyn BackendApi {
        self.backend.as_ref()
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Replaces the active window. Every listing drops back to page 1.
    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
        self.pages.clear();
    }

    pub fn search(&self, kind: RecordKind) -> Option<&str> {
        self.searches.get(&kind).map(String::as_str)
    }

    /// Updates a listing's text query and resets that listing to page 1.
    pub fn set_search(&mut self, kind: RecordKind, query: impl Into<String>) {
        let query = query.into();
        if query.trim().is_empty() {
            self.searches.remove(&kind);
        } else {
            self.searches.insert(kind, query);
        }
        self.pages.remove(&kind);
    }

    pub fn page(&self, kind: RecordKind) -> usize {
        self.pages.get(&kind).copied().unwrap_or(1)
    }

    pub fn set_page(&mut self, kind: RecordKind, page: usize) {
        self.pages.insert(kind, page.max(1));
    }

    /// Refreshes every collection. Completion order does not matter; each
    /// cell is updated independently.
    pub fn refresh_all(&mut self) {
        for &kind in RecordKind::all() {
            self.refresh(kind);
        }
    }

    /// Refetches one collection, emptying it and queueing a notification on
    /// failure so derived metrics degrade toward 0 for this cycle.
    pub fn refresh(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::Sales => self.sales = self.fetch(kind, |b, _| b.sales()),
            RecordKind::Expense => self.expenses = self.fetch(kind, |b, _| b.expenses()),
            RecordKind::FranchiseSales => {
                self.franchises = self.fetch(kind, |b, _| b.franchises())
            }
            RecordKind::Vip => self.vip_months = self.fetch(kind, |b, w| b.vip_months(w)),
            RecordKind::VipFranchise => {
                self.vip_franchise_months = self.fetch(kind, |b, w| b.vip_franchise_months(w))
            }
            RecordKind::CompanyRevenue => {
                self.company_months = self.fetch(kind, |b, w| b.company_months(w))
            }
            RecordKind::HoSalary => self.staff = self.fetch(kind, |b, _| b.ho_staff()),
        }
    }

    fn fetch<T>(
        &mut self,
        kind: RecordKind,
        op: impl FnOnce(&dyn BackendApi, &TimeWindow) -> Result<Vec<T>>,
    ) -> Vec<T> {
        match op(self.backend.as_ref(), &self.window) {
            Ok(records) => {
                tracing::debug!(kind = kind.label(), count = records.len(), "fetched");
                records
            }
            Err(err) => {
                tracing::warn!(
                    kind = kind.label(),
                    error = %err,
                    "fetch failed; treating collection as empty"
                );
                self.notify(
                    NoticeKind::Error,
                    format!("Error fetching the {} data", kind.label()),
                );
                Vec::new()
            }
        }
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn expenses(&self) -> &[SaleRecord] {
        &self.expenses
    }

    pub fn franchises(&self) -> &[Franchise] {
        &self.franchises
    }

    pub fn vip_months(&self) -> &[VipMonthly] {
        &self.vip_months
    }

    pub fn vip_franchise_months(&self) -> &[VipMonthly] {
        &self.vip_franchise_months
    }

    pub fn company_months(&self) -> &[CompanyMonthly] {
        &self.company_months
    }

    pub fn staff(&self) -> &[HoStaff] {
        &self.staff
    }

    pub fn filtered_sales(&self) -> Vec<&SaleRecord> {
        filter_records(&self.sales, &self.window, self.search(RecordKind::Sales))
    }

    pub fn filtered_expenses(&self) -> Vec<&SaleRecord> {
        filter_records(&self.expenses, &self.window, self.search(RecordKind::Expense))
    }

    pub fn filtered_franchises(&self) -> Vec<&Franchise> {
        filter_records(
            &self.franchises,
            &self.window,
            self.search(RecordKind::FranchiseSales),
        )
    }

    pub fn filtered_vip_months(&self) -> Vec<&VipMonthly> {
        filter_records(&self.vip_months, &self.window, None)
    }

    pub fn filtered_vip_franchise_months(&self) -> Vec<&VipMonthly> {
        filter_records(&self.vip_franchise_months, &self.window, None)
    }

    pub fn filtered_company_months(&self) -> Vec<&CompanyMonthly> {
        filter_records(&self.company_months, &self.window, None)
    }

    pub fn filtered_staff(&self) -> Vec<&HoStaff> {
        filter_records(&self.staff, &self.window, self.search(RecordKind::HoSalary))
    }

    /// Salary entries across all staff, window-filtered.
    pub fn filtered_salary_entries(&self) -> Vec<&SalaryEntry> {
        self.staff
            .iter()
            .flat_map(|member| member.salary.iter())
            .filter(|entry| self.window.matches(entry.period().as_ref()))
            .collect()
    }

    /// Window-filtered totals for every record kind, recomputed from the
    /// current cells each call.
    pub fn totals_by_kind(&self) -> BTreeMap<RecordKind, TotalsMap> {
        let mut by_kind = BTreeMap::new();
        by_kind.insert(
            RecordKind::Sales,
            reduce(self.filtered_sales(), RecordKind::Sales.fields()),
        );
        by_kind.insert(
            RecordKind::Expense,
            reduce(self.filtered_expenses(), RecordKind::Expense.fields()),
        );
        by_kind.insert(
            RecordKind::FranchiseSales,
            reduce(
                self.filtered_franchises(),
                RecordKind::FranchiseSales.fields(),
            ),
        );
        by_kind.insert(
            RecordKind::Vip,
            reduce(self.filtered_vip_months(), RecordKind::Vip.fields()),
        );
        by_kind.insert(
            RecordKind::VipFranchise,
            reduce(
                self.filtered_vip_franchise_months(),
                RecordKind::VipFranchise.fields(),
            ),
        );
        by_kind.insert(
            RecordKind::CompanyRevenue,
            reduce(
                self.filtered_company_months(),
                RecordKind::CompanyRevenue.fields(),
            ),
        );
        by_kind.insert(
            RecordKind::HoSalary,
            reduce(self.filtered_salary_entries(), RecordKind::HoSalary.fields()),
        );
        by_kind
    }

    /// The dashboard's derived metrics, recomputed from scratch.
    pub fn metrics(&self) -> DerivedMetrics {
        combine(&self.totals_by_kind(), dashboard_formula())
    }

    pub fn delete_franchise(&mut self, franchise_id: &str) -> Result<()> {
        self.backend.delete_franchise(franchise_id)?;
        self.notify(
            NoticeKind::Success,
            format!("Franchise {franchise_id} deleted successfully"),
        );
        self.refresh(RecordKind::FranchiseSales);
        Ok(())
    }

    pub fn delete_ho_staff(&mut self, ho_id: &str) -> Result<()> {
        self.backend.delete_ho_staff(ho_id)?;
        self.notify(
            NoticeKind::Success,
            format!("HO record {ho_id} deleted successfully"),
        );
        self.refresh(RecordKind::HoSalary);
        Ok(())
    }

    pub fn delete_monthly(&mut self, kind: RecordKind, month: &str, year: i32) -> Result<()> {
        match kind {
            RecordKind::Vip => self.backend.delete_vip_month(month, year)?,
            RecordKind::VipFranchise => self.backend.delete_vip_franchise_month(month, year)?,
            RecordKind::CompanyRevenue => self.backend.delete_company_month(month, year)?,
            other => {
                return Err(crate::errors::DashboardError::InvalidInput(format!(
                    "{} records are not keyed by month/year",
                    other.label()
                )))
            }
        }
        self.notify(
            NoticeKind::Success,
            format!("Data for {month} {year} deleted successfully"),
        );
        self.refresh(kind);
        Ok(())
    }

    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind,
            message: message.into(),
        });
    }

    /// Hands the queued notifications to the presentation layer, clearing
    /// the queue.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}
