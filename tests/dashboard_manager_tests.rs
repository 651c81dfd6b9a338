use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};

use franchise_core::core::dashboard::{BackendApi, DashboardManager, NoticeKind};
use franchise_core::core::metrics::{PROFIT_LOSS, TOTAL_EXPENSE, TOTAL_INCOME};
use franchise_core::core::window::{MonthFilter, TimeWindow, YearFilter};
use franchise_core::domain::common::RecordKind;
use franchise_core::domain::franchise::{Franchise, FranchiseProduct};
use franchise_core::domain::monthly::{BusinessTotals, CompanyMonthly, CompanyTotals, VipMonthly};
use franchise_core::domain::sales::SaleRecord;
use franchise_core::domain::staff::{HoStaff, SalaryEntry};
use franchise_core::domain::Amount;
use franchise_core::errors::{DashboardError, Result};

/// In-memory stand-in for the REST backend. A `None` collection simulates a
/// fetch failure; the shared state lets tests mutate the backend between
/// refreshes.
#[derive(Default)]
struct MockState {
    sales: RefCell<Option<Vec<SaleRecord>>>,
    expenses: RefCell<Option<Vec<SaleRecord>>>,
    franchises: RefCell<Option<Vec<Franchise>>>,
    vip: RefCell<Option<Vec<VipMonthly>>>,
    vip_franchise: RefCell<Option<Vec<VipMonthly>>>,
    company: RefCell<Option<Vec<CompanyMonthly>>>,
    staff: RefCell<Option<Vec<HoStaff>>>,
    deleted: RefCell<Vec<String>>,
}

#[derive(Clone, Default)]
struct MockBackend(Rc<MockState>);

impl MockBackend {
    fn collection<T: Clone>(cell: &RefCell<Option<Vec<T>>>, name: &str) -> Result<Vec<T>> {
        cell.borrow()
            .clone()
            .ok_or_else(|| DashboardError::Fetch(format!("{name} unreachable")))
    }
}

impl BackendApi for MockBackend {
    fn sales(&self) -> Result<Vec<SaleRecord>> {
        Self::collection(&self.0.sales, "sales")
    }

    fn expenses(&self) -> Result<Vec<SaleRecord>> {
        Self::collection(&self.0.expenses, "expenses")
    }

    fn franchises(&self) -> Result<Vec<Franchise>> {
        Self::collection(&self.0.franchises, "franchises")
    }

    fn vip_months(&self, _window: &TimeWindow) -> Result<Vec<VipMonthly>> {
        Self::collection(&self.0.vip, "vip")
    }

    fn vip_franchise_months(&self, _window: &TimeWindow) -> Result<Vec<VipMonthly>> {
        Self::collection(&self.0.vip_franchise, "vip franchise")
    }

    fn company_months(&self, _window: &TimeWindow) -> Result<Vec<CompanyMonthly>> {
        Self::collection(&self.0.company, "company")
    }

    fn ho_staff(&self) -> Result<Vec<HoStaff>> {
        Self::collection(&self.0.staff, "staff")
    }

    fn delete_franchise(&self, franchise_id: &str) -> Result<()> {
        self.0.deleted.borrow_mut().push(format!("franchise:{franchise_id}"));
        Ok(())
    }

    fn delete_ho_staff(&self, ho_id: &str) -> Result<()> {
        self.0.deleted.borrow_mut().push(format!("staff:{ho_id}"));
        Ok(())
    }

    fn delete_vip_month(&self, month: &str, year: i32) -> Result<()> {
        self.0.deleted.borrow_mut().push(format!("vip:{month}:{year}"));
        Ok(())
    }

    fn delete_vip_franchise_month(&self, month: &str, year: i32) -> Result<()> {
        self.0
            .deleted
            .borrow_mut()
            .push(format!("vipfranchise:{month}:{year}"));
        Ok(())
    }

    fn delete_company_month(&self, month: &str, year: i32) -> Result<()> {
        self.0
            .deleted
            .borrow_mut()
            .push(format!("company:{month}:{year}"));
        Ok(())
    }
}

fn january(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

/// Backend pre-loaded with one January 2024 record per collection.
fn full_backend() -> MockBackend {
    let backend = MockBackend::default();
    let state = &backend.0;

    *state.sales.borrow_mut() = Some(vec![
        SaleRecord::new("Starter Kit", "intro bundle", 100.0, 1.0).recorded_at(january(10)),
    ]);
    *state.expenses.borrow_mut() = Some(vec![
        SaleRecord::new("Stationery", "office supplies", 80.0, 1.0).recorded_at(january(12)),
    ]);
    *state.franchises.borrow_mut() = Some(vec![Franchise {
        franchise_id: "FR-001".into(),
        franchise_name: "North Branch".into(),
        products: vec![FranchiseProduct {
            total: Amount(400.0),
            payment_paid: Amount(250.0),
            payment_pending: Amount(150.0),
            ..Default::default()
        }],
        ..Default::default()
    }]);
    *state.vip.borrow_mut() = Some(vec![VipMonthly::new(
        "January",
        2024,
        BusinessTotals {
            payment_paid: Amount(200.0),
            ..Default::default()
        },
    )]);
    *state.vip_franchise.borrow_mut() = Some(vec![VipMonthly::new(
        "January",
        2024,
        BusinessTotals {
            payment_paid: Amount(150.0),
            ..Default::default()
        },
    )]);
    *state.company.borrow_mut() = Some(vec![CompanyMonthly::new(
        "January",
        2024,
        CompanyTotals {
            payment_paid: Amount(500.0),
            ..Default::default()
        },
    )]);
    *state.staff.borrow_mut() = Some(vec![HoStaff {
        ho_id: "HO-7".into(),
        ho_name: "Asha".into(),
        salary: vec![SalaryEntry {
            month: "January".into(),
            year: Some(2024),
            salary: Amount(35.0),
            days: Amount(2.0),
            total: Amount(70.0),
        }],
        ..Default::default()
    }]);

    backend
}

#[test]
fn metrics_follow_the_dashboard_formula() {
    let backend = full_backend();
    let mut manager = DashboardManager::new(Box::new(backend));
    manager.refresh_all();

    let metrics = manager.metrics();
    // income: company 500 + franchise paid 250 + sales 100
    assert_eq!(metrics.value(TOTAL_INCOME), 850.0);
    // expense: vip 200 + vip-franchise 150 + expenses 80 + salary 70
    assert_eq!(metrics.value(TOTAL_EXPENSE), 500.0);
    assert_eq!(metrics.value(PROFIT_LOSS), 350.0);
}

#[test]
fn failed_collections_degrade_metrics_toward_zero() {
    let backend = full_backend();
    *backend.0.company.borrow_mut() = None;
    *backend.0.vip.borrow_mut() = None;

    let mut manager = DashboardManager::new(Box::new(backend));
    manager.refresh_all();

    let metrics = manager.metrics();
    assert_eq!(metrics.value(TOTAL_INCOME), 350.0);
    assert_eq!(metrics.value(TOTAL_EXPENSE), 300.0);

    let notes = manager.drain_notifications();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.kind == NoticeKind::Error));
    assert!(notes.iter().any(|n| n.message.contains("Company Revenue")));
    assert!(!manager.has_notifications());
}

#[test]
fn a_failed_refresh_overwrites_stale_data_with_empty() {
    let backend = full_backend();
    let handle = backend.clone();
    let mut manager = DashboardManager::new(Box::new(backend));

    manager.refresh_all();
    assert_eq!(manager.sales().len(), 1);

    *handle.0.sales.borrow_mut() = None;
    manager.refresh(RecordKind::Sales);
    assert!(manager.sales().is_empty());
    assert_eq!(manager.metrics().value(TOTAL_INCOME), 750.0);
}

#[test]
fn a_newer_fetch_simply_replaces_the_cell() {
    let backend = full_backend();
    let handle = backend.clone();
    let mut manager = DashboardManager::new(Box::new(backend));
    manager.refresh_all();

    *handle.0.sales.borrow_mut() = Some(vec![
        SaleRecord::new("Replacement", "", 10.0, 1.0).recorded_at(january(20)),
        SaleRecord::new("Another", "", 20.0, 1.0).recorded_at(january(21)),
    ]);
    manager.refresh(RecordKind::Sales);

    assert_eq!(manager.sales().len(), 2);
    assert_eq!(manager.metrics().value(TOTAL_INCOME), 780.0);
}

#[test]
fn window_changes_reset_every_page_to_one() {
    let mut manager = DashboardManager::new(Box::new(full_backend()));
    manager.set_page(RecordKind::Sales, 4);
    manager.set_page(RecordKind::Vip, 2);

    manager.set_window(TimeWindow::new(MonthFilter::All, YearFilter::Year(2024)));
    assert_eq!(manager.page(RecordKind::Sales), 1);
    assert_eq!(manager.page(RecordKind::Vip), 1);
}

#[test]
fn search_changes_reset_only_their_own_page() {
    let mut manager = DashboardManager::new(Box::new(full_backend()));
    manager.set_page(RecordKind::Sales, 4);
    manager.set_page(RecordKind::Expense, 3);

    manager.set_search(RecordKind::Sales, "kit");
    assert_eq!(manager.page(RecordKind::Sales), 1);
    assert_eq!(manager.page(RecordKind::Expense), 3);
    assert_eq!(manager.search(RecordKind::Sales), Some("kit"));

    manager.set_search(RecordKind::Sales, "   ");
    assert_eq!(manager.search(RecordKind::Sales), None);
}

#[test]
fn constrained_window_drops_undated_kinds_from_totals() {
    let mut manager = DashboardManager::new(Box::new(full_backend()));
    manager.set_window(TimeWindow::new(
        MonthFilter::Name("January".into()),
        YearFilter::Year(2024),
    ));
    manager.refresh_all();

    // Franchise rollups carry no temporal key, so they fail closed and the
    // income metric loses their contribution.
    assert_eq!(manager.metrics().value(TOTAL_INCOME), 600.0);

    manager.set_window(TimeWindow::all());
    assert_eq!(manager.metrics().value(TOTAL_INCOME), 850.0);
}

#[test]
fn monthly_deletes_route_to_the_right_endpoint_and_refresh() {
    let backend = full_backend();
    let handle = backend.clone();
    let mut manager = DashboardManager::new(Box::new(backend));
    manager.refresh_all();

    manager.delete_monthly(RecordKind::Vip, "January", 2024).unwrap();
    manager
        .delete_monthly(RecordKind::CompanyRevenue, "January", 2024)
        .unwrap();
    manager.delete_franchise("FR-001").unwrap();

    let deleted = handle.0.deleted.borrow().clone();
    assert_eq!(
        deleted,
        vec![
            "vip:January:2024".to_string(),
            "company:January:2024".to_string(),
            "franchise:FR-001".to_string(),
        ]
    );

    let notes = manager.drain_notifications();
    assert!(notes.iter().all(|n| n.kind == NoticeKind::Success));
    assert_eq!(notes.len(), 3);
}

#[test]
fn monthly_delete_rejects_kinds_without_month_keys() {
    let mut manager = DashboardManager::new(Box::new(full_backend()));
    let err = manager
        .delete_monthly(RecordKind::Sales, "January", 2024)
        .unwrap_err();
    assert!(matches!(err, DashboardError::InvalidInput(_)));
}
