pub mod dashboard;
pub mod filter;
pub mod metrics;
pub mod paginate;
pub mod totals;
pub mod window;

pub use dashboard::{BackendApi, DashboardManager, Notification, NoticeKind};
pub use filter::{filter_records, matches_query};
pub use metrics::{combine, dashboard_formula, DerivedMetrics, Formula, MetricTerm, Sign};
pub use paginate::{paginate, total_pages};
pub use totals::{reduce, TotalsMap};
pub use window::{MonthFilter, Period, TimeWindow, YearFilter};
