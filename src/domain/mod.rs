pub mod common;
pub mod franchise;
pub mod monthly;
pub mod sales;
pub mod staff;

pub use common::{Amount, Displayable, Identifiable, Record, RecordKind};
pub use franchise::{Franchise, FranchiseProduct, RoyaltyRecord};
pub use monthly::{BusinessTotals, CompanyMonthly, CompanyTotals, VipMonthly};
pub use sales::SaleRecord;
pub use staff::{HoStaff, SalaryEntry};
