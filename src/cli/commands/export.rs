use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use rust_xlsxwriter::Workbook;

use crate::cli::commands::flush_notifications;
use crate::cli::output;
use crate::cli::ListArgs;
use crate::core::dashboard::DashboardManager;
use crate::domain::common::RecordKind;
use crate::errors::{CliError, DashboardError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Sales,
    Expenses,
    Franchises,
    Vip,
    VipFranchise,
    Company,
    Staff,
}

#[derive(Args, Clone)]
pub struct ExportArgs {
    /// Which collection to export
    #[arg(value_enum)]
    pub kind: ExportKind,

    #[command(flatten)]
    pub filters: ListArgs,

    /// Output workbook path
    #[arg(short, long)]
    pub output: PathBuf,
}

enum CellValue {
    Text(String),
    Number(f64),
}

/// Exports the filtered records of one collection to a spreadsheet, the
/// counterpart of the tables' "Download Excel" action.
pub fn run(mut manager: DashboardManager, args: &ExportArgs) -> Result<(), CliError> {
    manager.set_window(args.filters.window.window());

    let (kind, sheet) = match args.kind {
        ExportKind::Sales => (RecordKind::Sales, "SalesData"),
        ExportKind::Expenses => (RecordKind::Expense, "ExpenseData"),
        ExportKind::Franchises => (RecordKind::FranchiseSales, "FranchiseData"),
        ExportKind::Vip => (RecordKind::Vip, "VipData"),
        ExportKind::VipFranchise => (RecordKind::VipFranchise, "VipFranchiseData"),
        ExportKind::Company => (RecordKind::CompanyRevenue, "CompanyData"),
        ExportKind::Staff => (RecordKind::HoSalary, "HOData"),
    };
    if let Some(query) = &args.filters.search {
        manager.set_search(kind, query.clone());
    }
    manager.refresh(kind);
    flush_notifications(&mut manager);

    let (headers, rows) = match args.kind {
        ExportKind::Sales => sale_sheet(manager.filtered_sales()),
        ExportKind::Expenses => sale_sheet(manager.filtered_expenses()),
        ExportKind::Franchises => franchise_sheet(manager.filtered_franchises()),
        ExportKind::Vip => vip_sheet(manager.filtered_vip_months()),
        ExportKind::VipFranchise => vip_sheet(manager.filtered_vip_franchise_months()),
        ExportKind::Company => company_sheet(manager.filtered_company_months()),
        ExportKind::Staff => staff_sheet(manager.filtered_staff()),
    };

    let count = rows.len();
    write_workbook(&args.output, sheet, headers, rows).map_err(CliError::Core)?;
    output::success(format!(
        "Exported {count} records to {}",
        args.output.display()
    ));
    Ok(())
}

type Sheet = (&'static [&'static str], Vec<Vec<CellValue>>);

fn sale_sheet(records: Vec<&crate::domain::sales::SaleRecord>) -> Sheet {
    const HEADERS: &[&str] = &["S No", "Product Name", "Description", "Price", "Count", "Total"];
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, sale)| {
            vec![
                CellValue::Number((idx + 1) as f64),
                CellValue::Text(sale.product_name.clone()),
                CellValue::Text(sale.description.clone()),
                CellValue::Number(sale.price.value()),
                CellValue::Number(sale.count.value()),
                CellValue::Number(sale.total.value()),
            ]
        })
        .collect();
    (HEADERS, rows)
}

fn franchise_sheet(records: Vec<&crate::domain::franchise::Franchise>) -> Sheet {
    const HEADERS: &[&str] = &[
        "S No",
        "Franchise Name",
        "Franchise ID",
        "Total Sales",
        "Total Payment Paid",
        "Total Payment Pending",
    ];
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, franchise)| {
            vec![
                CellValue::Number((idx + 1) as f64),
                CellValue::Text(franchise.franchise_name.clone()),
                CellValue::Text(franchise.franchise_id.clone()),
                CellValue::Number(franchise.total_sales()),
                CellValue::Number(franchise.total_payment_paid()),
                CellValue::Number(franchise.total_payment_pending()),
            ]
        })
        .collect();
    (HEADERS, rows)
}

fn vip_sheet(records: Vec<&crate::domain::monthly::VipMonthly>) -> Sheet {
    const HEADERS: &[&str] = &[
        "S No",
        "Month Year",
        "Collection",
        "Total Payment",
        "Payment Paid",
        "Payment Pending",
    ];
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, upload)| {
            vec![
                CellValue::Number((idx + 1) as f64),
                CellValue::Text(upload.month_year.clone()),
                CellValue::Number(upload.totals.collection.value()),
                CellValue::Number(upload.totals.total_payment.value()),
                CellValue::Number(upload.totals.payment_paid.value()),
                CellValue::Number(upload.totals.payment_pending.value()),
            ]
        })
        .collect();
    (HEADERS, rows)
}

fn company_sheet(records: Vec<&crate::domain::monthly::CompanyMonthly>) -> Sheet {
    const HEADERS: &[&str] = &[
        "S No",
        "Month Year",
        "Course Fee",
        "Company Revenue",
        "Payment Paid",
        "Payment Pending",
    ];
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, upload)| {
            vec![
                CellValue::Number((idx + 1) as f64),
                CellValue::Text(upload.month_year.clone()),
                CellValue::Number(upload.totals.course_fee.value()),
                CellValue::Number(upload.totals.company_revenue.value()),
                CellValue::Number(upload.totals.payment_paid.value()),
                CellValue::Number(upload.totals.payment_pending.value()),
            ]
        })
        .collect();
    (HEADERS, rows)
}

fn staff_sheet(records: Vec<&crate::domain::staff::HoStaff>) -> Sheet {
    const HEADERS: &[&str] = &["S No", "HO Name", "HO ID", "Salary Records"];
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, member)| {
            vec![
                CellValue::Number((idx + 1) as f64),
                CellValue::Text(member.ho_name.clone()),
                CellValue::Text(member.ho_id.clone()),
                CellValue::Number(member.salary.len() as f64),
            ]
        })
        .collect();
    (HEADERS, rows)
}

fn write_workbook(
    path: &Path,
    sheet_name: &str,
    headers: &[&str],
    rows: Vec<Vec<CellValue>>,
) -> Result<(), DashboardError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|err| DashboardError::Storage(err.to_string()))?;

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|err| DashboardError::Storage(err.to_string()))?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let (row_num, col_num) = ((row_idx + 1) as u32, col as u16);
            match cell {
                CellValue::Text(text) => worksheet.write_string(row_num, col_num, text),
                CellValue::Number(number) => worksheet.write_number(row_num, col_num, *number),
            }
            .map_err(|err| DashboardError::Storage(err.to_string()))?;
        }
    }

    workbook
        .save(path)
        .map_err(|err| DashboardError::Storage(err.to_string()))?;
    Ok(())
}
