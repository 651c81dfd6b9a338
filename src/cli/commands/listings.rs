use crate::cli::commands::flush_notifications;
use crate::cli::output;
use crate::cli::ui::formatting::{format_count, format_money};
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::cli::{ListArgs, SearchArgs, WindowArgs};
use crate::config::Config;
use crate::core::dashboard::DashboardManager;
use crate::core::paginate::{paginate, total_pages};
use crate::domain::common::RecordKind;
use crate::domain::franchise::{Franchise, RoyaltyRecord};
use crate::domain::monthly::{CompanyMonthly, VipMonthly};
use crate::domain::sales::SaleRecord;
use crate::domain::staff::{HoStaff, SalaryEntry};
use crate::errors::CliError;

/// Renders one page of a filtered listing with serial numbers continuing
/// across pages, plus a pagination footer when there is more than one page.
fn render_listing<R>(
    title: &str,
    columns: Vec<TableColumn>,
    records: &[&R],
    page: usize,
    page_size: usize,
    row: impl Fn(usize, &R) -> Vec<String>,
) {
    output::section(title);
    let pages = total_pages(records.len(), page_size);
    let page_records = paginate(records, page_size, page);

    if page_records.is_empty() {
        output::info("No Records Found");
    } else {
        let offset = (page - 1) * page_size;
        let rows = page_records
            .iter()
            .enumerate()
            .map(|(idx, record)| row(offset + idx + 1, record))
            .collect();
        let table = Table::new(columns).with_rows(rows);
        println!("{}", table.render());
    }

    if pages > 1 {
        output::info(format!(
            "Page {page} of {pages} ({} records)",
            records.len()
        ));
    }
}

pub fn sales(
    manager: DashboardManager,
    args: &ListArgs,
    config: &Config,
) -> Result<(), CliError> {
    sale_listing("View Sales", RecordKind::Sales, manager, args, config)
}

pub fn expenses(
    manager: DashboardManager,
    args: &ListArgs,
    config: &Config,
) -> Result<(), CliError> {
    sale_listing("View Expense", RecordKind::Expense, manager, args, config)
}

fn sale_listing(
    title: &str,
    kind: RecordKind,
    mut manager: DashboardManager,
    args: &ListArgs,
    config: &Config,
) -> Result<(), CliError> {
    manager.set_window(args.window.window());
    if let Some(query) = &args.search {
        manager.set_search(kind, query.clone());
    }
    manager.set_page(kind, args.page);
    manager.refresh(kind);
    flush_notifications(&mut manager);

    let filtered = match kind {
        RecordKind::Expense => manager.filtered_expenses(),
        _ => manager.filtered_sales(),
    };
    render_listing(
        title,
        sale_columns(),
        &filtered,
        manager.page(kind),
        config.page_size,
        sale_row,
    );
    Ok(())
}

fn sale_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::amount("S No"),
        TableColumn::left("Product Name"),
        TableColumn::left("Description").capped(40),
        TableColumn::amount("Price"),
        TableColumn::amount("Count"),
        TableColumn::amount("Total"),
    ]
}

fn sale_row(serial: usize, sale: &SaleRecord) -> Vec<String> {
    vec![
        serial.to_string(),
        sale.product_name.clone(),
        sale.description.clone(),
        format_money(sale.price.value()),
        format_count(sale.count.value()),
        format_money(sale.total.value()),
    ]
}

pub fn franchises(
    mut manager: DashboardManager,
    args: &SearchArgs,
    config: &Config,
) -> Result<(), CliError> {
    let kind = RecordKind::FranchiseSales;
    if let Some(query) = &args.search {
        manager.set_search(kind, query.clone());
    }
    manager.set_page(kind, args.page);
    manager.refresh(kind);
    flush_notifications(&mut manager);

    let filtered = manager.filtered_franchises();
    render_listing(
        "Franchise Summary",
        vec![
            TableColumn::amount("S No"),
            TableColumn::left("Franchise Name"),
            TableColumn::left("Franchise ID"),
            TableColumn::amount("Total Sales"),
            TableColumn::amount("Total Payment Paid"),
            TableColumn::amount("Total Payment Pending"),
        ],
        &filtered,
        manager.page(kind),
        config.page_size,
        franchise_row,
    );
    Ok(())
}

fn franchise_row(serial: usize, franchise: &Franchise) -> Vec<String> {
    vec![
        serial.to_string(),
        franchise.franchise_name.clone(),
        franchise.franchise_id.clone(),
        format_money(franchise.total_sales()),
        format_money(franchise.total_payment_paid()),
        format_money(franchise.total_payment_pending()),
    ]
}

pub fn royalty(mut manager: DashboardManager, franchise_id: &str) -> Result<(), CliError> {
    manager.refresh(RecordKind::FranchiseSales);
    flush_notifications(&mut manager);

    let franchise = manager
        .franchises()
        .iter()
        .find(|f| f.franchise_id == franchise_id)
        .ok_or_else(|| CliError::Input(format!("franchise {franchise_id} not found")))?;

    let records: Vec<&RoyaltyRecord> = franchise.financial_records.iter().collect();
    render_listing(
        &format!("Royalty Details for {}", franchise.franchise_name),
        vec![
            TableColumn::amount("S No"),
            TableColumn::left("Month"),
            TableColumn::amount("Year"),
            TableColumn::amount("Royalty Amount"),
            TableColumn::amount("Amount Paid"),
            TableColumn::amount("Amount Pending"),
        ],
        &records,
        1,
        records.len().max(1),
        royalty_row,
    );
    Ok(())
}

fn royalty_row(serial: usize, record: &RoyaltyRecord) -> Vec<String> {
    vec![
        serial.to_string(),
        record.month.clone(),
        record.year.map(|y| y.to_string()).unwrap_or_default(),
        format_money(record.royalty_amount.value()),
        format_money(record.amount_paid.value()),
        format_money(record.amount_pending.value()),
    ]
}

pub fn vip(
    manager: DashboardManager,
    args: &WindowArgs,
    config: &Config,
) -> Result<(), CliError> {
    monthly_listing("VIP Business", RecordKind::Vip, manager, args, config)
}

pub fn vip_franchise(
    manager: DashboardManager,
    args: &WindowArgs,
    config: &Config,
) -> Result<(), CliError> {
    monthly_listing(
        "VIP Franchise Business",
        RecordKind::VipFranchise,
        manager,
        args,
        config,
    )
}

fn monthly_listing(
    title: &str,
    kind: RecordKind,
    mut manager: DashboardManager,
    args: &WindowArgs,
    config: &Config,
) -> Result<(), CliError> {
    manager.set_window(args.window());
    manager.refresh(kind);
    flush_notifications(&mut manager);

    let filtered = match kind {
        RecordKind::VipFranchise => manager.filtered_vip_franchise_months(),
        _ => manager.filtered_vip_months(),
    };
    render_listing(
        title,
        vec![
            TableColumn::amount("S No"),
            TableColumn::left("Month Year"),
            TableColumn::amount("Collection"),
            TableColumn::amount("Total Payment"),
            TableColumn::amount("Payment Paid"),
            TableColumn::amount("Payment Pending"),
        ],
        &filtered,
        1,
        config.page_size,
        vip_row,
    );
    Ok(())
}

fn vip_row(serial: usize, upload: &VipMonthly) -> Vec<String> {
    vec![
        serial.to_string(),
        upload.month_year.clone(),
        format_money(upload.totals.collection.value()),
        format_money(upload.totals.total_payment.value()),
        format_money(upload.totals.payment_paid.value()),
        format_money(upload.totals.payment_pending.value()),
    ]
}

pub fn company(
    mut manager: DashboardManager,
    args: &WindowArgs,
    config: &Config,
) -> Result<(), CliError> {
    let kind = RecordKind::CompanyRevenue;
    manager.set_window(args.window());
    manager.refresh(kind);
    flush_notifications(&mut manager);

    let filtered = manager.filtered_company_months();
    render_listing(
        "Company Revenue",
        vec![
            TableColumn::amount("S No"),
            TableColumn::left("Month Year"),
            TableColumn::amount("Course Fee"),
            TableColumn::amount("Company Revenue"),
            TableColumn::amount("Payment Paid"),
            TableColumn::amount("Payment Pending"),
        ],
        &filtered,
        1,
        config.page_size,
        company_row,
    );
    Ok(())
}

fn company_row(serial: usize, upload: &CompanyMonthly) -> Vec<String> {
    vec![
        serial.to_string(),
        upload.month_year.clone(),
        format_money(upload.totals.course_fee.value()),
        format_money(upload.totals.company_revenue.value()),
        format_money(upload.totals.payment_paid.value()),
        format_money(upload.totals.payment_pending.value()),
    ]
}

pub fn staff(
    mut manager: DashboardManager,
    args: &SearchArgs,
    config: &Config,
) -> Result<(), CliError> {
    let kind = RecordKind::HoSalary;
    if let Some(query) = &args.search {
        manager.set_search(kind, query.clone());
    }
    manager.set_page(kind, args.page);
    manager.refresh(kind);
    flush_notifications(&mut manager);

    let filtered = manager.filtered_staff();
    render_listing(
        "HO Staff",
        vec![
            TableColumn::amount("S No"),
            TableColumn::left("HO Name"),
            TableColumn::left("HO ID"),
            TableColumn::amount("Salary Records"),
        ],
        &filtered,
        manager.page(kind),
        config.page_size,
        staff_row,
    );
    Ok(())
}

fn staff_row(serial: usize, member: &HoStaff) -> Vec<String> {
    vec![
        serial.to_string(),
        member.ho_name.clone(),
        member.ho_id.clone(),
        member.salary.len().to_string(),
    ]
}

pub fn salary(mut manager: DashboardManager, ho_id: &str) -> Result<(), CliError> {
    manager.refresh(RecordKind::HoSalary);
    flush_notifications(&mut manager);

    let member = manager
        .staff()
        .iter()
        .find(|s| s.ho_id == ho_id)
        .ok_or_else(|| CliError::Input(format!("HO record {ho_id} not found")))?;

    let entries: Vec<&SalaryEntry> = member.salary.iter().collect();
    render_listing(
        &format!("Salary Details for {}", member.ho_name),
        vec![
            TableColumn::amount("S No"),
            TableColumn::left("Month"),
            TableColumn::amount("Year"),
            TableColumn::amount("Salary"),
            TableColumn::amount("Days"),
            TableColumn::amount("Total"),
        ],
        &entries,
        1,
        entries.len().max(1),
        salary_row,
    );
    Ok(())
}

fn salary_row(serial: usize, entry: &SalaryEntry) -> Vec<String> {
    vec![
        serial.to_string(),
        entry.month.clone(),
        entry.year.map(|y| y.to_string()).unwrap_or_default(),
        format_money(entry.salary.value()),
        format_count(entry.days.value()),
        format_money(entry.total.value()),
    ]
}
