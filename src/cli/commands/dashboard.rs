use crate::cli::commands::flush_notifications;
use crate::cli::output;
use crate::cli::ui::formatting::{format_count, format_money};
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::cli::WindowArgs;
use crate::core::dashboard::DashboardManager;
use crate::errors::CliError;

/// Fetches every collection for the selected window and renders the derived
/// metrics plus a per-collection totals breakdown.
pub fn run(mut manager: DashboardManager, args: &WindowArgs) -> Result<(), CliError> {
    manager.set_window(args.window());
    manager.refresh_all();
    flush_notifications(&mut manager);

    let window = manager.window();
    output::section(format!(
        "Dashboard: {} {}",
        window.month_param(),
        window.year_param()
    ));

    let metrics = manager.metrics();
    let rows = metrics
        .iter()
        .map(|(name, value)| vec![name.to_string(), format_money(value)])
        .collect();
    let table = Table::new(vec![
        TableColumn::left("Metric"),
        TableColumn::amount("Amount"),
    ])
    .with_rows(rows);
    println!("{}", table.render());

    output::section("Collections");
    let mut rows = Vec::new();
    for (kind, totals) in manager.totals_by_kind() {
        for (field, value) in totals.iter() {
            rows.push(vec![
                kind.label().to_string(),
                field.to_string(),
                if is_count_field(field) {
                    format_count(value)
                } else {
                    format_money(value)
                },
            ]);
        }
    }
    let table = Table::new(vec![
        TableColumn::left("Collection"),
        TableColumn::left("Field"),
        TableColumn::amount("Total"),
    ])
    .with_rows(rows);
    println!("{}", table.render());

    Ok(())
}

fn is_count_field(field: &str) -> bool {
    matches!(field, "count" | "days")
}
