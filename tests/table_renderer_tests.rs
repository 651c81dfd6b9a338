use franchise_core::cli::ui::table_renderer::{render_cell, Alignment, Table, TableColumn};

fn basic_table(columns: Vec<TableColumn>, rows: Vec<Vec<String>>) -> Table {
    Table::new(columns).with_rows(rows)
}

#[test]
fn width_calculation_respects_constraints() {
    let columns = vec![
        TableColumn {
            header: "Franchise".into(),
            min_width: 4,
            max_width: Some(8),
            alignment: Alignment::Left,
        },
        TableColumn {
            header: "Notes".into(),
            min_width: 10,
            max_width: None,
            alignment: Alignment::Left,
        },
    ];

    let rows = vec![
        vec!["NorthBranchMain".into(), "Short".into()],
        vec!["BB".into(), "Detailed overview entry".into()],
    ];

    let table = basic_table(columns, rows);
    let widths = table.compute_widths();

    assert_eq!(widths, vec![8, 23]);
}

#[test]
fn render_cell_respects_alignment() {
    let left = render_cell("AB", 4, &Alignment::Left, 1);
    assert_eq!(left, " AB   ");

    let right = render_cell("AB", 4, &Alignment::Right, 1);
    assert_eq!(right, "   AB ");

    let center = render_cell("X", 5, &Alignment::Center, 1);
    assert_eq!(center, "   X   ");
}

#[test]
fn truncation_adds_ellipsis() {
    let columns = vec![TableColumn {
        header: "DATA".into(),
        min_width: 3,
        max_width: Some(5),
        alignment: Alignment::Left,
    }];

    let rows = vec![vec!["ExtremelyLongValue".to_string()]];
    let mut table = basic_table(columns, rows);
    table.show_headers = false;
    table.padding = 0;

    let rendered = table.render();
    assert_eq!(rendered, "Extr…");
}

#[test]
fn full_render_has_header_rule_and_rows() {
    let columns = vec![
        TableColumn::amount("S No"),
        TableColumn::left("Product Name"),
        TableColumn::amount("Total"),
    ];
    let rows = vec![
        vec!["1".into(), "Starter Kit".into(), "₹100".into()],
        vec!["2".into(), "Refill Pack".into(), "₹50".into()],
    ];
    let rendered = basic_table(columns, rows).render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("S No"));
    assert!(lines[0].contains("Product Name"));
    assert!(lines[2].contains("Starter Kit"));
    assert!(lines[3].contains("Refill Pack"));
    // the rule spans at least the header width
    assert!(lines[1].chars().count() >= lines[0].chars().count());
}

#[test]
fn missing_cells_render_as_blanks() {
    let columns = vec![TableColumn::left("A"), TableColumn::left("B")];
    let rows = vec![vec!["only".into()]];
    let rendered = basic_table(columns, rows).render();
    let last = rendered.lines().last().unwrap();
    assert!(last.contains("only"));
}
