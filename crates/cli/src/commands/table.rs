//! `table` command: run a dataset through the table engine and print it.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use souq_core::table::{
    Align, CellValue, PageRequest, RenderOptions, RenderedTable, SortDirection, TableEngine,
};
use unicode_width::UnicodeWidthStr;

use super::{check_column, parse_pair};
use crate::dataset;

/// Arguments of `souq-cli table`.
#[derive(Debug, Args)]
pub struct TableArgs {
    /// YAML or JSON file holding a list of rows
    pub file: PathBuf,

    /// Name of the list to show when the file holds several
    #[arg(short, long)]
    pub table: Option<String>,

    /// Case-insensitive search across every column
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Substring filter on a column (repeatable)
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub filters: Vec<(String, String)>,

    /// Exact-match filter on a column (repeatable)
    #[arg(short, long = "pick", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub picks: Vec<(String, String)>,

    /// Columns to show, in order (default: every key)
    #[arg(short, long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Page to show (1-based); paging is off unless set
    #[arg(long)]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long, default_value_t = 25)]
    pub per_page: usize,

    /// Print the rendered table as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the command.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded, an argument names an
/// unknown column, or stdout is closed.
pub fn run(args: &TableArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows = dataset::load(&args.file, args.table.as_deref())?;
    let table = render(args, &rows)?;

    let mut out = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &table)?;
        writeln!(out)?;
    } else {
        out.write_all(format_table(&table).as_bytes())?;
    }
    Ok(())
}

fn render(
    args: &TableArgs,
    rows: &[souq_core::table::Record],
) -> Result<RenderedTable, Box<dyn std::error::Error>> {
    let mut columns = dataset::columns(rows);
    let known: Vec<String> = columns.iter().map(|column| column.field.clone()).collect();

    if !args.columns.is_empty() {
        for key in &args.columns {
            check_column(key, &known)?;
        }
        columns = args
            .columns
            .iter()
            .filter_map(|key| columns.iter().find(|column| &column.field == key).cloned())
            .collect();
    }

    let mut engine = TableEngine::new(columns);
    engine.set_search(args.search.as_str());
    for (key, value) in &args.filters {
        check_column(key, &known)?;
        engine.apply_filter(key.clone(), value.as_str());
    }
    for (key, value) in &args.picks {
        check_column(key, &known)?;
        engine.pick_value(key.clone(), &CellValue::from(value.as_str()));
    }
    if let Some(key) = &args.sort {
        check_column(key, &known)?;
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        engine.set_sort(key.clone(), direction);
    }

    Ok(engine.render(
        rows,
        &RenderOptions {
            page: args.page.map(|number| PageRequest {
                number,
                per_page: args.per_page,
            }),
            ..RenderOptions::default()
        },
    ))
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(text.width());
    match align {
        Align::Right => format!("{}{text}", " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
        }
        Align::Left => format!("{text}{}", " ".repeat(fill)),
    }
}

/// Plain-text rendering: header, rule, rows, and a summary line.
#[must_use]
pub fn format_table(table: &RenderedTable) -> String {
    let headers: Vec<String> = table
        .columns
        .iter()
        .map(|column| match column.sort {
            Some(direction) => format!("{} {}", column.label, direction.arrow()),
            None => column.label.clone(),
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.text.width());
        }
    }

    let mut lines = Vec::with_capacity(table.rows.len() + 3);
    lines.push(
        headers
            .iter()
            .zip(&widths)
            .zip(&table.columns)
            .map(|((header, width), column)| pad(header, *width, column.align))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &table.rows {
        lines.push(
            row.cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad(&cell.text, *width, cell.align))
                .collect::<Vec<_>>()
                .join("  "),
        );
    }

    let mut summary = format!("{} of {} rows", table.matched_rows, table.total_rows);
    if let Some(page) = table.page {
        summary.push_str(&format!(", page {} of {}", page.number, page.total_pages.max(1)));
    }
    lines.push(summary);

    let mut text = lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: TableArgs,
    }

    fn args(argv: &[&str]) -> TableArgs {
        let mut full = vec!["souq-cli", "rows.yaml"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    fn rows() -> Vec<souq_core::table::Record> {
        dataset::parse(
            json!([
                {"name": "Sukkari Dates", "category": "dates", "price": 45, "status": "active"},
                {"name": "Saudi Coffee", "category": "coffee", "price": 32.5, "status": "inactive"},
                {"name": "Ajwa Dates", "category": "dates", "price": 85, "status": "active"},
                {"name": "Cardamom", "category": "spices", "price": 9.75, "status": "active"}
            ]),
            None,
        )
        .unwrap()
    }

    fn names(table: &RenderedTable) -> Vec<String> {
        let name = table.columns.iter().position(|c| c.key == "name").unwrap();
        table.rows.iter().map(|row| row.cells[name].text.clone()).collect()
    }

    #[test]
    fn test_sort_desc_by_price() {
        let table = render(&args(&["--sort", "price", "--desc"]), &rows()).unwrap();
        assert_eq!(
            names(&table),
            vec!["Ajwa Dates", "Sukkari Dates", "Saudi Coffee", "Cardamom"]
        );
    }

    #[test]
    fn test_search_filter_and_pick() {
        let table = render(&args(&["-s", "dates", "-f", "name=ajwa"]), &rows()).unwrap();
        assert_eq!(names(&table), vec!["Ajwa Dates"]);

        let typed = render(&args(&["-f", "status=active"]), &rows()).unwrap();
        assert_eq!(typed.matched_rows, 4);
        let picked = render(&args(&["-p", "status=active"]), &rows()).unwrap();
        assert_eq!(picked.matched_rows, 3);
    }

    #[test]
    fn test_unknown_column_rejected() {
        assert!(render(&args(&["--sort", "colour"]), &rows()).is_err());
        assert!(render(&args(&["-f", "colour=red"]), &rows()).is_err());
    }

    #[test]
    fn test_column_selection_and_paging() {
        let table = render(
            &args(&["-c", "price,name", "--page", "2", "--per-page", "3"]),
            &rows(),
        )
        .unwrap();
        let keys: Vec<&str> = table.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["price", "name"]);
        assert_eq!(names(&table), vec!["Cardamom"]);
        assert_eq!(table.page.unwrap().total_pages, 2);
    }

    #[test]
    fn test_format_table_aligns_numbers_right() {
        let table = render(&args(&["-c", "name,price", "--sort", "name"]), &rows()).unwrap();
        let text = format_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name ▲         price");
        assert_eq!(lines[2], "Ajwa Dates        85");
        assert_eq!(lines[3], "Cardamom        9.75");
        assert_eq!(lines.last().copied(), Some("4 of 4 rows"));
    }
}
