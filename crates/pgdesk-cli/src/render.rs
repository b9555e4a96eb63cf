use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use pgdesk::{NULL_TEXT, ResultGrid};

pub fn grid_table(grid: &ResultGrid) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(grid.header.iter().map(|h| {
            Cell::new(h)
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan)
        }));

    for r in 0..grid.row_count() {
        table.add_row((0..grid.column_count()).map(|c| match grid.cell(r, c) {
            Some(NULL_TEXT) => Cell::new(NULL_TEXT).fg(Color::DarkGrey),
            Some(v) => Cell::new(v),
            None => Cell::new(""),
        }));
    }

    table
}

pub fn print_grid(grid: &ResultGrid) {
    if grid.header.is_empty() {
        println!("{}", "(no columns)".dimmed());
        return;
    }
    println!("{}", grid_table(grid));
    let noun = if grid.row_count() == 1 { "row" } else { "rows" };
    println!("{}", format!("({} {noun})", grid.row_count()).dimmed());
}

pub fn print_sql(sql: &str) {
    println!("{}", sql.cyan());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_contains_header_and_cells() {
        let mut grid = ResultGrid::new(vec!["id".into(), "name".into()]);
        grid.push_row(vec!["1".into(), "Widget".into()]);
        grid.push_row(vec!["2".into(), NULL_TEXT.into()]);

        let table = grid_table(&grid);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        for text in ["id", "name", "Widget", "NULL"] {
            assert!(rendered.contains(text), "missing {text} in\n{rendered}");
        }
    }

    #[test]
    fn short_rows_are_padded_to_the_header() {
        let mut grid = ResultGrid::new(vec!["id".into(), "name".into()]);
        grid.push_row(vec!["7".into()]);

        let table = grid_table(&grid);
        let row = table.row_iter().next().unwrap();
        assert_eq!(row.cell_count(), 2);
    }
}
