//! Fixed-width listings for table output

use console::{pad_str, style, Alignment};

struct Column {
    header: &'static str,
    width: usize,
    align: Alignment,
}

/// Column layout for one listing
///
/// Cells are padded or cut to their column width by display width, so
/// styled cells line up with plain ones. A left-aligned last column is
/// printed as-is for free text such as descriptions.
#[derive(Default)]
pub struct Table {
    columns: Vec<Column>,
    indent: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Left margin for tables nested under a section
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn column(mut self, header: &'static str, width: usize) -> Self {
        self.columns.push(Column {
            header,
            width,
            align: Alignment::Left,
        });
        self
    }

    /// Right-aligned column for counts and ratios
    pub fn numeric(mut self, header: &'static str, width: usize) -> Self {
        self.columns.push(Column {
            header,
            width,
            align: Alignment::Right,
        });
        self
    }

    pub fn header(&self) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|c| style(c.header).bold().to_string())
            .collect();
        self.row(&cells)
    }

    /// Dashes spanning every column and separator
    pub fn rule(&self) -> String {
        let width: usize = self.columns.iter().map(|c| c.width).sum::<usize>()
            + self.columns.len().saturating_sub(1);
        format!("{}{}", self.margin(), "-".repeat(width))
    }

    pub fn row(&self, cells: &[String]) -> String {
        let last = self.columns.len().saturating_sub(1);
        let padded: Vec<String> = self
            .columns
            .iter()
            .zip(cells)
            .enumerate()
            .map(|(i, (column, cell))| {
                if i == last && matches!(column.align, Alignment::Left) {
                    cell.clone()
                } else {
                    pad_str(cell, column.width, column.align, Some("...")).into_owned()
                }
            })
            .collect();
        format!("{}{}", self.margin(), padded.join(" ")).trim_end().to_string()
    }

    /// Header, then a rule for top-level tables
    pub fn print_header(&self) {
        println!("{}", self.header());
        if self.indent == 0 {
            println!("{}", self.rule());
        }
    }

    pub fn print_row(&self, cells: &[String]) {
        println!("{}", self.row(cells));
    }

    fn margin(&self) -> String {
        " ".repeat(self.indent)
    }
}
