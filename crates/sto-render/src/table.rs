//! Plain-text tables with `+`, `-` and `|` borders.
//!
//! Cells may span several lines; a row is as tall as its tallest cell.
//! Column widths count characters, not display columns.

use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty; extra cells are ignored.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| cell_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_width(cell));
            }
        }
        widths
    }
}

fn cell_width(cell: &str) -> usize {
    cell.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    f.write_str("+")?;
    for width in widths {
        write!(f, "{}+", "-".repeat(width + 2))?;
    }
    writeln!(f)
}

fn write_row(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[String]) -> fmt::Result {
    let lines: Vec<Vec<&str>> = cells.iter().map(|c| c.lines().collect()).collect();
    let height = lines.iter().map(Vec::len).max().unwrap_or(0).max(1);

    for i in 0..height {
        f.write_str("|")?;
        for (width, cell) in widths.iter().zip(&lines) {
            let text = cell.get(i).copied().unwrap_or("");
            let pad = width - text.chars().count();
            write!(f, " {text}{} |", " ".repeat(pad))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_rule(f, &widths)?;
        write_row(f, &widths, &self.headers)?;
        write_rule(f, &widths)?;
        for row in &self.rows {
            write_row(f, &widths, row)?;
        }
        write_rule(f, &widths)
    }
}
