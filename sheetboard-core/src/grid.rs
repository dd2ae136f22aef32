//! Tabular text parser — delimited text in, grid of raw text cells out.
//!
//! The parser never fails. Quoting follows the usual spreadsheet export rules:
//! `"` opens and closes a quoted cell, `""` inside quotes is a literal quote,
//! and commas or line breaks inside quotes belong to the cell. `\n`, `\r` and
//! `\r\n` all terminate a row. Trailing rows that are entirely blank are
//! dropped; every other row is kept, including blank rows in the middle.

use serde::{Deserialize, Serialize};

/// Parsed two-dimensional array of text cells.
///
/// Rows may have different lengths. Indexing past the end of a row (or past
/// the last row) yields `None` rather than panicking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from pre-split rows. Trailing blank rows are not stripped.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    /// Raw cell text, or `None` if the row or column does not exist.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|c| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row length.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// True if every cell in the row is empty after trimming.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Parse output plus diagnostics about the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub grid: Grid,
    /// Input ended while still inside a quoted cell. The remainder of the
    /// input was absorbed into that cell.
    pub unterminated_quote: bool,
}

/// Parse delimited text into a grid.
pub fn parse(text: &str) -> Grid {
    parse_with_report(text).grid
}

/// Parse delimited text, also reporting whether quoting was left open.
pub fn parse_with_report(text: &str) -> ParseReport {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut cell)),
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(ch),
        }
    }

    // Final cell/row, terminator or not.
    row.push(cell);
    rows.push(row);

    while rows.last().is_some_and(|r| is_blank_row(r)) {
        rows.pop();
    }

    ParseReport {
        grid: Grid { rows },
        unterminated_quote: in_quotes,
    }
}
