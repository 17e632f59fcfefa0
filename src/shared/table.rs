//! Plain-text tables for terminal output.
//!
//! Column widths are measured in display width, so CJK and other wide
//! characters stay aligned.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string to fit within the specified display width.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Pads or truncates a string to exactly the specified display width.
///
/// Longer strings are cut and end in "..." when `width` leaves room for it.
pub fn pad_or_truncate(s: &str, width: usize) -> String {
    let display_width = s.width();

    if display_width <= width {
        format!("{}{}", s, " ".repeat(width - display_width))
    } else if width < 3 {
        truncate_to_width(s, width)
    } else {
        let truncated = truncate_to_width(s, width - 3);
        // A wide char may not fit exactly, leaving one column to pad
        let padding = width.saturating_sub(truncated.width()).saturating_sub(3);
        format!("{}...{}", truncated, " ".repeat(padding))
    }
}

/// Rows of cells rendered with aligned columns separated by two spaces.
///
/// Every column but the last is as wide as its widest cell, capped at
/// `max_column_width`. The last column is never padded or truncated.
pub struct Table {
    rows: Vec<Vec<String>>,
    max_column_width: usize,
}

impl Table {
    pub fn new(max_column_width: usize) -> Self {
        Self {
            rows: Vec::new(),
            max_column_width,
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..columns)
            .map(|col| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
                    .min(self.max_column_width)
            })
            .collect()
    }

    /// Render every row followed by a newline.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();
        for row in &self.rows {
            let last = row.len().saturating_sub(1);
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == last {
                        cell.clone()
                    } else {
                        pad_or_truncate(cell, widths[i])
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}
