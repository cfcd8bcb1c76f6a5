use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

struct Column {
    header: String,
    data: Vec<String>,
}

/// A builder for aligned tabular output.
///
/// Columns are added with `column()`. Headers are left-justified and values
/// right-justified, measured in terminal display width so that kana, kanji and
/// emoji line up.
#[derive(Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Table::default()
    }

    /// Add a column with the given header and data rows.
    pub fn column(mut self, header: impl Into<String>, data: Vec<String>) -> Self {
        self.columns.push(Column {
            header: header.into(),
            data,
        });
        self
    }

    /// Render the table, one line per row with a trailing newline.
    ///
    /// Columns shorter than the first one are padded with "-".
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.columns.is_empty() {
            return out;
        }

        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|col| {
                let max_data = col.data.iter().map(|v| v.width()).max().unwrap_or(0);
                std::cmp::max(col.header.width(), max_data)
            })
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| ljust(&c.header, w))
            .collect();
        let _ = writeln!(out, "{}", header.join(" ").trim_end());

        let num_rows = self.columns[0].data.len();
        for row_idx in 0..num_rows {
            let row: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, &w)| {
                    let val = col.data.get(row_idx).map(|s| s.as_str()).unwrap_or("-");
                    rjust(val, w)
                })
                .collect();
            let _ = writeln!(out, "{}", row.join(" ").trim_end());
        }
        out
    }
}

/// Left-justify string to given width (using Unicode display width).
fn ljust(s: &str, width: usize) -> String {
    let current_width = s.width();
    if current_width >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current_width))
    }
}

/// Right-justify string to given width (using Unicode display width).
fn rjust(s: &str, width: usize) -> String {
    let current_width = s.width();
    if current_width >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - current_width), s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_by_display_width() {
        let out = Table::new()
            .column("時刻", vec!["12:00".to_string(), "13:00".to_string()])
            .column("気温", vec!["31.0°C".to_string(), "9.5°C".to_string()])
            .render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["時刻  気温", "12:00 31.0°C", "13:00  9.5°C"]);
        assert!(lines.iter().skip(1).all(|l| l.width() == lines[1].width()));
    }

    #[test]
    fn short_columns_are_padded_with_dash() {
        let out = Table::new()
            .column("a", vec!["1".to_string(), "2".to_string()])
            .column("b", vec!["x".to_string()])
            .render();
        assert_eq!(out, "a b\n1 x\n2 -\n");
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(Table::new().render(), "");
    }
}
