//! Column-aligned tables for `list` and `status` output.

/// A simple table with box-drawing borders.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let widths = headers.iter().map(|h| display_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            widths,
        }
    }

    /// Add a row. Cells past the header count are dropped.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row
            .into_iter()
            .map(Into::into)
            .take(self.headers.len())
            .collect();

        for (width, cell) in self.widths.iter_mut().zip(&row) {
            *width = (*width).max(display_width(cell));
        }

        self.rows.push(row);
    }

    /// Render with borders.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.boxed_row(&self.headers));
        lines.push(self.border('├', '┼', '┤'));
        for row in &self.rows {
            lines.push(self.boxed_row(row));
        }
        lines.push(self.border('└', '┴', '┘'));

        lines.join("\n")
    }

    /// Render without borders, columns separated by two spaces.
    ///
    /// Used when stdout is not a terminal.
    pub fn render_plain(&self) -> String {
        std::iter::once(&self.headers)
            .chain(&self.rows)
            .map(|row| {
                self.widths
                    .iter()
                    .enumerate()
                    .map(|(i, width)| pad(row.get(i).map(String::as_str).unwrap_or(""), *width))
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let inner = self
            .widths
            .iter()
            .map(|w| "─".repeat(w + 2))
            .collect::<Vec<_>>()
            .join(&mid.to_string());
        format!("{}{}{}", left, inner, right)
    }

    fn boxed_row(&self, row: &[String]) -> String {
        let mut s = String::from("│");
        for (i, width) in self.widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            s.push(' ');
            s.push_str(&pad(cell, *width));
            s.push_str(" │");
        }
        s
    }
}

fn display_width(s: &str) -> usize {
    console::measure_text_width(s)
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(cell));
    format!("{}{}", cell, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_empty() {
        let table = Table::new(["Tool", "Executable"]);

        let output = table.render();
        assert!(output.contains("Tool"));
        assert!(output.contains("Executable"));
    }

    #[test]
    fn table_with_rows() {
        let mut table = Table::new(["Tool", "Status"]);
        table.add_row(["Httpx", "present"]);
        table.add_row(["Nuclei", "missing"]);

        let output = table.render();
        assert_eq!(output.lines().count(), 6);
        assert!(output.contains("Httpx"));
        assert!(output.contains("missing"));
    }

    #[test]
    fn rows_have_equal_width() {
        let mut table = Table::new(["A", "B"]);
        table.add_row(["subfinder", "✓"]);
        table.add_row(["x", "present"]);

        let output = table.render();
        let widths: Vec<usize> = output.lines().map(console::measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(output.lines().count(), 6);
    }

    #[test]
    fn table_uses_box_drawing() {
        let output = Table::new(["Test"]).render();

        for c in ["┌", "┐", "└", "┘", "│", "─"] {
            assert!(output.contains(c));
        }
    }

    #[test]
    fn table_handles_missing_and_extra_cells() {
        let mut table = Table::new(["A", "B", "C"]);
        table.add_row(["only", "two"]);
        table.add_row(["1", "2", "3", "dropped"]);

        let output = table.render();
        assert!(output.contains("only"));
        assert!(!output.contains("dropped"));
    }

    #[test]
    fn render_plain_has_no_borders() {
        let mut table = Table::new(["Tool", "Executable"]);
        table.add_row(["Httpx", "httpx"]);

        let output = table.render_plain();
        assert!(!output.contains('│'));
        assert_eq!(output.lines().nth(1), Some("Httpx  httpx"));
    }
}
