//! Table grid type.

use serde::{Deserialize, Serialize};

/// A rectangular-ish table of strings recovered from narrative text.
///
/// Row 0 is the header. Rows may be ragged; consumers pad missing cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Rows in source order; the first row is the header
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Create a grid from rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Create a grid from anything that yields rows of string-likes.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Get body rows (everything after the header).
    pub fn body(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Get the number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the header).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check whether this grid looks like a genuine table.
    ///
    /// Requires at least two rows, a header of at least two columns, and
    /// every other row within `tolerance` columns of the header.
    pub fn is_plausible(&self, tolerance: usize) -> bool {
        if self.rows.len() < 2 {
            return false;
        }
        let header_cols = self.column_count();
        if header_cols < 2 {
            return false;
        }
        self.body()
            .iter()
            .all(|row| row.len().abs_diff(header_cols) <= tolerance)
    }

    /// Get plain text representation (tab-separated cells, one row per line).
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = TableGrid::default();
        assert!(grid.is_empty());
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(), 0);
        assert!(grid.body().is_empty());
        assert!(grid.header().is_none());
    }

    #[test]
    fn test_grid_with_data() {
        let grid = TableGrid::from_rows([["Name", "Age"], ["Alice", "30"], ["Bob", "25"]]);

        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.header().unwrap(), ["Name", "Age"]);
        assert_eq!(grid.body().len(), 2);
    }

    #[test]
    fn test_plausibility_tolerance() {
        let grid = TableGrid::from_rows(vec![vec!["x", "y"], vec!["1"]]);
        assert!(grid.is_plausible(1));
        assert!(!grid.is_plausible(0));

        let wide = TableGrid::from_rows(vec![vec!["a", "b"], vec!["1", "2", "3", "4"]]);
        assert!(!wide.is_plausible(1));

        let single_column = TableGrid::from_rows(vec![vec!["a"], vec!["1"]]);
        assert!(!single_column.is_plausible(1));

        let header_only = TableGrid::from_rows(vec![vec!["a", "b"]]);
        assert!(!header_only.is_plausible(1));
    }

    #[test]
    fn test_plain_text() {
        let grid = TableGrid::from_rows([["A", "B"], ["1", "2"]]);
        assert_eq!(grid.plain_text(), "A\tB\n1\t2");
    }
}
