//! Immutable in-memory representation of a loaded delimited dataset.

use serde::Serialize;

/// Semantic type of a column, inferred once at load time.
///
/// Chart validation and prompt serialization treat this as a fixed tag;
/// values are never re-inspected after the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every non-missing cell parses as a finite float.
    Numeric,
    /// Free text / labels; the fallback when nothing stronger holds.
    Categorical,
    /// Every non-missing cell parses as a date or date-time.
    Temporal,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Temporal => "temporal",
        };
        f.write_str(s)
    }
}

/// A named column together with its inferred type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

/// An immutable table: ordered columns plus rows of optional cells.
///
/// Invariants, enforced by the loader:
/// - column names are unique and case-sensitive,
/// - every row holds exactly one cell slot per declared column
///   (`None` marks a missing value).
///
/// Tables are never mutated after construction; the store hands them out
/// behind `Arc` so readers keep a consistent snapshot across reloads.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Option<String>>>,
}

/// Compact preview of a loaded table, shown after a successful `load`.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: Vec<Column>,
}

impl Table {
    /// Assembles a table from already-validated parts.
    ///
    /// Only the loader calls this; it has checked name uniqueness and
    /// squared every row against the header.
    pub(crate) fn new(columns: Vec<Column>, rows: Vec<Vec<Option<String>>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Ordered column metadata.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of `name` in the header, if present. Case-sensitive.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Inferred type of the named column, if present.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column_index(name).map(|i| self.columns[i].ty)
    }

    /// Rows in file order; each slice has exactly `column_count()` entries.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Cell text at (`row`, `col`), `None` for a missing value or an
    /// out-of-bounds position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Row/column counts plus the column list, for display after a load.
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            rows: self.row_count(),
            columns: self.columns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec![
                Column {
                    name: "city".into(),
                    ty: ColumnType::Categorical,
                },
                Column {
                    name: "pop".into(),
                    ty: ColumnType::Numeric,
                },
            ],
            vec![
                vec![Some("Oslo".into()), Some("709000".into())],
                vec![Some("Bergen".into()), None],
            ],
        )
    }

    #[test]
    fn column_lookup_is_case_sensitive() {
        let t = sample();
        assert_eq!(t.column_index("city"), Some(0));
        assert_eq!(t.column_index("City"), None);
        assert_eq!(t.column_type("pop"), Some(ColumnType::Numeric));
    }

    #[test]
    fn cells_and_missing_values() {
        let t = sample();
        assert_eq!(t.cell(0, 1), Some("709000"));
        assert_eq!(t.cell(1, 1), None);
        assert_eq!(t.cell(5, 0), None);
    }

    #[test]
    fn summary_reflects_shape() {
        let s = sample().summary();
        assert_eq!(s.rows, 2);
        assert_eq!(s.columns.len(), 2);
        assert_eq!(s.columns[0].name, "city");
    }
}
