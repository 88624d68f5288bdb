//! Single-slot store for the currently loaded tabular dataset.
//!
//! The store holds zero or one immutable [`Table`]. A successful [`DatasetStore::load`]
//! atomically replaces the held table; a failed load leaves it untouched.
//! Tables are shared as `Arc`, so a reader that grabbed the previous table
//! keeps a consistent snapshot even across a reload.

mod error;
mod infer;
mod load;
mod table;

pub use error::LoadError;
pub use table::{Column, ColumnType, Table, TableSummary};

use std::path::Path;
use std::sync::Arc;

use tracing::info;

/// Holds at most one loaded [`Table`] and answers column-metadata queries.
///
/// # Example
/// ```no_run
/// use dataset_store::DatasetStore;
///
/// let mut store = DatasetStore::new();
/// let table = store.load("sales.csv".as_ref())?;
/// println!("{} rows", table.row_count());
/// for (name, ty) in store.current_columns() {
///     println!("{name}: {ty}");
/// }
/// # Ok::<(), dataset_store::LoadError>(())
/// ```
#[derive(Default)]
pub struct DatasetStore {
    slot: Option<Arc<Table>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Parses the file at `path` and replaces the held table on success.
    ///
    /// Loading is all-or-nothing: parsing happens into a fresh [`Table`]
    /// and the slot is only swapped once the whole file parsed, so a
    /// failed load leaves the previous table (if any) in place.
    ///
    /// # Errors
    /// See [`LoadError`]; the error carries the offending path and, for
    /// parse failures, the reason.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Table>, LoadError> {
        let table = Arc::new(load::load_table(path)?);
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "dataset loaded"
        );
        self.slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// The held table, if any. Cheap to call; clones an `Arc`.
    pub fn current_table(&self) -> Option<Arc<Table>> {
        self.slot.clone()
    }

    /// Ordered `(name, type)` pairs of the held table; empty when no table
    /// is loaded.
    pub fn current_columns(&self) -> Vec<(String, ColumnType)> {
        match &self.slot {
            Some(t) => t
                .columns()
                .iter()
                .map(|c| (c.name.clone(), c.ty))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn empty_store_answers_empty_metadata() {
        let store = DatasetStore::new();
        assert!(store.current_table().is_none());
        assert!(store.current_columns().is_empty());
    }

    #[test]
    fn load_exposes_columns_in_file_order() {
        let f = write_temp("b,a,c\n1,2,3\n");
        let mut store = DatasetStore::new();
        store.load(f.path()).unwrap();
        let names: Vec<String> = store
            .current_columns()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn failed_load_preserves_previous_table() {
        let good = write_temp("a,b\n1,2\n");
        let bad = write_temp("a,b\n");

        let mut store = DatasetStore::new();
        store.load(good.path()).unwrap();
        let before = store.current_columns();

        assert!(store.load(bad.path()).is_err());
        assert_eq!(store.current_columns(), before);
        assert!(store.load(Path::new("/no/such.csv")).is_err());
        assert_eq!(store.current_columns(), before);
    }

    #[test]
    fn reload_replaces_wholesale_and_old_readers_keep_their_snapshot() {
        let first = write_temp("a\n1\n");
        let second = write_temp("x,y\n1,2\n");

        let mut store = DatasetStore::new();
        let old = store.load(first.path()).unwrap();
        store.load(second.path()).unwrap();

        // The slot sees only the new table; the old Arc is still intact.
        assert_eq!(store.current_columns().len(), 2);
        assert_eq!(old.column_count(), 1);
        assert_eq!(old.cell(0, 0), Some("1"));
    }
}
