//! Chart request validation.
//!
//! [`validate`] maps a requested chart kind plus column name(s) against the
//! currently loaded table into a [`ChartSpec`], or rejects it with a
//! specific [`ChartError`]. Validation is a pure lookup over the column
//! types inferred at load time; it never touches the table's cells.

mod error;
mod render;
mod spec;

pub use error::{ChartError, ExpectedClass};
pub use render::{RenderError, Renderer};
pub use spec::{ChartKind, ChartSpec, ColumnRef};

use dataset_store::{ColumnType, Table};
use tracing::debug;

/// Validates a chart request against the current table.
///
/// `columns` lists the requested column names in order: first the
/// category/x-axis column, then (for bar/scatter/line) the value/y-axis
/// column. Duplicate names count once, so a box plot tolerates
/// `["sales", "sales"]` while a bar chart rejects it.
///
/// Checks run in a fixed order (no table, unknown column in reference
/// order, arity, type compatibility) so the reported reason is stable.
///
/// # Example
/// ```
/// use chart_validator::{ChartKind, validate};
/// use dataset_store::DatasetStore;
///
/// let store = DatasetStore::new();
/// let err = validate(ChartKind::Bar, &["region", "sales"],
///                    store.current_table().as_deref());
/// assert!(err.is_err()); // nothing loaded yet
/// ```
pub fn validate(
    kind: ChartKind,
    columns: &[&str],
    table: Option<&Table>,
) -> Result<ChartSpec, ChartError> {
    let Some(table) = table else {
        return Err(ChartError::NoTable);
    };

    // Resolve references in order, collapsing duplicates; the first name
    // that is not in the table decides the UnknownColumn report.
    let mut distinct: Vec<(&str, ColumnType)> = Vec::new();
    for name in columns {
        let Some(ty) = table.column_type(name) else {
            return Err(ChartError::UnknownColumn {
                name: (*name).to_string(),
            });
        };
        if !distinct.iter().any(|(n, _)| n == name) {
            distinct.push((*name, ty));
        }
    }

    let expected_arity = if kind.needs_value_column() { 2 } else { 1 };
    let arity_ok = if kind.needs_value_column() {
        distinct.len() >= 2
    } else {
        distinct.len() == 1
    };
    if !arity_ok {
        return Err(ChartError::ArityMismatch {
            kind,
            expected: expected_arity,
            got: distinct.len(),
        });
    }

    let (x_name, x_ty) = distinct[0];
    check_class(x_name, x_ty, x_requirement(kind))?;

    let y = if kind.needs_value_column() {
        let (y_name, y_ty) = distinct[1];
        check_class(y_name, y_ty, ExpectedClass::Numeric)?;
        Some(ColumnRef::new(y_name, y_ty))
    } else {
        None
    };

    let spec = ChartSpec::new(kind, ColumnRef::new(x_name, x_ty), y);
    debug!(kind = %kind, title = %spec.title(), "chart request validated");
    Ok(spec)
}

fn x_requirement(kind: ChartKind) -> ExpectedClass {
    match kind {
        ChartKind::Bar => ExpectedClass::CategoricalOrTemporal,
        ChartKind::Scatter | ChartKind::Box => ExpectedClass::Numeric,
        ChartKind::Line => ExpectedClass::TemporalOrNumeric,
    }
}

fn check_class(name: &str, ty: ColumnType, expected: ExpectedClass) -> Result<(), ChartError> {
    let ok = match expected {
        ExpectedClass::Numeric => ty == ColumnType::Numeric,
        ExpectedClass::CategoricalOrTemporal => {
            matches!(ty, ColumnType::Categorical | ColumnType::Temporal)
        }
        ExpectedClass::TemporalOrNumeric => {
            matches!(ty, ColumnType::Temporal | ColumnType::Numeric)
        }
    };
    if ok {
        Ok(())
    } else {
        Err(ChartError::TypeMismatch {
            column: name.to_string(),
            expected,
        })
    }
}
