//! Typed rejections for chart requests.

use thiserror::Error;

use crate::spec::ChartKind;

/// The column class a chart position requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedClass {
    Numeric,
    CategoricalOrTemporal,
    TemporalOrNumeric,
}

impl std::fmt::Display for ExpectedClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExpectedClass::Numeric => "numeric",
            ExpectedClass::CategoricalOrTemporal => "categorical-or-temporal",
            ExpectedClass::TemporalOrNumeric => "temporal-or-numeric",
        };
        f.write_str(s)
    }
}

/// Why a chart request was rejected. Checks run in this order: no table,
/// unknown column, arity, type compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("no dataset is loaded")]
    NoTable,

    #[error("unknown column: {name}")]
    UnknownColumn { name: String },

    #[error("{kind} chart needs {expected} distinct column(s), got {got}")]
    ArityMismatch {
        kind: ChartKind,
        expected: usize,
        got: usize,
    },

    #[error("column {column} has the wrong type: expected {expected}")]
    TypeMismatch {
        column: String,
        expected: ExpectedClass,
    },
}
