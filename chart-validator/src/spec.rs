//! Chart kinds and the validated chart specification.

use dataset_store::ColumnType;
use serde::Serialize;

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Scatter,
    Line,
    Box,
}

impl ChartKind {
    /// Whether this kind plots a second (value/y) column.
    pub fn needs_value_column(&self) -> bool {
        !matches!(self, ChartKind::Box)
    }

    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Line,
        ChartKind::Box,
    ];
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Line => "line",
            ChartKind::Box => "box",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "scatter" => Ok(ChartKind::Scatter),
            "line" => Ok(ChartKind::Line),
            "box" => Ok(ChartKind::Box),
            other => Err(format!("unknown chart kind: {other}")),
        }
    }
}

/// A column reference that survived validation: name plus resolved type,
/// so the renderer needs no second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRef {
    name: String,
    ty: ColumnType,
}

impl ColumnRef {
    pub(crate) fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.ty
    }
}

/// A validated chart description, ready for a renderer.
///
/// Only [`crate::validate`] constructs these; a kind/column combination
/// that fails the compatibility check never becomes a `ChartSpec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    kind: ChartKind,
    x: ColumnRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<ColumnRef>,
}

impl ChartSpec {
    pub(crate) fn new(kind: ChartKind, x: ColumnRef, y: Option<ColumnRef>) -> Self {
        Self { kind, x, y }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// The category / x-axis column.
    pub fn x(&self) -> &ColumnRef {
        &self.x
    }

    /// The value / y-axis column; `None` for box plots.
    pub fn y(&self) -> Option<&ColumnRef> {
        self.y.as_ref()
    }

    /// Display caption for the rendered chart.
    pub fn title(&self) -> String {
        match (self.kind, &self.y) {
            (ChartKind::Bar, Some(y)) => format!("{} by {}", y.name(), self.x.name()),
            (ChartKind::Scatter, Some(y)) => format!("{} vs {}", y.name(), self.x.name()),
            (ChartKind::Line, Some(y)) => format!("{} over {}", y.name(), self.x.name()),
            _ => format!("{} distribution", self.x.name()),
        }
    }
}
