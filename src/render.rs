//! Driver-side renderer: hands the validated spec to an external plotting
//! process as JSON, written next to the system temp dir the way the
//! original desktop app staged its plot files.

use std::io::Write;
use std::path::PathBuf;

use chart_validator::{ChartSpec, RenderError, Renderer};
use dataset_store::Table;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, spec: &ChartSpec, table: &Table) -> Result<PathBuf, RenderError> {
        let payload = serde_json::json!({
            "title": spec.title(),
            "spec": spec,
            "rows": table.row_count(),
        });
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        let path = std::env::temp_dir().join("tabletalk-chart.json");
        let mut file = std::fs::File::create(&path)?;
        file.write_all(text.as_bytes())?;
        Ok(path)
    }
}
