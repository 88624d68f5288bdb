//! Prompt composition: question first, then a budgeted table excerpt.

use dataset_store::Table;

/// Default system instructions for table-grounded answers.
///
/// Keep this short: it steers the model without wasting the context window.
pub const DEFAULT_SYSTEM: &str = r#"
You are a precise data analyst. Answer using the provided table as ground
truth when it is present; if it is insufficient, say so.
"#;

/// Joins column names and cell values within a line.
pub const FIELD_DELIMITER: &str = " | ";

/// Appended to the context block when trailing rows were dropped.
pub const TRUNCATION_MARKER: &str = "...rows omitted";

/// The string handed to the model engine: question text plus an optional
/// serialized table excerpt.
///
/// Built only by [`compose`]; the flags record what the budget did to the
/// context so callers can surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    question: String,
    context: Option<String>,
    truncated: bool,
    context_omitted: bool,
}

impl PromptPayload {
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The serialized table excerpt, if one was included.
    pub fn context_block(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Trailing rows were dropped to fit the budget.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Even the header alone exceeded the budget; no context was included.
    pub fn context_omitted(&self) -> bool {
        self.context_omitted
    }

    /// Renders the final model input. The question always precedes the
    /// data, so the model sees intent before content.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Question:\n");
        out.push_str(&self.question);
        out.push('\n');
        if let Some(block) = &self.context {
            out.push_str("\nData:\n");
            out.push_str(block);
            out.push_str("\nAnswer based on the data above.\n");
        }
        out
    }
}

/// Composes a [`PromptPayload`] from a question and an optional table.
///
/// Pure and total: the worst case is a question-only payload. The budget
/// bounds the context block's bytes; the question, the section separators
/// and the truncation marker are fixed overhead outside it, and the
/// question is never truncated.
///
/// Serialization is deterministic: header line, then rows in table order,
/// fields joined by [`FIELD_DELIMITER`], missing cells rendered as empty
/// fields. When the full serialization exceeds the budget, trailing whole
/// rows are dropped and [`TRUNCATION_MARKER`] is appended; when the header
/// alone exceeds it, the context is omitted entirely and flagged.
pub fn compose(question: &str, table: Option<&Table>, budget_bytes: usize) -> PromptPayload {
    let question = question.trim().to_string();

    let Some(table) = table else {
        return PromptPayload {
            question,
            context: None,
            truncated: false,
            context_omitted: false,
        };
    };

    let mut header = table
        .columns()
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(FIELD_DELIMITER);
    header.push('\n');

    if header.len() > budget_bytes {
        return PromptPayload {
            question,
            context: None,
            truncated: false,
            context_omitted: true,
        };
    }

    let mut block = header;
    let mut kept = 0usize;
    for row in table.rows() {
        let line = serialize_row(row);
        if block.len() + line.len() > budget_bytes {
            break;
        }
        block.push_str(&line);
        kept += 1;
    }

    let truncated = kept < table.row_count();
    if truncated {
        block.push_str(TRUNCATION_MARKER);
        block.push('\n');
    }

    PromptPayload {
        question,
        context: Some(block),
        truncated,
        context_omitted: false,
    }
}

fn serialize_row(row: &[Option<String>]) -> String {
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            line.push_str(FIELD_DELIMITER);
        }
        if let Some(value) = cell {
            line.push_str(value);
        }
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_store::DatasetStore;
    use std::io::Write;
    use std::sync::Arc;

    fn table(content: &str) -> Arc<Table> {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        let mut store = DatasetStore::new();
        store.load(f.path()).unwrap()
    }

    #[test]
    fn question_only_without_table() {
        let p = compose("  what is the trend?  ", None, 1000);
        assert_eq!(p.question(), "what is the trend?");
        assert!(p.context_block().is_none());
        assert!(!p.truncated());
        assert!(!p.context_omitted());
        assert_eq!(p.render(), "Question:\nwhat is the trend?\n");
    }

    #[test]
    fn full_table_included_when_it_fits() {
        let t = table("a,b\n1,2\n3,4\n");
        let p = compose("sum?", Some(&t), 1000);
        let block = p.context_block().unwrap();
        assert_eq!(block, "a | b\n1 | 2\n3 | 4\n");
        assert!(!p.truncated());
        assert!(block.len() <= 1000);
    }

    #[test]
    fn question_precedes_data_in_the_rendering() {
        let t = table("a\n1\n");
        let p = compose("sum?", Some(&t), 1000);
        let rendered = p.render();
        let q = rendered.find("sum?").unwrap();
        let d = rendered.find("Data:").unwrap();
        assert!(q < d);
    }

    #[test]
    fn trailing_rows_are_dropped_whole_with_a_marker() {
        // Header "a | b\n" = 6 bytes, each row "1 | 2\n" = 6 bytes.
        let t = table("a,b\n1,2\n3,4\n5,6\n");
        let budget = 6 + 6 + 5; // header + one row + not quite a second row
        let p = compose("q", Some(&t), budget);
        let block = p.context_block().unwrap();
        assert!(p.truncated());
        assert_eq!(block, format!("a | b\n1 | 2\n{TRUNCATION_MARKER}\n"));
        // Only the marker exceeds the budget; rows never split.
        let without_marker = block.strip_suffix(&format!("{TRUNCATION_MARKER}\n")).unwrap();
        assert!(without_marker.len() <= budget);
    }

    #[test]
    fn header_over_budget_omits_context_and_flags_it() {
        // Header serialization is ~30 bytes, budget is 20.
        let t = table("alpha,bravo,charlie,delta\n1,2,3,4\n");
        let p = compose("what is the trend?", Some(&t), 20);
        assert!(p.context_block().is_none());
        assert!(p.context_omitted());
        assert!(!p.truncated());
        assert_eq!(p.render(), "Question:\nwhat is the trend?\n");
    }

    #[test]
    fn missing_cells_render_as_empty_fields() {
        let t = table("a,b,c\n1,,3\n");
        let p = compose("q", Some(&t), 1000);
        assert_eq!(p.context_block().unwrap(), "a | b | c\n1 |  | 3\n");
    }

    #[test]
    fn compose_is_deterministic() {
        let t = table("a,b\n1,2\n3,4\n");
        assert_eq!(compose("q", Some(&t), 10), compose("q", Some(&t), 10));
        assert_eq!(compose("q", Some(&t), 1000), compose("q", Some(&t), 1000));
    }

    #[test]
    fn zero_budget_is_a_question_only_payload() {
        let t = table("a\n1\n");
        let p = compose("q", Some(&t), 0);
        assert!(p.context_block().is_none());
        assert!(p.context_omitted());
    }
}
