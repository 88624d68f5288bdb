//! Column type inference, run once per column at load time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::table::ColumnType;

/// Date-only layouts accepted as temporal.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Date-time layouts accepted as temporal (RFC 3339 is tried separately).
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Infers the semantic type of one column from its cell texts.
///
/// Order matters: a column of values like `2023` is numeric, not temporal.
/// A column with no non-missing cells stays categorical; there is nothing
/// to support a stronger claim.
pub(crate) fn infer_column_type<'a, I>(cells: I) -> ColumnType
where
    I: Iterator<Item = Option<&'a str>>,
{
    let mut saw_value = false;
    let mut all_numeric = true;
    let mut all_temporal = true;

    for cell in cells {
        let Some(text) = cell else { continue };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        saw_value = true;
        if all_numeric && !is_numeric(text) {
            all_numeric = false;
        }
        if all_temporal && !is_temporal(text) {
            all_temporal = false;
        }
        if !all_numeric && !all_temporal {
            break;
        }
    }

    if !saw_value {
        return ColumnType::Categorical;
    }
    if all_numeric {
        return ColumnType::Numeric;
    }
    if all_temporal {
        return ColumnType::Temporal;
    }
    ColumnType::Categorical
}

fn is_numeric(text: &str) -> bool {
    text.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false)
}

fn is_temporal(text: &str) -> bool {
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return true;
    }
    if DATE_FORMATS
        .iter()
        .any(|f| NaiveDate::parse_from_str(text, f).is_ok())
    {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|f| NaiveDateTime::parse_from_str(text, f).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(cells: &[Option<&str>]) -> ColumnType {
        infer_column_type(cells.iter().copied())
    }

    #[test]
    fn numeric_column() {
        assert_eq!(
            infer(&[Some("1"), Some("2.5"), Some("-3e2"), None]),
            ColumnType::Numeric
        );
    }

    #[test]
    fn numeric_wins_over_temporal_for_plain_integers() {
        // "2023" parses as f64; it must not be claimed as a date.
        assert_eq!(infer(&[Some("2023"), Some("2024")]), ColumnType::Numeric);
    }

    #[test]
    fn temporal_column() {
        assert_eq!(
            infer(&[Some("2024-01-31"), Some("2024-02-01"), None]),
            ColumnType::Temporal
        );
        assert_eq!(
            infer(&[Some("2024-01-31T12:00:00Z")]),
            ColumnType::Temporal
        );
        assert_eq!(infer(&[Some("31/01/2024")]), ColumnType::Temporal);
    }

    #[test]
    fn mixed_column_is_categorical() {
        assert_eq!(
            infer(&[Some("2024-01-31"), Some("north")]),
            ColumnType::Categorical
        );
        assert_eq!(infer(&[Some("1"), Some("one")]), ColumnType::Categorical);
    }

    #[test]
    fn all_missing_is_categorical() {
        assert_eq!(infer(&[None, None]), ColumnType::Categorical);
        assert_eq!(infer(&[Some("  "), None]), ColumnType::Categorical);
        assert_eq!(infer(&[]), ColumnType::Categorical);
    }

    #[test]
    fn infinities_are_not_numeric() {
        assert_eq!(infer(&[Some("inf"), Some("1")]), ColumnType::Categorical);
        assert_eq!(infer(&[Some("NaN")]), ColumnType::Categorical);
    }
}
