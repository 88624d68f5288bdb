//! Delimited-text parsing: decode, sniff the delimiter, build a [`Table`].

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::infer::infer_column_type;
use crate::table::{Column, Table};

/// Parses the file at `path` into an immutable [`Table`].
///
/// The file is decoded as UTF-8 with a Windows-1252 fallback (common for
/// Excel-exported CSVs), the field delimiter is sniffed from the first
/// lines, and per-column types are inferred from the parsed cells.
///
/// # Errors
/// - [`LoadError::NotFound`] when the file is missing,
/// - [`LoadError::Parse`] for undecodable or malformed content (including
///   duplicate header names and rows wider than the header),
/// - [`LoadError::Empty`] when there is a header but no data rows.
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let content = read_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    debug!(path = %path.display(), delimiter = ?(delimiter as char), "parsing delimited file");
    parse_table(&content, delimiter, path)
}

fn read_as_utf8(path: &Path) -> Result<String, LoadError> {
    let mut file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::parse(path, e.to_string())
        }
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| LoadError::parse(path, e.to_string()))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            // Not UTF-8; recover the buffer and decode as Windows-1252.
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Picks the most likely field delimiter by field-count consistency over
/// the first few lines. Candidates: tab, semicolon, comma, pipe.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample: Vec<&str> = content.lines().take(10).collect();
    if sample.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // The header line must split into more than one field to be viable.
        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn parse_table(content: &str, delimiter: u8, path: &Path) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(rec) => rec.map_err(|e| LoadError::parse(path, e.to_string()))?,
        None => {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
    };

    let names: Vec<String> = header.iter().map(|f| f.trim().to_string()).collect();
    if names.iter().any(|n| n.is_empty()) {
        return Err(LoadError::parse(path, "header contains an empty column name"));
    }
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(LoadError::parse(
                path,
                format!("duplicate column name: {name}"),
            ));
        }
    }

    let width = names.len();
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (line, rec) in records.enumerate() {
        let rec = rec.map_err(|e| LoadError::parse(path, e.to_string()))?;
        if rec.len() > width {
            return Err(LoadError::parse(
                path,
                format!("row {} has {} fields, header has {}", line + 2, rec.len(), width),
            ));
        }
        // Short rows are squared against the header with missing cells.
        let mut row: Vec<Option<String>> = rec
            .iter()
            .map(|f| {
                if f.is_empty() {
                    None
                } else {
                    Some(f.to_string())
                }
            })
            .collect();
        row.resize(width, None);
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let columns: Vec<Column> = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let ty = infer_column_type(rows.iter().map(|r| r[i].as_deref()));
            Column { name, ty }
        })
        .collect();

    debug!(
        columns = columns.len(),
        rows = rows.len(),
        "parsed delimited file"
    );
    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_comma_separated_file_in_order() {
        let f = write_temp("date,sales,region\n2024-01-01,10.5,north\n2024-01-02,11,south\n");
        let t = load_table(f.path()).unwrap();
        let names: Vec<&str> = t.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["date", "sales", "region"]);
        assert_eq!(t.column_type("date"), Some(ColumnType::Temporal));
        assert_eq!(t.column_type("sales"), Some(ColumnType::Numeric));
        assert_eq!(t.column_type("region"), Some(ColumnType::Categorical));
        assert_eq!(t.row_count(), 2);
    }

    #[test]
    fn sniffs_semicolon_and_tab() {
        let f = write_temp("a;b\n1;2\n3;4\n");
        let t = load_table(f.path()).unwrap();
        assert_eq!(t.column_count(), 2);

        let f = write_temp("a\tb\n1\t2\n");
        let t = load_table(f.path()).unwrap();
        assert_eq!(t.column_count(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_table(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn header_only_file_is_empty() {
        let f = write_temp("a,b,c\n");
        let err = load_table(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn zero_byte_file_is_empty() {
        let f = write_temp("");
        let err = load_table(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn duplicate_header_is_parse_error() {
        let f = write_temp("a,b,a\n1,2,3\n");
        let err = load_table(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn short_rows_become_missing_cells() {
        let f = write_temp("a,b,c\n1,2\n4,5,6\n");
        let t = load_table(f.path()).unwrap();
        assert_eq!(t.cell(0, 2), None);
        assert_eq!(t.cell(1, 2), Some("6"));
    }

    #[test]
    fn over_wide_row_is_parse_error() {
        let f = write_temp("a,b\n1,2,3\n");
        let err = load_table(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn empty_fields_are_missing_not_zero() {
        let f = write_temp("a,b\n,2\n1,\n");
        let t = load_table(f.path()).unwrap();
        assert_eq!(t.cell(0, 0), None);
        assert_eq!(t.cell(1, 1), None);
        // Column still numeric: missing cells do not break inference.
        assert_eq!(t.column_type("a"), Some(ColumnType::Numeric));
    }
}
