//! Parser for comma-delimited dataset text
//!
//! The format is deliberately minimal: no quoting, no escaping, no embedded
//! delimiters. A comma inside a value is indistinguishable from a column
//! boundary.

use crate::error::{Error, Result};
use crate::table::{Row, Table};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Column delimiter
pub const DELIMITER: char = ',';

/// Read a dataset file and parse it into a Table
pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = String::from_utf8(bytes).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;

    let table = parse_csv_str(&text);
    debug!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.row_count(),
        "loaded dataset"
    );
    Ok(table)
}

/// Parse dataset text into a Table.
///
/// Blank and whitespace-only lines are skipped wherever they appear. With
/// fewer than two remaining lines (no header, or a header and no data) the
/// result is an empty table.
///
/// Short data lines leave the missing trailing columns absent; long data
/// lines have their extra fields dropped.
pub fn parse_csv_str(text: &str) -> Table {
    let mut lines = text
        .split_inclusive('\n')
        .map(|line| match line.strip_suffix('\n') {
            Some(line) => line.strip_suffix('\r').unwrap_or(line),
            None => line,
        })
        .filter(|line| !line.trim().is_empty())
        .peekable();

    let header_line = match lines.next() {
        Some(line) => line,
        None => return Table::new(),
    };
    if lines.peek().is_none() {
        return Table::new();
    }

    let headers: Vec<String> = header_line.split(DELIMITER).map(str::to_string).collect();

    let rows = lines
        .enumerate()
        .map(|(row_idx, line)| {
            let mut values = line.split(DELIMITER);
            let mut row = Row::with_capacity(headers.len());
            for header in &headers {
                row.insert(header.as_str(), values.next().map(str::to_string));
            }

            let extra = values.count();
            if extra > 0 {
                warn!(
                    row = row_idx + 1,
                    extra, "row has more fields than headers, dropping extras"
                );
            }
            row
        })
        .collect();

    Table { headers, rows }
}
