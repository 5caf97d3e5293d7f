//! Export of filtered rows to CSV or JSON

use crate::error::{Error, Result};
use crate::table::Row;
use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Output format for exported rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Write rows as CSV with a header line.
///
/// Values containing commas, quotes or newlines are quoted; absent values
/// are written as empty fields.
pub fn write_csv<W, R>(writer: W, headers: &[String], rows: &[R]) -> Result<()>
where
    W: Write,
    R: Borrow<Row>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(headers)?;

    for row in rows {
        let row: &Row = row.borrow();
        csv_writer.write_record(headers.iter().map(|h| row.get(h).unwrap_or("")))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write rows as a pretty-printed JSON array of objects
pub fn write_json<W, R>(writer: W, rows: &[R]) -> Result<()>
where
    W: Write,
    R: Borrow<Row>,
{
    let rows: Vec<&Row> = rows
        .iter()
        .map(|row| <R as Borrow<Row>>::borrow(row))
        .collect();
    serde_json::to_writer_pretty(writer, &rows)?;
    Ok(())
}

/// Export rows to a file in the given format
pub fn export_rows<P, R>(path: P, format: ExportFormat, headers: &[String], rows: &[R]) -> Result<()>
where
    P: AsRef<Path>,
    R: Borrow<Row>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    match format {
        ExportFormat::Csv => write_csv(&mut writer, headers, rows)?,
        ExportFormat::Json => {
            write_json(&mut writer, rows)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), ?format, "exported rows");
    Ok(())
}
