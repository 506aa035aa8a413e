use crate::error::{DataError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// A header row plus string cells, independent of the file format it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    /// Resolves each requested column to its index, reporting every missing one at once
    pub fn column_indices(&self, columns: &[&str]) -> Result<Vec<usize>> {
        let mut indices = Vec::with_capacity(columns.len());
        let mut missing = Vec::new();

        for column in columns {
            match self.header.iter().position(|name| name.trim() == *column) {
                Some(index) => indices.push(index),
                None => missing.push((*column).to_string()),
            }
        }

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(DataError::MissingColumns { missing })
        }
    }

    pub fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map_or("", |value| value.trim())
    }
}

/// Reads the first worksheet of a spreadsheet; the first row is the header
pub fn read_workbook(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::EmptyWorkbook {
            path: path.to_path_buf(),
        })??;

    sheet_from_range(&range).ok_or_else(|| DataError::EmptyWorkbook {
        path: path.to_path_buf(),
    })
}

/// `None` when the worksheet has no header row
fn sheet_from_range(range: &Range<Data>) -> Option<RawSheet> {
    let mut rows = range.rows();
    let header = rows.next()?.iter().map(cell_text).collect();
    let rows = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Some(RawSheet { header, rows })
}

/// Reads a delimited text sheet, picking `;` when the header line contains one and `,` otherwise
pub fn read_delimited<R: Read>(mut reader: R) -> Result<RawSheet> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = text.trim_start_matches('\u{feff}');

    let header_line = text.lines().next().unwrap_or_default();
    let delimiter = if header_line.contains(';') { b';' } else { b',' };

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header = csv_reader.headers()?.iter().map(ToString::to_string).collect();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        rows.push(record?.iter().map(ToString::to_string).collect());
    }

    Ok(RawSheet { header, rows })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.is_finite() => format!("{value:.0}"),
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        other => other.to_string(),
    }
}
