use crate::data::aggregate::mean;
use crate::domain::{Field, Record};
use crate::error::{DataError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub const SCORE_DELIMITER: u8 = b';';

/// Item/indicator scores of every port for one theme and area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub theme: String,
    pub area: String,
    pub item: String,
    /// Aligned with [`ScoreTable::ports`]; `None` for a blank cell.
    pub scores: Vec<Option<f64>>,
    pub average: Option<f64>,
}

impl ScoreRow {
    pub fn score(&self, port: usize) -> Option<f64> {
        self.scores.get(port).copied().flatten()
    }
}

impl Record for ScoreRow {
    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Theme => Some(&self.theme),
            Field::Area => Some(&self.area),
            Field::Item => Some(&self.item),
            Field::Category | Field::Attribute | Field::Metric => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTable {
    ports: Vec<String>,
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn new(ports: Vec<String>, rows: Vec<ScoreRow>) -> Self {
        Self { ports, rows }
    }

    pub fn ports(&self) -> &[String] {
        &self.ports
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn port_index(&self, port: &str) -> Option<usize> {
        self.ports.iter().position(|name| name == port)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Loads the `;`-delimited score table and computes the per-row average
pub fn load_scores(path: &Path, ports: &[String]) -> Result<ScoreTable> {
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let table = read_scores(File::open(path)?, ports)?;
    info!(
        path = %path.display(),
        rows = table.rows.len(),
        ports = table.ports.len(),
        "loaded score table"
    );
    Ok(table)
}

pub fn read_scores<R: Read>(reader: R, ports: &[String]) -> Result<ScoreTable> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(SCORE_DELIMITER)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let header = csv_reader.headers()?.clone();
    let text_columns = [Field::Theme, Field::Area, Field::Item].map(Field::column);
    let required: Vec<&str> = text_columns
        .iter()
        .copied()
        .chain(ports.iter().map(String::as_str))
        .collect();
    let indices = column_indices(&header, &required)?;
    let (theme, area, item) = (indices[0], indices[1], indices[2]);
    let port_columns = &indices[3..];

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);

        let scores = port_columns
            .iter()
            .zip(ports)
            .map(|(&index, port)| parse_score(record.get(index).unwrap_or(""), line, port))
            .collect::<Result<Vec<_>>>()?;
        let average = mean(scores.iter().copied());

        rows.push(ScoreRow {
            theme: record.get(theme).unwrap_or("").to_string(),
            area: record.get(area).unwrap_or("").to_string(),
            item: record.get(item).unwrap_or("").to_string(),
            scores,
            average,
        });
    }

    format_item_labels(&mut rows);
    Ok(ScoreTable::new(ports.to_vec(), rows))
}

fn column_indices(header: &StringRecord, columns: &[&str]) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();
    for column in columns {
        match header.iter().position(|name| name.trim_start_matches('\u{feff}') == *column) {
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

/// Markers read as a missing score, like a blank cell
const MISSING_MARKERS: [&str; 4] = ["nan", "na", "n/a", "null"];

fn parse_score(cell: &str, line: u64, column: &str) -> Result<Option<f64>> {
    if cell.is_empty() || MISSING_MARKERS.iter().any(|marker| cell.eq_ignore_ascii_case(marker)) {
        return Ok(None);
    }

    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(DataError::NotNumeric {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

/// Item labels are shown with two decimals when the whole column is numeric;
/// a column with any text label is kept verbatim.
fn format_item_labels(rows: &mut [ScoreRow]) {
    let mut labels = rows.iter().map(|row| row.item.as_str()).filter(|item| !item.is_empty());
    let numeric = labels.all(|item| item.parse::<f64>().is_ok());
    if !numeric {
        return;
    }

    for row in rows.iter_mut().filter(|row| !row.item.is_empty()) {
        if let Ok(value) = row.item.parse::<f64>() {
            row.item = format!("{value:.2}");
        }
    }
}
