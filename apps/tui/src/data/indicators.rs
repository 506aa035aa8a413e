use crate::data::sheet::{read_delimited, read_workbook, RawSheet};
use crate::domain::{Field, Record};
use crate::error::{DataError, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

pub const INDICATOR_COLUMNS: [Field; 4] =
    [Field::Category, Field::Attribute, Field::Area, Field::Metric];

/// One metric of the SDG attribute sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorRow {
    pub category: String,
    pub attribute: String,
    pub area: String,
    pub metric: String,
}

impl Record for IndicatorRow {
    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Category => Some(&self.category),
            Field::Attribute => Some(&self.attribute),
            Field::Area => Some(&self.area),
            Field::Metric => Some(&self.metric),
            Field::Theme | Field::Item => None,
        }
    }
}

/// Loads the attribute sheet and fills the vertically merged CATEGORY and ATTRIBUTE cells.
///
/// Spreadsheets (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read from their first
/// worksheet; `.csv` sheets are accepted with either `;` or `,` as delimiter.
pub fn load_indicators(path: &Path) -> Result<Vec<IndicatorRow>> {
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let sheet = match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        "csv" | "txt" => read_delimited(File::open(path)?)?,
        _ => {
            return Err(DataError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let rows = indicators_from_sheet(&sheet)?;
    info!(path = %path.display(), rows = rows.len(), "loaded indicator sheet");
    Ok(rows)
}

/// Maps a raw sheet onto indicator rows; rows whose four columns are all blank are skipped
pub fn indicators_from_sheet(sheet: &RawSheet) -> Result<Vec<IndicatorRow>> {
    let columns = INDICATOR_COLUMNS.map(Field::column);
    let indices = sheet.column_indices(&columns)?;
    let (category, attribute, area, metric) = (indices[0], indices[1], indices[2], indices[3]);

    let mut rows: Vec<IndicatorRow> = sheet
        .rows
        .iter()
        .map(|row| IndicatorRow {
            category: RawSheet::cell(row, category).to_string(),
            attribute: RawSheet::cell(row, attribute).to_string(),
            area: RawSheet::cell(row, area).to_string(),
            metric: RawSheet::cell(row, metric).to_string(),
        })
        .filter(|row| {
            !(row.category.is_empty()
                && row.attribute.is_empty()
                && row.area.is_empty()
                && row.metric.is_empty())
        })
        .collect();

    let skipped = sheet.rows.len() - rows.len();
    if skipped > 0 {
        debug!(skipped, "skipped blank indicator rows");
    }

    forward_fill(rows.iter_mut().map(|row| &mut row.category));
    forward_fill(rows.iter_mut().map(|row| &mut row.attribute));

    Ok(rows)
}

/// Replaces each blank cell with the nearest preceding non-blank value.
/// Blanks before the first value stay blank.
pub fn forward_fill<'a>(cells: impl IntoIterator<Item = &'a mut String>) {
    let mut last: Option<String> = None;
    for cell in cells {
        if cell.trim().is_empty() {
            if let Some(previous) = &last {
                cell.clone_from(previous);
            }
        } else {
            last = Some(cell.clone());
        }
    }
}
