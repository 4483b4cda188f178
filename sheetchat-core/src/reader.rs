//! Spreadsheet range reader using calamine

use crate::error::ReadError;
use crate::grid::{CellValue, Grid};
use crate::range::CellRange;
use calamine::{Data, Range, Reader, open_workbook_auto};
use log::debug;
use std::path::Path;

/// Read a rectangular cell range from the active sheet of a spreadsheet file.
///
/// The active sheet is the workbook's first worksheet. With a range, the
/// returned grid's dimensions equal the range bounds and cells without a
/// stored value are [`CellValue::Empty`], including cells beyond the sheet's
/// populated extent. Without a range, the grid covers the populated extent.
///
/// Errors always propagate as typed values; an empty grid never stands in
/// for an unreadable file.
pub fn read_range<P: AsRef<Path>>(path: P, range: Option<&CellRange>) -> Result<Grid, ReadError> {
    let path = path.as_ref();
    // Open workbook with calamine; the file handle lives for this call only.
    let mut workbook = open_workbook_auto(path).map_err(|source| ReadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReadError::FileAccess {
            path: path.to_path_buf(),
            source: calamine::Error::Msg("workbook has no sheets"),
        })?;

    let cells = workbook
        .worksheet_range(&sheet_name)
        .map_err(|source| ReadError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "opened {} sheet '{}', populated extent {:?}",
        path.display(),
        sheet_name,
        cells.get_size()
    );

    Ok(match range {
        Some(rect) => slice_range(&cells, rect),
        None => full_grid(&cells),
    })
}

/// Extract a fixed rectangle out of a sheet's populated range, padding cells
/// outside the populated area with [`CellValue::Empty`].
fn slice_range(cells: &Range<Data>, rect: &CellRange) -> Grid {
    // calamine ranges are anchored at the first populated cell; indexing into
    // them is relative to that origin.
    let origin = cells.start();
    let mut rows = Vec::with_capacity(rect.height());

    for row in rect.start_row..=rect.end_row {
        let mut values = Vec::with_capacity(rect.width());
        for col in rect.start_col..=rect.end_col {
            let value = origin
                .filter(|(r0, c0)| row >= *r0 && col >= *c0)
                .and_then(|(r0, c0)| cells.get(((row - r0) as usize, (col - c0) as usize)))
                .map(cell_value)
                .unwrap_or(CellValue::Empty);
            values.push(value);
        }
        rows.push(values);
    }

    Grid { rows }
}

/// Convert a sheet's entire populated range into a grid.
fn full_grid(cells: &Range<Data>) -> Grid {
    Grid {
        rows: cells
            .rows()
            .map(|row| row.iter().map(cell_value).collect())
            .collect(),
    }
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        // Error cells surface as their display literal so a serialized grid
        // shows what the sheet shows.
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
