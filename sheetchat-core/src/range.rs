//! Cell range notation (e.g. "A1:B10")

use crate::error::ReadError;
use std::fmt;
use std::str::FromStr;

/// A rectangular cell region with 0-based inclusive bounds.
///
/// Parsed from spreadsheet notation: column letters followed by a 1-based
/// row number, two corners separated by `:`. A bare reference such as `"C3"`
/// denotes a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl CellRange {
    /// Number of rows covered by the range.
    pub fn height(&self) -> usize {
        (self.end_row - self.start_row) as usize + 1
    }

    /// Number of columns covered by the range.
    pub fn width(&self) -> usize {
        (self.end_col - self.start_col) as usize + 1
    }
}

impl FromStr for CellRange {
    type Err = ReadError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (start, end) = match spec.split_once(':') {
            Some((a, b)) => (a, b),
            None => (spec, spec),
        };

        let (start_row, start_col) =
            parse_cell_ref(start).map_err(|reason| ReadError::invalid_range(spec, reason))?;
        let (end_row, end_col) =
            parse_cell_ref(end).map_err(|reason| ReadError::invalid_range(spec, reason))?;

        if start_row > end_row || start_col > end_col {
            return Err(ReadError::invalid_range(spec, "start cell is after end cell"));
        }

        Ok(CellRange {
            start_row,
            start_col,
            end_row,
            end_col,
        })
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            col_to_letters(self.start_col),
            self.start_row + 1,
            col_to_letters(self.end_col),
            self.end_row + 1
        )
    }
}

/// Parse a single cell reference ("B10") into 0-based (row, col).
fn parse_cell_ref(cell: &str) -> Result<(u32, u32), String> {
    let letters_len = cell.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    let (letters, digits) = cell.split_at(letters_len);

    if letters.is_empty() {
        return Err(format!("'{cell}' has no column letters"));
    }
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("'{cell}' has no valid row number"));
    }

    let col = letters_to_col(letters).ok_or_else(|| format!("'{letters}' is not a valid column"))?;
    let row: u32 = digits
        .parse()
        .map_err(|_| format!("'{digits}' is not a valid row number"))?;
    if row == 0 {
        return Err("row numbers start at 1".to_string());
    }

    Ok((row - 1, col))
}

/// Convert column letters to a 0-based index (A -> 0, Z -> 25, AA -> 26).
fn letters_to_col(letters: &str) -> Option<u32> {
    let mut col: u32 = 0;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8).checked_sub(b'A')? as u32;
        if digit > 25 {
            return None;
        }
        col = col.checked_mul(26)?.checked_add(digit + 1)?;
    }
    col.checked_sub(1)
}

/// Convert a 0-based column index to letters (0 -> A, 1 -> B, etc.)
fn col_to_letters(mut col: u32) -> String {
    let mut result = String::new();
    loop {
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}
