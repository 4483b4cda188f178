//! Prompt assembly from a question and a grid of cell values

use crate::grid::Grid;

/// Fixed instruction asking the model to answer in Chinese.
pub const ANSWER_LANGUAGE_HINT: &str = "请用中文回答。";

/// Combine a question with the serialized grid.
///
/// The grid renders one line per row with cells joined by `", "`, under an
/// `Excel Data Summary:` header; the language hint follows the final row
/// after a single space:
///
/// ```text
/// {question}\n\nExcel Data Summary:\n{rows} 请用中文回答。
/// ```
pub fn build_prompt(question: &str, grid: &Grid) -> String {
    let data = grid
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{question}\n\nExcel Data Summary:\n{data} {ANSWER_LANGUAGE_HINT}")
}
