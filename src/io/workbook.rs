use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::error::Result;
use crate::model::CellValue;

/// Sheet carrying primary purchase invoices.
pub const INVOICE_SHEET: &str = "B2B";
/// Sheet carrying credit/debit notes.
pub const NOTE_SHEET: &str = "CDNR";

// Portal exports stack captions and filter widgets above the data; the
// first transaction row is the seventh.
const DATA_START_ROW: u32 = 6;

/// Reads the leading `take_cols` cells of every populated row of the named
/// sheet, starting from the portal's first data row. A workbook without the
/// sheet yields zero rows; rows whose cells are all blank are skipped.
pub fn read_rows(path: &Path, sheet: &str, take_cols: usize) -> Result<Vec<Vec<CellValue>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let Some(range_result) = workbook.worksheet_range(sheet) else {
        debug!(sheet, "sheet not present in workbook");
        return Ok(Vec::new());
    };
    let range = range_result?;
    let Some(end_row) = range.end().map(|(row, _)| row) else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for row in DATA_START_ROW..=end_row {
        let cells: Vec<CellValue> = (0..take_cols)
            .map(|column| convert_cell(range.get_value((row, column as u32))))
            .collect();
        if cells.iter().all(CellValue::is_blank) {
            continue;
        }
        rows.push(cells);
    }
    Ok(rows)
}

fn convert_cell(cell: Option<&DataType>) -> CellValue {
    match cell {
        Some(DataType::String(value)) => CellValue::Text(value.clone()),
        Some(DataType::Float(value)) => CellValue::Number(*value),
        Some(DataType::Int(value)) => CellValue::Number(*value as f64),
        Some(DataType::Bool(value)) => CellValue::Text(value.to_string()),
        Some(value @ (DataType::DateTime(_) | DataType::DateTimeIso(_))) => value
            .as_datetime()
            .map(|datetime| CellValue::Date(datetime.date()))
            .unwrap_or(CellValue::Empty),
        Some(DataType::Error(_)) | Some(DataType::Empty) | None => CellValue::Empty,
        Some(other) => CellValue::Text(other.to_string()),
    }
}
