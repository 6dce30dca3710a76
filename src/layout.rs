//! Positional column mapping from sheet rows to [`RawRecord`]s.
//!
//! The portal never ships column headers worth trusting, so both sheets are
//! mapped by position. The note sheet additionally comes in two variants,
//! with and without a leading GSTIN column, resolved per file.

use crate::model::{CellValue, RawRecord};

/// Leading columns consumed from the primary-invoice sheet.
pub const INVOICE_COLUMNS: usize = 14;

/// Leading columns consumed from the credit/debit-note sheet.
pub const NOTE_COLUMNS: usize = 15;

/// Maps primary-invoice rows: GSTIN, party, number, type, date, gross value,
/// three ignored columns, taxable value, IGST, CGST, SGST, CESS.
pub fn invoice_records(rows: &[Vec<CellValue>]) -> Vec<RawRecord> {
    rows.iter()
        .map(|row| RawRecord {
            gstin: cell(row, 0),
            party_name: cell(row, 1),
            document_number: cell(row, 2),
            document_type: cell(row, 3),
            document_date: cell(row, 4),
            taxable_value: cell(row, 9),
            igst: cell(row, 10),
            cgst: cell(row, 11),
            sgst: cell(row, 12),
            cess: cell(row, 13),
        })
        .collect()
}

/// Maps note rows. The full variant reads GSTIN, party, note type, note
/// number, supply type, date, note value, place of supply, reverse charge,
/// rate, taxable value and the four tax heads; when the GSTIN column is
/// blank all the way down the file, the variant without it applies and the
/// mapping shifts left by one with an empty GSTIN.
pub fn note_records(rows: &[Vec<CellValue>]) -> Vec<RawRecord> {
    let with_gstin = !first_column_blank(rows);
    let base = if with_gstin { 1 } else { 0 };
    rows.iter()
        .map(|row| RawRecord {
            gstin: if with_gstin { cell(row, 0) } else { CellValue::Empty },
            party_name: cell(row, base),
            // Note sheets carry the type column before the number column.
            document_number: cell(row, base + 2),
            document_type: cell(row, base + 1),
            document_date: cell(row, base + 4),
            taxable_value: cell(row, base + 9),
            igst: cell(row, base + 10),
            cgst: cell(row, base + 11),
            sgst: cell(row, base + 12),
            cess: cell(row, base + 13),
        })
        .collect()
}

fn first_column_blank(rows: &[Vec<CellValue>]) -> bool {
    rows.iter()
        .all(|row| row.first().is_none_or(CellValue::is_blank))
}

fn cell(row: &[CellValue], index: usize) -> CellValue {
    row.get(index).cloned().unwrap_or(CellValue::Empty)
}
