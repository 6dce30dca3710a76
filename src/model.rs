use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as read from a source workbook.
///
/// Portal exports are loosely typed: the same column may carry text in one
/// file and a real date or number in the next. Keeping the raw variant around
/// lets the normalizer pick the right fallback chain per cell instead of
/// guessing from a stringified value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Cell without a value.
    Empty,
    /// Plain text content.
    Text(String),
    /// Numeric content, including integers stored as floats.
    Number(f64),
    /// A cell carrying real date semantics in the workbook.
    Date(NaiveDate),
}

impl CellValue {
    /// Returns `true` when the cell carries no usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) | CellValue::Date(_) => false,
        }
    }

    /// Stringifies the cell the way the downstream normalizers expect:
    /// blank cells become the empty string and integral floats drop the
    /// fractional part.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Date(date) => date.to_string(),
        }
    }
}

/// The cells of one source row the pipeline consumes, keyed by meaning
/// rather than by column position. Produced by the layout mapper for both
/// record categories; unused source columns are dropped at mapping time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub gstin: CellValue,
    pub party_name: CellValue,
    pub document_number: CellValue,
    pub document_type: CellValue,
    pub document_date: CellValue,
    pub taxable_value: CellValue,
    pub igst: CellValue,
    pub cgst: CellValue,
    pub sgst: CellValue,
    pub cess: CellValue,
}

/// A fully normalized transaction, the unit the deduplicator and the voucher
/// synthesizer operate on.
///
/// All defaults have been applied by the time this exists: the party name is
/// cleaned, the date is in `yyyymmdd` form, and the monetary fields carry
/// exactly two fractional digits and are never negative. The document number
/// keeps the trimmed source spelling so vouchers reference what the supplier
/// actually printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Supplier tax identifier, empty when the export omits it.
    pub gstin: String,
    /// Cleaned supplier name, `Unknown Supplier` when unusable.
    pub party_name: String,
    /// Trimmed invoice or note number as written in the source.
    pub document_number: String,
    /// Trimmed source document type text, e.g. `Regular` or `Debit Note`.
    pub document_type: String,
    /// Canonical document date, `yyyymmdd`.
    pub document_date: String,
    pub taxable_value: Decimal,
    pub igst: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub cess: Decimal,
}

impl Transaction {
    /// Gross value of the transaction: taxable amount plus all tax heads.
    pub fn total(&self) -> Decimal {
        self.taxable_value + self.igst + self.cgst + self.sgst + self.cess
    }
}
