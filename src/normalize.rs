//! Canonicalization of raw workbook cells into [`Transaction`] fields.
//!
//! Portal exports are messy: dates arrive in half a dozen spellings, amounts
//! as text or numbers, supplier names with tax-ID suffixes bolted on, and
//! every sheet ends in summary rows that must not become vouchers. Each
//! helper here owns one of those fallback chains; [`canonical_transaction`]
//! applies them all exactly once per row.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::{CellValue, RawRecord, Transaction};

/// Ledger name standing in for suppliers whose name is missing or unusable.
pub const UNKNOWN_SUPPLIER: &str = "Unknown Supplier";

/// Date layout the import facility expects, e.g. `20240401`.
pub const TALLY_DATE: &str = "%Y%m%d";

const TWO_DIGIT_YEAR_FORMATS: [&str; 3] = ["%d-%m-%y", "%d/%m/%y", "%d.%m.%y"];
const FOUR_DIGIT_YEAR_FORMATS: [&str; 5] =
    ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d", "%d-%b-%Y", "%d %b %Y"];

fn tax_id_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*-\s*[A-Z0-9]{15}$").expect("tax id suffix regex"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace run regex"))
}

fn summary_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:-|\s)*(?:total|tot|toi)\s*$").expect("summary suffix regex")
    })
}

fn number_charset() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9/-]").expect("document number charset regex"))
}

/// Parses a cell into a money amount rounded half-up (ties away from zero)
/// to two decimal places. Blank and unparseable cells round to `0.00`;
/// scientific notation is accepted because spreadsheets occasionally store
/// large amounts that way.
pub fn round_amount(cell: &CellValue) -> Decimal {
    let parsed = match cell {
        CellValue::Number(value) => Decimal::from_f64(*value),
        CellValue::Empty | CellValue::Date(_) => None,
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed == "-" {
                None
            } else {
                Decimal::from_str(trimmed)
                    .ok()
                    .or_else(|| Decimal::from_scientific(trimmed).ok())
            }
        }
    };
    round_half_up(parsed.unwrap_or_default())
}

fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never widens the scale, so pad integers back out to `x.00`.
    rounded.rescale(2);
    rounded
}

/// Canonicalizes a date cell into the `yyyymmdd` form.
///
/// Date-typed cells format directly. Text runs a fallback chain: two-digit
/// year forms first (parsed years before 2000 are shifted into this century),
/// then an 8-digit literal passes through untouched, then the four-digit year
/// forms. Blank or exhausted input falls back to today, the only place the
/// converter consults the clock.
pub fn canonical_date(cell: &CellValue) -> String {
    match cell {
        CellValue::Date(date) => date.format(TALLY_DATE).to_string(),
        CellValue::Empty => today(),
        CellValue::Number(value) => parse_date_text(&value.to_string()),
        CellValue::Text(text) => parse_date_text(text),
    }
}

fn parse_date_text(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return today();
    }
    for format in TWO_DIGIT_YEAR_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            let adjusted = if date.year() < 2000 {
                date.with_year(date.year() + 2000)
            } else {
                Some(date)
            };
            if let Some(date) = adjusted {
                return date.format(TALLY_DATE).to_string();
            }
        }
    }
    if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.to_string();
    }
    for format in FOUR_DIGIT_YEAR_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format(TALLY_DATE).to_string();
        }
    }
    today()
}

fn today() -> String {
    Local::now().date_naive().format(TALLY_DATE).to_string()
}

/// Cleans a supplier name: strips one trailing `- <15-char tax ID>` suffix,
/// collapses interior whitespace runs, and substitutes [`UNKNOWN_SUPPLIER`]
/// when nothing usable remains.
pub fn clean_party_name(cell: &CellValue) -> String {
    let text = cell.to_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return UNKNOWN_SUPPLIER.to_string();
    }
    let without_tax_id = tax_id_suffix().replace(trimmed, "");
    let collapsed = whitespace_runs().replace_all(&without_tax_id, " ");
    if collapsed.is_empty() {
        UNKNOWN_SUPPLIER.to_string()
    } else {
        collapsed.into_owned()
    }
}

/// Normalizes a document number for fingerprinting: strips a trailing
/// summary token (`total`, `tot`, `toi`) and every character outside
/// letters, digits, `/` and `-`. Blank input normalizes to the empty string.
pub fn normalize_document_number(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let without_summary = summary_suffix().replace(trimmed, "");
    number_charset().replace_all(&without_summary, "").into_owned()
}

/// Detects sheet summary rows from their trimmed type and number text: a
/// blank or dash-like type cell, or a document number ending in a summary
/// token, marks the row as a total line rather than a transaction.
pub fn is_summary_row(document_type: &str, document_number: &str) -> bool {
    matches!(document_type, "" | "-" | "—") || summary_suffix().is_match(document_number)
}

/// Builds the canonical transaction for one raw record, or `None` when the
/// record is a summary row. All field defaults are applied here and nowhere
/// else.
pub fn canonical_transaction(record: &RawRecord) -> Option<Transaction> {
    let document_type = record.document_type.to_text().trim().to_string();
    let document_number = record.document_number.to_text().trim().to_string();
    if is_summary_row(&document_type, &document_number) {
        return None;
    }
    Some(Transaction {
        gstin: record.gstin.to_text().trim().to_string(),
        party_name: clean_party_name(&record.party_name),
        document_number,
        document_type,
        document_date: canonical_date(&record.document_date),
        taxable_value: monetary(&record.taxable_value),
        igst: monetary(&record.igst),
        cgst: monetary(&record.cgst),
        sgst: monetary(&record.sgst),
        cess: monetary(&record.cess),
    })
}

// Canonical amounts are never negative; the note direction, not the sign,
// carries reversal semantics.
fn monetary(cell: &CellValue) -> Decimal {
    let mut amount = round_amount(cell).max(Decimal::ZERO);
    amount.rescale(2);
    amount
}
