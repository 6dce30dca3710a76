use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::dedup;
use crate::document;
use crate::error::Result;
use crate::io::tally_xml;
use crate::io::workbook::{self, INVOICE_SHEET, NOTE_SHEET};
use crate::layout::{self, INVOICE_COLUMNS, NOTE_COLUMNS};
use crate::model::{CellValue, RawRecord, Transaction};
use crate::normalize;

/// Run-wide configuration supplied by the caller.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Company the document targets; copied verbatim into both requests.
    pub company: String,
    /// Reuse the source document number as the voucher number.
    pub use_document_numbers: bool,
}

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Canonical invoice transactions after deduplication.
    pub invoice_rows: usize,
    /// Canonical note transactions after deduplication.
    pub note_rows: usize,
    /// Vouchers emitted into the document.
    pub vouchers: usize,
}

/// Outcome of a conversion: the rendered document plus its summary.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub xml: String,
    pub summary: RunSummary,
}

/// Converts the given workbooks into one combined import document.
#[instrument(level = "info", skip_all, fields(inputs = inputs.len()))]
pub fn convert_workbooks(inputs: &[PathBuf], options: &ConvertOptions) -> Result<Conversion> {
    let mut invoice_records: Vec<RawRecord> = Vec::new();
    let mut note_records: Vec<RawRecord> = Vec::new();
    for path in inputs {
        invoice_records.extend(read_category(
            path,
            INVOICE_SHEET,
            INVOICE_COLUMNS,
            layout::invoice_records,
        ));
        note_records.extend(read_category(
            path,
            NOTE_SHEET,
            NOTE_COLUMNS,
            layout::note_records,
        ));
    }

    let invoices = canonicalize(invoice_records);
    let notes = canonicalize(note_records);
    info!(
        invoice_rows = invoices.len(),
        note_rows = notes.len(),
        "canonicalized transactions"
    );

    let envelope = document::build_envelope(
        &options.company,
        &invoices,
        &notes,
        options.use_document_numbers,
    );
    debug!(
        masters = envelope.masters.len(),
        vouchers = envelope.vouchers.len(),
        "document assembled"
    );
    let summary = RunSummary {
        invoice_rows: invoices.len(),
        note_rows: notes.len(),
        vouchers: envelope.vouchers.len(),
    };
    let xml = tally_xml::render(&envelope)?;
    Ok(Conversion { xml, summary })
}

/// Converts workbooks and writes the document to `output`.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn convert_to_file(
    inputs: &[PathBuf],
    output: &Path,
    options: &ConvertOptions,
) -> Result<RunSummary> {
    let conversion = convert_workbooks(inputs, options)?;
    fs::write(output, &conversion.xml)?;
    info!(
        vouchers = conversion.summary.vouchers,
        "import document written"
    );
    Ok(conversion.summary)
}

// One unreadable sheet must not sink the rest of the run; the portal hands
// out the occasional truncated download.
fn read_category(
    path: &Path,
    sheet: &str,
    take_cols: usize,
    map: fn(&[Vec<CellValue>]) -> Vec<RawRecord>,
) -> Vec<RawRecord> {
    match workbook::read_rows(path, sheet, take_cols) {
        Ok(rows) => map(&rows),
        Err(error) => {
            warn!(input = %path.display(), sheet, error = %error, "skipping unreadable sheet");
            Vec::new()
        }
    }
}

fn canonicalize(records: Vec<RawRecord>) -> Vec<Transaction> {
    dedup::deduplicate(
        records
            .iter()
            .filter_map(normalize::canonical_transaction)
            .collect(),
    )
}
