use serde::Serialize;

use crate::masters::{self, MasterLedger};
use crate::model::Transaction;
use crate::voucher::{self, Voucher};

/// Report name of the masters request.
pub const MASTERS_REPORT: &str = "All Masters";
/// Report name of the vouchers request.
pub const VOUCHERS_REPORT: &str = "Vouchers";

/// The complete import document as a value: target company, master ledgers,
/// vouchers. Built once per run and never mutated afterwards; the serializer
/// walks it in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub company: String,
    pub masters: Vec<MasterLedger>,
    pub vouchers: Vec<Voucher>,
}

/// Assembles the envelope for one run: standing ledgers, then supplier
/// ledgers drawn from both categories, then all purchase vouchers followed
/// by all note vouchers in input order.
pub fn build_envelope(
    company: &str,
    invoices: &[Transaction],
    notes: &[Transaction],
    use_document_numbers: bool,
) -> Envelope {
    let mut masters = masters::standing_ledgers();
    masters.extend(masters::supplier_ledgers(invoices.iter().chain(notes)));
    let vouchers = invoices
        .iter()
        .filter_map(|transaction| voucher::purchase_voucher(transaction, use_document_numbers))
        .chain(
            notes
                .iter()
                .filter_map(|transaction| voucher::note_voucher(transaction, use_document_numbers)),
        )
        .collect();
    Envelope {
        company: company.to_string(),
        masters,
        vouchers,
    }
}
