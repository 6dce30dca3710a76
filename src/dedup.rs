//! Duplicate suppression for re-uploaded or overlapping exports.
//!
//! Suppliers routinely appear in more than one downloaded workbook, so the
//! pipeline keys every canonical transaction by a fingerprint of its
//! identity fields and keeps only the first occurrence. The set lives for
//! exactly one processing run and is held per record category, so an invoice
//! can never suppress a note that happens to share its fields.

use std::collections::HashSet;

use crate::model::Transaction;
use crate::normalize::normalize_document_number;

/// Identity key of a canonical transaction: tax ID, normalized document
/// number, canonical date and the five amounts stringified at two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    gstin: String,
    document_number: String,
    document_date: String,
    taxable_value: String,
    igst: String,
    cgst: String,
    sgst: String,
    cess: String,
}

impl Fingerprint {
    /// Derives the fingerprint of a canonical transaction.
    pub fn of(transaction: &Transaction) -> Self {
        Self {
            gstin: transaction.gstin.clone(),
            document_number: normalize_document_number(&transaction.document_number),
            document_date: transaction.document_date.clone(),
            taxable_value: transaction.taxable_value.to_string(),
            igst: transaction.igst.to_string(),
            cgst: transaction.cgst.to_string(),
            sgst: transaction.sgst.to_string(),
            cess: transaction.cess.to_string(),
        }
    }
}

/// First-occurrence filter over transaction fingerprints, scoped to one
/// processing run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<Fingerprint>,
}

impl Deduplicator {
    /// Creates an empty deduplicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the transaction's fingerprint, returning `true` the first
    /// time it is seen and `false` for every later duplicate.
    pub fn insert(&mut self, transaction: &Transaction) -> bool {
        self.seen.insert(Fingerprint::of(transaction))
    }
}

/// Keeps the first occurrence of every fingerprint, preserving input order.
pub fn deduplicate(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut deduplicator = Deduplicator::new();
    transactions
        .into_iter()
        .filter(|transaction| deduplicator.insert(transaction))
        .collect()
}
