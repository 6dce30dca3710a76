//! Double-entry voucher synthesis.
//!
//! Each canonical transaction yields at most one voucher. Primary invoices
//! become Purchase vouchers; notes are mirrored from the counterparty's
//! perspective, so a supplier's debit note books here as a Credit Note and
//! everything else as a Debit Note. Amounts are signed Tally-style: debits
//! negative, credits positive, and every voucher sums to zero by
//! construction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::masters::{INPUT_CESS, INPUT_CGST, INPUT_IGST, INPUT_SGST, PURCHASE_TAXABLE};
use crate::model::Transaction;
use crate::normalize::UNKNOWN_SUPPLIER;

/// Voucher categories emitted by the converter, named as the import
/// facility knows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherKind {
    Purchase,
    DebitNote,
    CreditNote,
}

impl VoucherKind {
    /// Name used for both the `VCHTYPE` attribute and the
    /// `VOUCHERTYPENAME` element.
    pub fn type_name(&self) -> &'static str {
        match self {
            VoucherKind::Purchase => "Purchase",
            VoucherKind::DebitNote => "Debit Note",
            VoucherKind::CreditNote => "Credit Note",
        }
    }
}

/// Bill reference types understood by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillType {
    /// Opens a new outstanding bill.
    New,
    /// Settles against an existing bill.
    Against,
}

impl BillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::New => "New Ref",
            BillType::Against => "Agst Ref",
        }
    }
}

/// Billwise allocation attached to an entry; carries the same signed amount
/// as its parent entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillAllocation {
    pub name: String,
    pub bill_type: BillType,
    pub amount: Decimal,
}

/// One signed ledger posting inside a voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub ledger: String,
    pub amount: Decimal,
    pub bill: Option<BillAllocation>,
}

impl LedgerEntry {
    /// Debit entries carry negative amounts and are flagged deemed-positive
    /// on the wire.
    pub fn is_deemed_positive(&self) -> bool {
        self.amount.is_sign_negative()
    }
}

/// A fully synthesized voucher, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub kind: VoucherKind,
    /// Voucher and effective date, `yyyymmdd`.
    pub date: String,
    /// Voucher number; empty when document-number reuse is switched off.
    pub number: String,
    /// Source document number, always present.
    pub reference: String,
    pub narration: String,
    /// Party ledger the voucher settles against.
    pub party: String,
    /// Note vouchers import in accounting entry mode.
    pub accounting_mode: bool,
    pub entries: Vec<LedgerEntry>,
}

impl Voucher {
    /// Sum of the signed entry amounts; zero for every well-formed voucher.
    pub fn balance(&self) -> Decimal {
        self.entries
            .iter()
            .map(|entry| entry.amount)
            .sum()
    }
}

/// Synthesizes the Purchase voucher for a primary invoice, or `None` when
/// the transaction fails the validity gate.
pub fn purchase_voucher(transaction: &Transaction, use_document_numbers: bool) -> Option<Voucher> {
    let total = gate(transaction)?;
    let number = transaction.document_number.clone();
    let mut entries = Vec::new();
    if transaction.taxable_value > Decimal::ZERO {
        entries.push(LedgerEntry {
            ledger: PURCHASE_TAXABLE.to_string(),
            amount: -transaction.taxable_value,
            bill: Some(BillAllocation {
                name: number.clone(),
                bill_type: BillType::New,
                amount: -transaction.taxable_value,
            }),
        });
    }
    for (ledger, amount) in tax_heads(transaction) {
        if amount > Decimal::ZERO {
            entries.push(LedgerEntry {
                ledger: ledger.to_string(),
                amount: -amount,
                bill: None,
            });
        }
    }
    entries.push(LedgerEntry {
        ledger: transaction.party_name.clone(),
        amount: total,
        bill: Some(BillAllocation {
            name: number.clone(),
            bill_type: BillType::New,
            amount: total,
        }),
    });
    Some(Voucher {
        kind: VoucherKind::Purchase,
        date: transaction.document_date.clone(),
        number: voucher_number(&number, use_document_numbers),
        narration: format!(
            "Purchase from {} - Invoice: {}",
            transaction.party_name, number
        ),
        reference: number,
        party: transaction.party_name.clone(),
        accounting_mode: false,
        entries,
    })
}

/// Synthesizes the mirrored voucher for a credit/debit note, or `None` when
/// the transaction fails the validity gate.
pub fn note_voucher(transaction: &Transaction, use_document_numbers: bool) -> Option<Voucher> {
    let total = gate(transaction)?;
    let number = transaction.document_number.clone();
    let supplier_debit = transaction.document_type.to_lowercase().contains("debit");
    let (kind, narration_base, party_amount, component_sign) = if supplier_debit {
        // Supplier debited us, so we credit them back.
        (
            VoucherKind::CreditNote,
            "Credit Note (Supplier Debit)",
            total,
            Decimal::NEGATIVE_ONE,
        )
    } else {
        (
            VoucherKind::DebitNote,
            "Debit Note (Purchase Return)",
            -total,
            Decimal::ONE,
        )
    };
    let mut entries = vec![LedgerEntry {
        ledger: transaction.party_name.clone(),
        amount: party_amount,
        bill: Some(BillAllocation {
            name: number.clone(),
            bill_type: BillType::Against,
            amount: party_amount,
        }),
    }];
    if transaction.taxable_value > Decimal::ZERO {
        entries.push(LedgerEntry {
            ledger: PURCHASE_TAXABLE.to_string(),
            amount: component_sign * transaction.taxable_value,
            bill: None,
        });
    }
    for (ledger, amount) in tax_heads(transaction) {
        if amount > Decimal::ZERO {
            entries.push(LedgerEntry {
                ledger: ledger.to_string(),
                amount: component_sign * amount,
                bill: None,
            });
        }
    }
    Some(Voucher {
        kind,
        date: transaction.document_date.clone(),
        number: voucher_number(&number, use_document_numbers),
        narration: format!(
            "{narration_base} - Supplier: {} - Ref: {}",
            transaction.party_name, number
        ),
        reference: number,
        party: transaction.party_name.clone(),
        accounting_mode: true,
        entries,
    })
}

// A voucher needs an identified party, a document number, and something to
// post; anything else is dropped whole rather than imported half-filled.
fn gate(transaction: &Transaction) -> Option<Decimal> {
    let total = transaction.total();
    if transaction.party_name == UNKNOWN_SUPPLIER
        || transaction.document_number.is_empty()
        || total <= Decimal::ZERO
    {
        return None;
    }
    Some(total)
}

fn tax_heads(transaction: &Transaction) -> [(&'static str, Decimal); 4] {
    [
        (INPUT_IGST, transaction.igst),
        (INPUT_CGST, transaction.cgst),
        (INPUT_SGST, transaction.sgst),
        (INPUT_CESS, transaction.cess),
    ]
}

fn voucher_number(number: &str, use_document_numbers: bool) -> String {
    if use_document_numbers {
        number.to_string()
    } else {
        String::new()
    }
}
