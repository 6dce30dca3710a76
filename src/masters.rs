//! Chart-of-accounts definitions shipped ahead of the vouchers.
//!
//! The import facility refuses vouchers that post to unknown ledgers, so
//! every document opens with a masters request: a fixed standing set plus
//! one billwise ledger per supplier seen in the run.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::Transaction;
use crate::normalize::UNKNOWN_SUPPLIER;

pub const PURCHASE_TAXABLE: &str = "Purchase Taxable";
pub const PURCHASE_NIL_RATED: &str = "Purchase Nil Rated";
pub const ROUNDING_OFF: &str = "Rounding Off";
pub const INPUT_IGST: &str = "INPUT IGST";
pub const INPUT_CGST: &str = "INPUT CGST";
pub const INPUT_SGST: &str = "INPUT SGST";
pub const INPUT_CESS: &str = "INPUT CESS";

pub const PURCHASE_ACCOUNTS: &str = "Purchase Accounts";
pub const DUTIES_AND_TAXES: &str = "Duties & Taxes";
pub const INDIRECT_EXPENSES: &str = "Indirect Expenses";
pub const SUNDRY_CREDITORS: &str = "Sundry Creditors";

/// GST metadata carried by duty ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxInfo {
    /// GST duty head, e.g. `Integrated Tax`.
    pub duty_head: &'static str,
}

/// One ledger master definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasterLedger {
    pub name: String,
    pub parent: &'static str,
    /// Whether bill references may be allocated against the ledger.
    pub billwise: bool,
    /// Present on duty ledgers only; switches the serialized field set.
    pub tax: Option<TaxInfo>,
}

impl MasterLedger {
    fn basic(name: impl Into<String>, parent: &'static str) -> Self {
        Self {
            name: name.into(),
            parent,
            billwise: false,
            tax: None,
        }
    }

    fn tax_input(name: &'static str, duty_head: &'static str) -> Self {
        Self {
            name: name.to_string(),
            parent: DUTIES_AND_TAXES,
            billwise: false,
            tax: Some(TaxInfo { duty_head }),
        }
    }

    fn supplier(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: SUNDRY_CREDITORS,
            billwise: true,
            tax: None,
        }
    }
}

/// The fixed ledgers every import document carries, in contract order.
pub fn standing_ledgers() -> Vec<MasterLedger> {
    vec![
        MasterLedger::basic(PURCHASE_TAXABLE, PURCHASE_ACCOUNTS),
        MasterLedger::basic(PURCHASE_NIL_RATED, PURCHASE_ACCOUNTS),
        MasterLedger::tax_input(INPUT_IGST, "Integrated Tax"),
        MasterLedger::tax_input(INPUT_CGST, "Central Tax"),
        MasterLedger::tax_input(INPUT_SGST, "State Tax"),
        MasterLedger::tax_input(INPUT_CESS, "Cess"),
        MasterLedger::basic(ROUNDING_OFF, INDIRECT_EXPENSES),
    ]
}

/// One billwise ledger per distinct supplier across the given transactions,
/// sorted by name; the placeholder supplier never becomes a ledger.
pub fn supplier_ledgers<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<MasterLedger> {
    let names: BTreeSet<&str> = transactions
        .into_iter()
        .map(|transaction| transaction.party_name.as_str())
        .filter(|name| *name != UNKNOWN_SUPPLIER)
        .collect();
    names.into_iter().map(MasterLedger::supplier).collect()
}
