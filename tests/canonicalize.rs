use chrono::{Local, NaiveDate};
use gstr2tally::dedup::{Deduplicator, deduplicate};
use gstr2tally::layout::{invoice_records, note_records};
use gstr2tally::model::{CellValue, RawRecord};
use gstr2tally::normalize::{
    UNKNOWN_SUPPLIER, canonical_date, canonical_transaction, clean_party_name, is_summary_row,
    normalize_document_number, round_amount,
};

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn record(
    party: &str,
    number: &str,
    document_type: &str,
    date: &str,
    amounts: [&str; 5],
) -> RawRecord {
    RawRecord {
        gstin: text("27AAACR5055K1Z5"),
        party_name: text(party),
        document_number: text(number),
        document_type: text(document_type),
        document_date: text(date),
        taxable_value: text(amounts[0]),
        igst: text(amounts[1]),
        cgst: text(amounts[2]),
        sgst: text(amounts[3]),
        cess: text(amounts[4]),
    }
}

#[test]
fn date_spellings_share_one_canonical_form() {
    let spellings = [
        "01-04-24",
        "01/04/24",
        "01.04.24",
        "01-04-2024",
        "01/04/2024",
        "2024-04-01",
        "01-Apr-2024",
        "01 Apr 2024",
    ];
    for spelling in spellings {
        assert_eq!(canonical_date(&text(spelling)), "20240401", "spelling {spelling}");
    }
    let date = NaiveDate::from_ymd_opt(2024, 4, 1).expect("calendar date");
    assert_eq!(canonical_date(&CellValue::Date(date)), "20240401");
}

#[test]
fn two_digit_years_resolve_into_this_century() {
    assert_eq!(canonical_date(&text("31-12-24")), "20241231");
    assert_eq!(canonical_date(&text("05/06/00")), "20000605");
}

#[test]
fn eight_digit_dates_pass_through_untouched() {
    assert_eq!(canonical_date(&text("20240401")), "20240401");
    assert_eq!(canonical_date(&CellValue::Number(20240401.0)), "20240401");
}

#[test]
fn blank_dates_fall_back_to_today() {
    for cell in [CellValue::Empty, text(""), text("-"), text("not a date")] {
        let before = Local::now().date_naive().format("%Y%m%d").to_string();
        let result = canonical_date(&cell);
        let after = Local::now().date_naive().format("%Y%m%d").to_string();
        assert!(result == before || result == after, "cell {cell:?}");
    }
}

#[test]
fn amounts_round_half_up_to_two_places() {
    assert_eq!(round_amount(&text("1234.567")).to_string(), "1234.57");
    assert_eq!(round_amount(&text("1.005")).to_string(), "1.01");
    assert_eq!(round_amount(&CellValue::Number(2.675)).to_string(), "2.68");
    assert_eq!(round_amount(&CellValue::Number(90.0)).to_string(), "90.00");
    assert_eq!(round_amount(&text("1000")).to_string(), "1000.00");
    assert_eq!(round_amount(&text("1.5e3")).to_string(), "1500.00");
}

#[test]
fn rounding_is_idempotent() {
    for literal in ["1234.567", "1.005", "0.01", "99999"] {
        let rounded = round_amount(&text(literal));
        assert_eq!(round_amount(&text(&rounded.to_string())), rounded, "literal {literal}");
    }
}

#[test]
fn unusable_amounts_round_to_zero() {
    for cell in [
        CellValue::Empty,
        text(""),
        text(" "),
        text("-"),
        text("N/A"),
        text("1,234.56"),
    ] {
        assert_eq!(round_amount(&cell).to_string(), "0.00", "cell {cell:?}");
    }
}

#[test]
fn canonical_amounts_clamp_negatives_to_zero() {
    let transaction = canonical_transaction(&record(
        "Acme Traders",
        "CN-77",
        "Credit Note",
        "01-04-2024",
        ["-250.00", "0", "0", "0", "12.50"],
    ))
    .expect("transaction");
    assert_eq!(transaction.taxable_value.to_string(), "0.00");
    assert_eq!(transaction.cess.to_string(), "12.50");
    assert_eq!(transaction.total().to_string(), "12.50");
}

#[test]
fn party_names_lose_tax_id_suffixes() {
    assert_eq!(
        clean_party_name(&text("Acme Traders - 27AAACR5055K1Z5")),
        "Acme Traders"
    );
    assert_eq!(
        clean_party_name(&text("Acme Traders-27AAACR5055K1Z5")),
        "Acme Traders"
    );
    assert_eq!(
        clean_party_name(&text("Acme  Traders   Pvt Ltd")),
        "Acme Traders Pvt Ltd"
    );
    // Lowercase trailers are not tax IDs and must survive.
    assert_eq!(
        clean_party_name(&text("Acme Traders - 27aaacr5055k1z5")),
        "Acme Traders - 27aaacr5055k1z5"
    );
}

#[test]
fn missing_party_names_become_the_placeholder() {
    assert_eq!(clean_party_name(&CellValue::Empty), UNKNOWN_SUPPLIER);
    assert_eq!(clean_party_name(&text("   ")), UNKNOWN_SUPPLIER);
    assert_eq!(clean_party_name(&text("- 27AAACR5055K1Z5")), UNKNOWN_SUPPLIER);
}

#[test]
fn document_numbers_normalize_for_fingerprints() {
    assert_eq!(normalize_document_number("INV-01 Total"), "INV-01");
    assert_eq!(normalize_document_number("12345-TOT"), "12345");
    assert_eq!(normalize_document_number(" INV@01 "), "INV01");
    assert_eq!(normalize_document_number("CN/2024-25/0042"), "CN/2024-25/0042");
    assert_eq!(normalize_document_number("  "), "");
}

#[test]
fn summary_rows_are_detected() {
    assert!(is_summary_row("", "INV-01"));
    assert!(is_summary_row("-", "INV-01"));
    assert!(is_summary_row("—", "INV-01"));
    assert!(is_summary_row("Regular", "12345 Total"));
    assert!(is_summary_row("Regular", "GRAND TOT"));
    assert!(!is_summary_row("Regular", "INV-01"));
    assert!(!is_summary_row("Regular", "Total-123"));
}

#[test]
fn summary_rows_never_become_transactions() {
    let amounts = ["1000", "0", "90", "90", "0"];
    let total_line = record("Acme Traders", "12345 Total", "Regular", "01-04-2024", amounts);
    assert_eq!(canonical_transaction(&total_line), None);
    let blank_type = record("Acme Traders", "INV-01", "", "01-04-2024", amounts);
    assert_eq!(canonical_transaction(&blank_type), None);
}

#[test]
fn canonical_transactions_apply_every_default() {
    let transaction = canonical_transaction(&record(
        " Acme Traders - 27AAACR5055K1Z5 ",
        " INV-01 ",
        " Regular ",
        "01-04-24",
        ["1000", "", "90.004", "90.005", "-"],
    ))
    .expect("transaction");
    assert_eq!(transaction.gstin, "27AAACR5055K1Z5");
    assert_eq!(transaction.party_name, "Acme Traders");
    assert_eq!(transaction.document_number, "INV-01");
    assert_eq!(transaction.document_type, "Regular");
    assert_eq!(transaction.document_date, "20240401");
    assert_eq!(transaction.taxable_value.to_string(), "1000.00");
    assert_eq!(transaction.igst.to_string(), "0.00");
    assert_eq!(transaction.cgst.to_string(), "90.00");
    assert_eq!(transaction.sgst.to_string(), "90.01");
    assert_eq!(transaction.cess.to_string(), "0.00");
    assert_eq!(transaction.total().to_string(), "1180.01");
}

#[test]
fn invoice_rows_map_by_fixed_position() {
    let row = vec![
        text("27AAACR5055K1Z5"),
        text("Acme Traders"),
        text("INV-01"),
        text("Regular"),
        text("01-04-2024"),
        text("1180.00"),
        CellValue::Empty,
        CellValue::Empty,
        CellValue::Empty,
        text("1000"),
        text("0"),
        text("90"),
        text("90"),
        text("0"),
    ];
    let records = invoice_records(&[row]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].gstin, text("27AAACR5055K1Z5"));
    assert_eq!(records[0].party_name, text("Acme Traders"));
    assert_eq!(records[0].document_number, text("INV-01"));
    assert_eq!(records[0].document_type, text("Regular"));
    assert_eq!(records[0].document_date, text("01-04-2024"));
    assert_eq!(records[0].taxable_value, text("1000"));
    assert_eq!(records[0].cess, text("0"));
}

#[test]
fn note_rows_shift_left_when_the_tax_id_column_is_blank() {
    let with_gstin = vec![
        text("27AAACR5055K1Z5"),
        text("Acme Traders"),
        text("Credit Note"),
        text("CN-9"),
        text("Regular"),
        text("05-04-2024"),
        text("590.00"),
        text("27"),
        text("N"),
        text("18"),
        text("500"),
        text("0"),
        text("45"),
        text("45"),
        text("0"),
    ];
    let records = note_records(&[with_gstin]);
    assert_eq!(records[0].gstin, text("27AAACR5055K1Z5"));
    assert_eq!(records[0].party_name, text("Acme Traders"));
    assert_eq!(records[0].document_type, text("Credit Note"));
    assert_eq!(records[0].document_number, text("CN-9"));
    assert_eq!(records[0].document_date, text("05-04-2024"));
    assert_eq!(records[0].taxable_value, text("500"));
    assert_eq!(records[0].cgst, text("45"));

    let without_gstin = vec![
        CellValue::Empty,
        text("Credit Note"),
        text("CN-9"),
        text("Regular"),
        text("05-04-2024"),
        text("590.00"),
        text("27"),
        text("N"),
        text("18"),
        text("500"),
        text("0"),
        text("45"),
        text("45"),
        text("0"),
        CellValue::Empty,
    ];
    let records = note_records(&[without_gstin]);
    assert_eq!(records[0].gstin, CellValue::Empty);
    assert_eq!(records[0].party_name, CellValue::Empty);
    assert_eq!(records[0].document_type, text("Credit Note"));
    assert_eq!(records[0].document_number, text("CN-9"));
    assert_eq!(records[0].document_date, text("05-04-2024"));
    assert_eq!(records[0].taxable_value, text("500"));
    assert_eq!(records[0].cgst, text("45"));
}

#[test]
fn duplicate_fingerprints_keep_the_first_occurrence() {
    let amounts = ["1000", "0", "90", "90", "0"];
    let first = canonical_transaction(&record(
        "Acme Traders",
        "INV-01",
        "Regular",
        "01-04-2024",
        amounts,
    ))
    .expect("first transaction");
    let respelled = canonical_transaction(&record(
        "Acme Traders",
        "INV - 01",
        "Regular",
        "01/04/24",
        amounts,
    ))
    .expect("respelled transaction");
    let other = canonical_transaction(&record(
        "Acme Traders",
        "INV-02",
        "Regular",
        "01-04-2024",
        amounts,
    ))
    .expect("other transaction");

    let kept = deduplicate(vec![first.clone(), respelled, other.clone()]);
    assert_eq!(kept, vec![first, other]);
}

#[test]
fn deduplication_state_is_scoped_to_one_run() {
    let transaction = canonical_transaction(&record(
        "Acme Traders",
        "INV-01",
        "Regular",
        "01-04-2024",
        ["1000", "0", "90", "90", "0"],
    ))
    .expect("transaction");

    let mut first_run = Deduplicator::new();
    assert!(first_run.insert(&transaction));
    assert!(!first_run.insert(&transaction));

    let mut second_run = Deduplicator::new();
    assert!(second_run.insert(&transaction));
}
