//! Serialization of the [`Envelope`] into the import facility's XML dialect.
//!
//! The element and attribute names here are an external contract consumed
//! by an accounting system; do not rename them. Layout follows the facility's
//! conventions: two-space indentation, inline text content, blank fields as
//! self-closing elements.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::{Envelope, MASTERS_REPORT, VOUCHERS_REPORT};
use crate::error::Result;
use crate::masters::MasterLedger;
use crate::voucher::{LedgerEntry, Voucher};

/// Renders the envelope into the final output text.
pub fn render(envelope: &Envelope) -> Result<String> {
    let mut writer = XmlWriter::new();
    writer.declaration()?;
    writer.start("ENVELOPE")?;
    writer.start("HEADER")?;
    writer.text_element("TALLYREQUEST", "Import Data")?;
    writer.end("HEADER")?;

    open_request(&mut writer, MASTERS_REPORT, &envelope.company)?;
    writer.start_with_attrs("TALLYMESSAGE", &[("xmlns:UDF", "TallyUDF")])?;
    for ledger in &envelope.masters {
        write_ledger(&mut writer, ledger)?;
    }
    writer.end("TALLYMESSAGE")?;
    close_request(&mut writer)?;

    open_request(&mut writer, VOUCHERS_REPORT, &envelope.company)?;
    for voucher in &envelope.vouchers {
        write_voucher(&mut writer, voucher)?;
    }
    close_request(&mut writer)?;

    writer.end("ENVELOPE")?;
    Ok(writer.into_string())
}

// Each request gets its own BODY/IMPORTDATA block; the importer reads the
// masters block before it sees the first voucher.
fn open_request(writer: &mut XmlWriter, report: &str, company: &str) -> Result<()> {
    writer.start("BODY")?;
    writer.start("IMPORTDATA")?;
    writer.start("REQUESTDESC")?;
    writer.text_element("REPORTNAME", report)?;
    writer.start("STATICVARIABLES")?;
    writer.text_element("SVCURRENTCOMPANY", company)?;
    writer.end("STATICVARIABLES")?;
    writer.end("REQUESTDESC")?;
    writer.start("REQUESTDATA")
}

fn close_request(writer: &mut XmlWriter) -> Result<()> {
    writer.end("REQUESTDATA")?;
    writer.end("IMPORTDATA")?;
    writer.end("BODY")
}

fn write_ledger(writer: &mut XmlWriter, ledger: &MasterLedger) -> Result<()> {
    writer.start_with_attrs(
        "LEDGER",
        &[("NAME", ledger.name.as_str()), ("ACTION", "Create")],
    )?;
    writer.text_element("NAME", &ledger.name)?;
    writer.text_element("PARENT", ledger.parent)?;
    match &ledger.tax {
        Some(tax) => {
            writer.text_element("TAXTYPE", "GST")?;
            writer.text_element("GSTDUTYHEAD", tax.duty_head)?;
            writer.text_element("ISINPUTCREDIT", "Yes")?;
            writer.text_element("ISBILLWISEON", "No")?;
            writer.text_element("OPENINGBALANCE", "0.00")?;
        }
        None => {
            writer.text_element("ISBILLWISEON", yes_no(ledger.billwise))?;
            writer.text_element("OPENINGBALANCE", "0.00")?;
            writer.text_element("AFFECTSSTOCK", "No")?;
            writer.text_element("ISREVENUE", "Yes")?;
            writer.text_element("ISDEEMEDPOSITIVE", "No")?;
        }
    }
    writer.end("LEDGER")
}

fn write_voucher(writer: &mut XmlWriter, voucher: &Voucher) -> Result<()> {
    writer.start_with_attrs("TALLYMESSAGE", &[("xmlns:UDF", "TallyUDF")])?;
    writer.start_with_attrs(
        "VOUCHER",
        &[("VCHTYPE", voucher.kind.type_name()), ("ACTION", "Create")],
    )?;
    writer.text_element("VOUCHERTYPENAME", voucher.kind.type_name())?;
    if voucher.accounting_mode {
        writer.text_element("VCHENTRYMODE", "Accounting")?;
    }
    writer.text_element("DATE", &voucher.date)?;
    writer.text_element("EFFECTIVEDATE", &voucher.date)?;
    writer.text_element("VOUCHERNUMBER", &voucher.number)?;
    writer.text_element("REFERENCE", &voucher.reference)?;
    writer.text_element("NARRATION", &voucher.narration)?;
    writer.text_element("PARTYLEDGERNAME", &voucher.party)?;
    for entry in &voucher.entries {
        write_entry(writer, entry)?;
    }
    writer.end("VOUCHER")?;
    writer.end("TALLYMESSAGE")
}

fn write_entry(writer: &mut XmlWriter, entry: &LedgerEntry) -> Result<()> {
    writer.start("ALLLEDGERENTRIES.LIST")?;
    writer.text_element("LEDGERNAME", &entry.ledger)?;
    writer.text_element("ISDEEMEDPOSITIVE", yes_no(entry.is_deemed_positive()))?;
    writer.text_element("AMOUNT", &entry.amount.to_string())?;
    if let Some(bill) = &entry.bill {
        writer.start("BILLALLOCATIONS.LIST")?;
        writer.text_element("NAME", &bill.name)?;
        writer.text_element("BILLTYPE", bill.bill_type.as_str())?;
        writer.text_element("AMOUNT", &bill.amount.to_string())?;
        writer.end("BILLALLOCATIONS.LIST")?;
    }
    writer.end("ALLLEDGERENTRIES.LIST")
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Thin wrapper over the indented quick-xml writer; keeps the event
/// plumbing out of the document-walking code above.
struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn declaration(&mut self) -> Result<()> {
        self.inner
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        Ok(())
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.inner.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    fn start_with_attrs(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        for (key, value) in attrs {
            element.push_attribute((*key, *value));
        }
        self.inner.write_event(Event::Start(element))?;
        Ok(())
    }

    /// Writes `<name>text</name>`, collapsing empty text to a self-closing
    /// element.
    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            self.inner.write_event(Event::Empty(BytesStart::new(name)))?;
            return Ok(());
        }
        self.inner.write_event(Event::Start(BytesStart::new(name)))?;
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn into_string(self) -> String {
        let mut bytes = self.inner.into_inner();
        bytes.push(b'\n');
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
