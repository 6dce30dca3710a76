pub mod tally_xml;
pub mod workbook;
