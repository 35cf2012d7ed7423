// 📐 Row Codec - entity ⇄ delimited row
//
// Rows go through csv's serde support, so a struct's field order is its
// column order. Fields are joined with a comma and never quoted. Embedded
// commas are swapped for DELIMITER_REPLACEMENT on encode and swapped back on
// decode.
//
// Known limitations of the format:
// - a value that already contains DELIMITER_REPLACEMENT comes back with commas
// - a line break inside a value splits the row, so the record no longer loads;
//   the services reject line breaks in free-text fields before they get here

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Forage, Forager, Item};

pub const DELIMITER: &str = ",";
pub const DELIMITER_REPLACEMENT: &str = "@@@";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An entity that can live in a flat file, one row per record.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Name used in log lines
    const LABEL: &'static str;

    /// Header row, which also fixes the expected field count
    const HEADER: &'static [&'static str];

    fn id(&self) -> &str;

    /// Value matched by `Repository::find_by_field`
    fn lookup_field(&self) -> String;
}

pub fn escape(value: &str) -> String {
    value.replace(DELIMITER, DELIMITER_REPLACEMENT)
}

pub fn unescape(value: &str) -> String {
    value.replace(DELIMITER_REPLACEMENT, DELIMITER)
}

/// True when `value` would break the one-row-per-record layout
pub fn has_line_break(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

/// Encode a record as an escaped row
pub fn encode<T: Record>(record: &T) -> csv::Result<StringRecord> {
    // Serialize as regular quoted CSV, then read the fields back out so each
    // one can be escaped on its own
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.serialize(record)?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes.as_slice());
    let mut row = StringRecord::new();
    reader.read_record(&mut row)?;

    Ok(row.iter().map(escape).collect())
}

/// Decode an escaped row; rows with the wrong field count or a field that
/// fails to parse are rejected
pub fn decode<T: Record>(row: &StringRecord) -> Option<T> {
    if row.len() != T::HEADER.len() {
        return None;
    }
    let fields: StringRecord = row.iter().map(unescape).collect();
    fields.deserialize(None).ok()
}

// ============================================================================
// ENTITY ROWS
// ============================================================================

impl Record for Forager {
    const LABEL: &'static str = "forager";
    const HEADER: &'static [&'static str] = &["id", "first_name", "last_name", "state"];

    fn id(&self) -> &str {
        &self.id
    }

    fn lookup_field(&self) -> String {
        self.state.clone()
    }
}

impl Record for Item {
    const LABEL: &'static str = "item";
    const HEADER: &'static [&'static str] = &["id", "name", "category", "dollars_per_kilogram"];

    fn id(&self) -> &str {
        &self.id
    }

    fn lookup_field(&self) -> String {
        self.category.as_str().to_string()
    }
}

impl Record for Forage {
    const LABEL: &'static str = "forage";
    const HEADER: &'static [&'static str] = &["id", "date", "forager_id", "item_id", "kilograms"];

    fn id(&self) -> &str {
        &self.id
    }

    fn lookup_field(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}
