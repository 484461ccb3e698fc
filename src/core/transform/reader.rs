//! Rule Table Reader
//!
//! Rule text is headerless CSV with a variable number of fields per row.
//! Blank rows, rows with an empty first field and rows whose first field
//! starts with `#` are skipped without complaint.

use csv::{Position, ReaderBuilder, StringRecord, Trim};

/// A rule row that survived comment/blank filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigRow {
    /// 1-based ordinal among rule rows
    pub ordinal: usize,
    /// Source line the row starts on
    pub line: u64,
    /// Raw, untrimmed fields
    pub fields: Vec<String>,
}

impl ConfigRow {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Read every rule row out of `text`.
///
/// Any CSV error aborts the whole read; callers treat that as an empty table.
pub fn read_rows(text: &str) -> Result<Vec<ConfigRow>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record)? {
        if is_skippable(&record) {
            continue;
        }

        rows.push(ConfigRow {
            ordinal: rows.len() + 1,
            line: source_line(text, record.position()),
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(rows)
}

/// 1-based line on which the record's first field starts.
///
/// The reader skips empty lines without counting them, and the recorded byte
/// offset may still point at the first of those lines.
fn source_line(text: &str, position: Option<&Position>) -> u64 {
    let Some(position) = position else {
        return 0;
    };
    let bytes = text.as_bytes();
    let mut start = usize::try_from(position.byte()).unwrap_or(usize::MAX).min(bytes.len());
    while start < bytes.len() && matches!(bytes[start], b'\n' | b'\r') {
        start += 1;
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() as u64 + 1
}

fn is_skippable(record: &StringRecord) -> bool {
    if record.iter().all(|field| field.trim().is_empty()) {
        return true;
    }
    match record.get(0) {
        None => true,
        Some(first) => first.is_empty() || first.starts_with('#'),
    }
}
