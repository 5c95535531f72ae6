//! Attempt-read of save records for listing display.
//!
//! The save file format itself lives outside this crate. Anything able to turn
//! a byte stream into a [`RecordSummary`] plugs in through [`RecordReader`];
//! [`probe`] wraps it so a listing never sees more than readable/unreadable.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::{ReadError, Unreadable};
use crate::model::{Origin, RecordSummary, Reputation, parse_guid_hyphen};

pub trait RecordReader {
    fn read_summary(&self, input: &mut dyn Read) -> Result<RecordSummary, ReadError>;
}

/// Open `path` and read a summary from it. The handle is dropped before return.
pub fn probe(reader: &dyn RecordReader, path: &Path) -> Result<RecordSummary, Unreadable> {
    let res = File::open(path)
        .map_err(ReadError::from)
        .and_then(|f| reader.read_summary(&mut BufReader::new(f)));
    res.map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "record probe failed");
        Unreadable
    })
}

/// Reader that never succeeds; listings fall back to name-derived display.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReader;

impl RecordReader for NoReader {
    fn read_summary(&self, _input: &mut dyn Read) -> Result<RecordSummary, ReadError> {
        Err(ReadError::MissingField("record"))
    }
}

/// Reads JSON summary documents:
///
/// ```json
/// {"firstName":"Jane","origin":1,"reputation":2,"classId":93952,
///  "fingerprint":"0f8fad5b-d9cb-469f-a165-70867728950e"}
/// ```
///
/// `fingerprint` is a hyphenated GUID or a plain hex string.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSummaryReader;

impl RecordReader for JsonSummaryReader {
    fn read_summary(&self, input: &mut dyn Read) -> Result<RecordSummary, ReadError> {
        let v: Value = serde_json::from_reader(input)?;
        summary_from_json(&v)
    }
}

pub fn summary_from_json(v: &Value) -> Result<RecordSummary, ReadError> {
    let first_name = v
        .get("firstName")
        .and_then(Value::as_str)
        .ok_or(ReadError::MissingField("firstName"))?
        .to_string();
    let origin = digit_field(v, "origin").and_then(|c| {
        Origin::from_digit(c).ok_or(ReadError::InvalidField {
            field: "origin",
            reason: format!("code {} out of range", c),
        })
    })?;
    let reputation = digit_field(v, "reputation").and_then(|c| {
        Reputation::from_digit(c).ok_or(ReadError::InvalidField {
            field: "reputation",
            reason: format!("code {} out of range", c),
        })
    })?;
    let class_id = v
        .get("classId")
        .and_then(Value::as_i64)
        .ok_or(ReadError::MissingField("classId"))?;
    let class_id = i32::try_from(class_id).map_err(|e| ReadError::InvalidField {
        field: "classId",
        reason: e.to_string(),
    })?;
    let fp = v
        .get("fingerprint")
        .and_then(Value::as_str)
        .ok_or(ReadError::MissingField("fingerprint"))?;
    let fingerprint = parse_fingerprint(fp).map_err(|reason| ReadError::InvalidField {
        field: "fingerprint",
        reason,
    })?;
    Ok(RecordSummary {
        first_name,
        origin,
        reputation,
        class_id,
        fingerprint,
    })
}

/// Fewest identity bytes that fill a seven-digit career fingerprint.
pub const MIN_FINGERPRINT_BYTES: usize = 4;

/// Hyphenated GUID → record-order bytes; otherwise an even-length hex string
/// of at least [`MIN_FINGERPRINT_BYTES`] bytes.
pub fn parse_fingerprint(s: &str) -> Result<Vec<u8>, String> {
    if s.contains('-') {
        return parse_guid_hyphen(s).map(|g| g.to_bytes_le().to_vec());
    }
    if s.len() % 2 != 0 || s.len() < MIN_FINGERPRINT_BYTES * 2 {
        return Err(format!(
            "hex string must have an even length of at least {} digits",
            MIN_FINGERPRINT_BYTES * 2
        ));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            s.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| format!("bad hex at {}", i))
        })
        .collect()
}

fn digit_field(v: &Value, field: &'static str) -> Result<char, ReadError> {
    let n = v
        .get(field)
        .and_then(Value::as_u64)
        .ok_or(ReadError::MissingField(field))?;
    u32::try_from(n)
        .ok()
        .and_then(|n| char::from_digit(n, 10))
        .ok_or(ReadError::InvalidField {
            field,
            reason: format!("code {} out of range", n),
        })
}

/// Serialize a summary in the form [`JsonSummaryReader`] accepts.
pub fn summary_to_json(s: &RecordSummary) -> Value {
    let hex: String = s.fingerprint.iter().map(|b| format!("{:02x}", b)).collect();
    serde_json::json!({
        "firstName": s.first_name,
        "origin": s.origin.digit().to_digit(10),
        "reputation": s.reputation.digit().to_digit(10),
        "classId": s.class_id,
        "fingerprint": hex,
    })
}
