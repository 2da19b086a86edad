//! Line-delimited JSON record parsing.
//!
//! The provider answers with one independent JSON object per line. Lines are
//! decoded one at a time: blank lines and lines that fail to decode are
//! dropped without affecting the rest of the payload.

use serde::Deserialize;

use crate::config::ADDRESS_RECORD_TYPES;

/// One passive-DNS record from a provider payload.
///
/// Missing fields decode as empty strings and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueryRecord {
    /// Owner name of the record
    #[serde(rename = "rrname", default)]
    pub name: String,
    /// Record data (an address for A/AAAA records)
    #[serde(rename = "rrdata", default)]
    pub data: String,
    /// Record type, e.g. `A` or `CNAME`
    #[serde(rename = "rrtype", default)]
    pub record_type: String,
}

impl QueryRecord {
    /// True when the record maps a name to an address.
    pub fn is_address(&self) -> bool {
        ADDRESS_RECORD_TYPES.contains(&self.record_type.as_str())
    }
}

/// Lazily decodes the records of `payload` in line order.
pub fn records(payload: &str) -> impl Iterator<Item = QueryRecord> + '_ {
    payload.lines().filter_map(parse_line)
}

/// Decodes every valid record of `payload`, in line order.
///
/// Never fails: an empty or fully malformed payload yields an empty vector.
pub fn parse_records(payload: &str) -> Vec<QueryRecord> {
    records(payload).collect()
}

fn parse_line(line: &str) -> Option<QueryRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<QueryRecord>(line) {
        Ok(record) => Some(record),
        Err(e) => {
            log::trace!("Dropping malformed record line: {}", e);
            None
        }
    }
}
