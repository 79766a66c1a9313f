use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single extracted value. Absent fields are simply not in the [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Link { text: String, href: String },
}

impl FieldValue {
    /// Visible text of the value; integers have none.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Link { text, .. } => Some(text),
            FieldValue::Int(_) => None,
        }
    }

    /// Flat rendering used for table cells.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Link { text, .. } => text.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self { FieldValue::Text(s.to_string()) }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self { FieldValue::Text(s) }
}

/// Insertion-ordered field map for one card or page.
pub type Record = IndexMap<String, FieldValue>;

pub fn text_field<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(FieldValue::as_text)
}
