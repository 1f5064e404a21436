use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Key under which the normalized `YYYY-MM-DD` birth date is stored.
pub const BIRTH_DATE_KEY: &str = "extracted_birth_date";
/// Key under which the normalized `YYYY-MM-DD` death date is stored.
pub const DEATH_DATE_KEY: &str = "extracted_death_date";

/// A single infobox value: plain text, or an ordered list of texts when the
/// source cell holds one entry per list item. Serializes untagged, so the
/// JSON shape is `string | array of string`. A one-item list stays a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    Text(String),
    List(Vec<String>),
}

impl FactValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FactValue::Text(text) => Some(text),
            FactValue::List(_) => None,
        }
    }
}

/// Infobox label -> value, keyed by whatever label text the article uses.
/// The two derived date keys sit alongside the raw labels when present.
pub type FactMapping = BTreeMap<String, FactValue>;

/// One subject's extracted data: the article's lead paragraph plus the
/// parsed infobox. Produced once, then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub first_paragraph: String,
    pub infobox: FactMapping,
}

impl ExtractedRecord {
    /// Normalized birth date, when the Born row carried a machine date.
    pub fn birth_date(&self) -> Option<&str> {
        self.infobox.get(BIRTH_DATE_KEY).and_then(FactValue::as_text)
    }

    /// Normalized death date, when the Died row carried a machine date.
    pub fn death_date(&self) -> Option<&str> {
        self.infobox.get(DEATH_DATE_KEY).and_then(FactValue::as_text)
    }
}

/// Age at death, split into whole years and leftover days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifespan {
    pub years: i64,
    pub days: i64,
}

impl Display for Lifespan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} years and {} days", self.years, self.days)
    }
}

/// Start/end announcements for a CLI role. Cosmetic; nothing dispatches
/// through this beyond the two greeting calls.
pub trait Introducer {
    fn announce_start(&self);
    fn announce_end(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ExtractedRecord {
        let mut infobox = FactMapping::new();
        infobox.insert(
            "Born".to_string(),
            FactValue::Text("7 November 1867 Warsaw".to_string()),
        );
        infobox.insert(
            "Spouse".to_string(),
            FactValue::List(vec!["Pierre Curie".to_string()]),
        );
        infobox.insert(
            BIRTH_DATE_KEY.to_string(),
            FactValue::Text("1867-11-07".to_string()),
        );
        infobox.insert(
            DEATH_DATE_KEY.to_string(),
            FactValue::Text("1934-07-04".to_string()),
        );
        ExtractedRecord {
            first_paragraph: "Marie Curie was a physicist and chemist.".to_string(),
            infobox,
        }
    }

    #[test]
    fn test_record_round_trip_preserves_value_shape() {
        let record = sample_record();
        let json = serde_json::to_string_pretty(&record).expect("Failed to serialize");
        let parsed: ExtractedRecord = serde_json::from_str(&json).expect("Failed to deserialize");

        assert_eq!(parsed, record);
        assert!(matches!(parsed.infobox["Born"], FactValue::Text(_)));
        assert!(matches!(parsed.infobox["Spouse"], FactValue::List(_)));
    }

    #[test]
    fn test_serialized_shape_is_string_or_array() {
        let record = sample_record();
        let value = serde_json::to_value(&record).expect("Failed to serialize");

        assert!(value["infobox"]["Born"].is_string());
        assert_eq!(
            value["infobox"]["Spouse"],
            serde_json::json!(["Pierre Curie"])
        );
        assert_eq!(value["infobox"][BIRTH_DATE_KEY], "1867-11-07");
        assert_eq!(value["first_paragraph"], record.first_paragraph);
    }

    #[test]
    fn test_derived_date_accessors() {
        let record = sample_record();
        assert_eq!(record.birth_date(), Some("1867-11-07"));
        assert_eq!(record.death_date(), Some("1934-07-04"));

        let empty = ExtractedRecord {
            first_paragraph: String::new(),
            infobox: FactMapping::new(),
        };
        assert_eq!(empty.birth_date(), None);
        assert_eq!(empty.death_date(), None);
    }

    #[test]
    fn test_single_item_list_stays_a_list() {
        let json = r#"{"first_paragraph": "p", "infobox": {"Children": ["Irène"]}}"#;
        let record: ExtractedRecord = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(
            record.infobox["Children"],
            FactValue::List(vec!["Irène".to_string()])
        );
    }
}
