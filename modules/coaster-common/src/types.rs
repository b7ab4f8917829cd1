use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::fields::FIELD_ALIASES;

/// Lower-cased semantic field name -> raw infobox value, in field-table order.
pub type FieldMapping = IndexMap<String, String>;

/// One enriched coaster page, ready for the coaster CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct CoasterRow {
    pub title: String,
    pub fields: FieldMapping,
}

impl CoasterRow {
    pub fn new(title: impl Into<String>, fields: FieldMapping) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Cells in `coaster_columns()` order. Keys outside the field table are
    /// dropped and missing ones become empty cells.
    pub fn to_record(&self) -> Vec<&str> {
        std::iter::once(self.title.as_str())
            .chain(FIELD_ALIASES.iter().map(|(name, _)| self.field(name)))
            .collect()
    }
}

/// The subset of a coaster CSV row the video stage reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoasterRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub park: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub country: String,
}

/// A search hit. Never persisted on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCandidate {
    pub video_id: String,
    pub video_title: String,
    pub channel_title: String,
    pub published_at: String,
}

/// Counts are `None` when the platform hides them or returns a non-numeric value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoStats {
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub channel_id: String,
    pub channel_title: String,
}

/// One row of the video CSV: a candidate linked to its coaster plus stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRow {
    pub video_id: String,
    pub video_title: String,
    pub channel_title: String,
    pub published_at: String,
    pub coaster_title: String,
    pub park: String,
    pub location: String,
    pub country: String,
    pub search_query: String,
    pub fetched_at_utc: String,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub channel_id: Option<String>,
    pub channel_title_api: Option<String>,
}

/// Column the resume logic keys on.
pub const VIDEO_COASTER_COLUMN: &str = "coaster_title";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_follows_field_table_order() {
        let mut fields = FieldMapping::new();
        fields.insert("speed".into(), "90 km/h".into());
        fields.insert("name".into(), "Test".into());
        fields.insert("not_a_field".into(), "dropped".into());
        let row = CoasterRow::new("Test Coaster", fields);

        let record = row.to_record();
        assert_eq!(record.len(), FIELD_ALIASES.len() + 1);
        assert_eq!(record[0], "Test Coaster");
        assert_eq!(record[1], "Test");
        let speed_idx = FIELD_ALIASES.iter().position(|(n, _)| *n == "speed").unwrap();
        assert_eq!(record[speed_idx + 1], "90 km/h");
        assert!(!record.contains(&"dropped"));
    }
}
