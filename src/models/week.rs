use serde::{Deserialize, Serialize};

/// Notes attached to one Monday–Sunday week.
///
/// Serialized as `{"weekRange": "08.01-14.01 (2024)", "notes": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekEntry {
    #[serde(rename = "weekRange")]
    pub week_range: String,
    pub notes: String,
}

impl WeekEntry {
    pub fn new(week_range: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            week_range: week_range.into(),
            notes: notes.into(),
        }
    }

    pub fn empty(week_range: impl Into<String>) -> Self {
        Self::new(week_range, "")
    }
}
