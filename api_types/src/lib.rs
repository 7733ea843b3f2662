use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// JSON representation of an event, as used for importing and exporting event data
///
/// The `id` is only informational: When importing events, new ids are assigned by the database.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub place: String,
}
