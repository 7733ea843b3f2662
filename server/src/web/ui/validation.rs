use crate::web::ui::form_values::{FormValueRepresentation, ValidateFromFormInput};
use std::fmt::Debug;

/// Format of date-time values in the event forms, e.g. `03/20/2024 09:10 AM`
pub const EVENT_DATE_TIME_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Additionally accepted input formats, as sent by HTML `datetime-local` inputs
const FALLBACK_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A string which is not empty after trimming surrounding whitespace
#[derive(Default, Debug, PartialEq)]
pub struct NonEmptyString(pub String);

impl NonEmptyString {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for NonEmptyString {
    fn into_form_value_string(self) -> String {
        self.0
    }
}

impl ValidateFromFormInput for NonEmptyString {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            Err("Must not be empty".to_owned())
        } else {
            Ok(NonEmptyString(value.to_owned()))
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct EventDateTime(pub chrono::NaiveDateTime);

impl EventDateTime {
    pub fn into_inner(self) -> chrono::NaiveDateTime {
        self.0
    }
}

impl FormValueRepresentation for EventDateTime {
    fn into_form_value_string(self) -> String {
        self.0.format(EVENT_DATE_TIME_FORMAT).to_string()
    }
}

impl ValidateFromFormInput for EventDateTime {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let value = value.trim();
        chrono::NaiveDateTime::parse_from_str(value, EVENT_DATE_TIME_FORMAT)
            .or_else(|e| {
                FALLBACK_DATE_TIME_FORMATS
                    .iter()
                    .find_map(|format| chrono::NaiveDateTime::parse_from_str(value, format).ok())
                    .ok_or(e)
            })
            .map(EventDateTime)
            .map_err(|_| "Not a valid date and time, expected MM/DD/YYYY hh:mm AM/PM".to_owned())
    }
}
