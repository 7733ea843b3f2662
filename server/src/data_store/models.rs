use crate::data_store::EventId;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Clone, Debug, PartialEq, Queryable, Selectable)]
#[diesel(table_name=super::schema::events)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub place: String,
}

impl From<Event> for eventmi_api_types::Event {
    fn from(value: Event) -> Self {
        Self {
            id: Some(value.id),
            name: value.name,
            start: value.start,
            end: value.end,
            place: value.place,
        }
    }
}

/// Data of an event to be created or updated. The id is assigned by the database, resp. taken from
/// the request URL.
#[derive(Clone, Debug, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::events)]
pub struct NewEvent {
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub place: String,
}

#[cfg(test)]
impl NewEvent {
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            start: self.start,
            end: self.end,
            place: self.place,
        }
    }
}

impl From<eventmi_api_types::Event> for NewEvent {
    fn from(value: eventmi_api_types::Event) -> Self {
        Self {
            name: value.name,
            start: value.start,
            end: value.end,
            place: value.place,
        }
    }
}

