//! The persistence layer of the server: the database interface
//!
//! The primary entry point to this module is the function [get_store_from_env], which returns an
//! object implementing the [EventmiStore] trait. This object can be shared between threads in a
//! global application state and be used to create [EventmiStoreFacade] instances for interaction
//! with the database. These provide a CRUD-like interface, using the data models from the [models]
//! module.
//!
//! The primary implementation of [EventmiStore] ([postgres::PgDataStore]) wraps a PostgreSQL
//! connection pool and its corresponding [EventmiStoreFacade] objects
//! ([postgres::PgDataStoreFacade]) hold one pooled connection each, using the Diesel query DSL for
//! implementing the database interaction.
//!
//! There is also a mock implementation for unittests ([store_mock::StoreMock]).

use crate::cli_error::CliError;
use crate::cli_error::CliError::UnexpectedStoreError;
use crate::setup;
use std::fmt::Debug;

pub mod models;
mod postgres;
mod schema;

/// Get a [EventmiStore] instance, according the "DATABASE_URL" environment variable.
///
/// The DATABASE_URL must be a PosgreSQL connection url, following the schema
/// "postgres://{user}:{password}@{host}/{database}".
pub fn get_store_from_env() -> Result<impl EventmiStore, CliError> {
    postgres::PgDataStore::new(&setup::get_database_url_from_env()?)
        .map_err(|err| UnexpectedStoreError(err.to_string()))
}

pub type EventId = i32;

pub trait EventmiStoreFacade {
    /// Get a filtered list of events
    ///
    /// Events are returned in chronological order, i.e. sorted by (start, end, id)
    fn get_events(&mut self, filter: EventFilter) -> Result<Vec<models::Event>, StoreError>;

    fn get_event(&mut self, event_id: EventId) -> Result<models::Event, StoreError>;

    /// Create a new event and return its id, assigned by the database.
    fn create_event(&mut self, event: models::NewEvent) -> Result<EventId, StoreError>;

    /// Overwrite all fields of the existing event with the given id.
    ///
    /// Returns `Err(StoreError::NotExisting)` if no such event exists.
    fn update_event(
        &mut self,
        event_id: EventId,
        event: models::NewEvent,
    ) -> Result<(), StoreError>;

    /// Returns `Err(StoreError::NotExisting)` if no such event exists.
    fn delete_event(&mut self, event_id: EventId) -> Result<(), StoreError>;

    /// Create all given events within a single database transaction and return their new ids, in
    /// the order of the input.
    fn import_events(&mut self, events: Vec<models::NewEvent>)
        -> Result<Vec<EventId>, StoreError>;
}

/// Filter options for retrieving events from the store via EventmiStoreFacade::get_events()
///
/// Can be constructed through the EventFilterBuilder
#[derive(Default, Debug)]
pub struct EventFilter {
    /// Filter for events that end after the given point in time (this includes events that are
    /// currently taking place at this point in time)
    pub after: Option<chrono::NaiveDateTime>,
    /// Filter for events whose name contains the given text (case-insensitive)
    pub name_contains: Option<String>,
}

impl EventFilter {
    pub fn builder() -> EventFilterBuilder {
        EventFilterBuilder::new()
    }

    /// Checks if a given event matches the filter
    ///
    /// Filtering is done by the database. This is the in-memory equivalent for the store mock.
    #[cfg(test)]
    pub fn matches(&self, event: &models::Event) -> bool {
        if let Some(after) = self.after {
            if after >= event.end {
                return false;
            }
        }
        if let Some(name_contains) = &self.name_contains {
            if !event
                .name
                .to_lowercase()
                .contains(&name_contains.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Builder for constructing EventFilter objects
pub struct EventFilterBuilder {
    result: EventFilter,
}

impl EventFilterBuilder {
    pub fn new() -> Self {
        Self {
            result: EventFilter::default(),
        }
    }

    /// Add filter, to only include events that end after the given point in time
    pub fn after(mut self, after: chrono::NaiveDateTime) -> Self {
        self.result.after = Some(after);
        self
    }

    /// Add filter, to only include events with the given text in their name
    pub fn name_contains(mut self, text: String) -> Self {
        self.result.name_contains = Some(text);
        self
    }

    /// Create the EventFilter object
    pub fn build(self) -> EventFilter {
        self.result
    }
}

pub trait EventmiStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn EventmiStoreFacade + 'a>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// Connection the database failed. See string description for details.
    ConnectionError(String),
    /// The query could not be executed because of some error not covered by the other members (see
    /// string description)
    QueryError(diesel::result::Error),
    /// Database transaction could not be commited due to a conflicting concurrent transaction
    TransactionConflict,
    /// The requested entity does not exist
    NotExisting,
    /// The entity could not be created because it already exists.
    ConflictEntityExists,
    /// The provided data is invalid, i.e. it does not match the expected ranges or violates a
    /// SQL constraint. See string description for details.
    InvalidInputData(String),
    /// Some data queried from the database could not be deserialized. See string description for
    /// details.
    InvalidDataInDatabase(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => Self::NotExisting,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => Self::ConflictEntityExists,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::SerializationFailure,
                _,
            ) => Self::TransactionConflict,
            diesel::result::Error::DatabaseError(
                e @ diesel::result::DatabaseErrorKind::NotNullViolation
                | e @ diesel::result::DatabaseErrorKind::CheckViolation,
                info,
            ) => Self::InvalidInputData(format!("{:?}: {}", e, info.message())),
            diesel::result::Error::SerializationError(e) => Self::InvalidInputData(e.to_string()),
            diesel::result::Error::DeserializationError(e) => {
                Self::InvalidDataInDatabase(e.to_string())
            }
            _ => Self::QueryError(error),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to database: {}", e),
            Self::QueryError(e) => write!(f, "Error while executing database query: {}", e),
            Self::TransactionConflict => f.write_str("Database transaction could not be commited due to a conflicting concurrent transaction"),
            Self::NotExisting => f.write_str("Database record does not exist."),
            Self::ConflictEntityExists => f.write_str("Database record exists already."),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored in database is not valid: {}", e)
            }
            StoreError::InvalidDataInDatabase(e) => {
                write!(f, "Data queried from database could not be deserialized: {}", e)
            },
        }
    }
}

impl std::error::Error for StoreError {}
