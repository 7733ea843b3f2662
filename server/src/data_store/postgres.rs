use super::{models, schema, EventFilter, EventId, EventmiStore, EventmiStoreFacade, StoreError};
use diesel::expression::AsExpression;
use diesel::pg::PgConnection;
use diesel::prelude::*;

#[derive(Clone)]
pub struct PgDataStore {
    pool: diesel::r2d2::Pool<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStore {
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let connection_manager = diesel::r2d2::ConnectionManager::<PgConnection>::new(database_url);
        Ok(Self {
            pool: diesel::r2d2::Pool::builder()
                .test_on_check_out(true)
                .min_idle(Some(2))
                .build(connection_manager)?,
        })
    }
}

impl EventmiStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn EventmiStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

pub struct PgDataStoreFacade {
    connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStoreFacade {
    pub fn with_pooled_connection(
        connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
    ) -> Self {
        Self { connection }
    }
}

impl EventmiStoreFacade for PgDataStoreFacade {
    fn get_events(&mut self, filter: EventFilter) -> Result<Vec<models::Event>, StoreError> {
        use schema::events::dsl::*;

        events
            .filter(event_filter_to_sql(filter))
            .order_by((start.asc(), end.asc(), id.asc()))
            .select(models::Event::as_select())
            .load::<models::Event>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_event(&mut self, event_id: EventId) -> Result<models::Event, StoreError> {
        use schema::events::dsl::*;

        events
            .filter(id.eq(event_id))
            .select(models::Event::as_select())
            .first::<models::Event>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_event(&mut self, event: models::NewEvent) -> Result<EventId, StoreError> {
        use schema::events::dsl::*;

        Ok(diesel::insert_into(events)
            .values(&event)
            .returning(id)
            .get_result::<EventId>(&mut self.connection)?)
    }

    fn update_event(
        &mut self,
        event_id: EventId,
        event: models::NewEvent,
    ) -> Result<(), StoreError> {
        use schema::events::dsl::*;

        let result = diesel::update(events)
            .filter(id.eq(event_id))
            .set(&event)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn delete_event(&mut self, event_id: EventId) -> Result<(), StoreError> {
        use schema::events::dsl::*;

        let count = diesel::delete(events)
            .filter(id.eq(event_id))
            .execute(&mut self.connection)?;
        if count == 0 {
            return Err(StoreError::NotExisting);
        }
        Ok(())
    }

    fn import_events(
        &mut self,
        new_events: Vec<models::NewEvent>,
    ) -> Result<Vec<EventId>, StoreError> {
        use schema::events::dsl::*;

        self.connection.transaction(|connection| {
            new_events
                .iter()
                .map(|event| {
                    diesel::insert_into(events)
                        .values(event)
                        .returning(id)
                        .get_result::<EventId>(connection)
                        .map_err(StoreError::from)
                })
                .collect()
        })
    }
}

type BoxedBoolExpression<'a, Table> =
    Box<dyn BoxableExpression<Table, diesel::pg::Pg, SqlType = diesel::sql_types::Bool> + 'a>;

fn event_filter_to_sql<'a>(filter: EventFilter) -> BoxedBoolExpression<'a, schema::events::table> {
    use schema::events::dsl::*;

    let mut expression: BoxedBoolExpression<'a, schema::events::table> =
        Box::new(diesel::dsl::sql::<diesel::sql_types::Bool>("TRUE"));
    if let Some(after) = filter.after {
        expression = Box::new(expression.as_expression().and(end.gt(after)));
    }
    if let Some(name_contains) = filter.name_contains {
        expression = Box::new(
            expression
                .as_expression()
                .and(name.ilike(format!("%{}%", escape_like_pattern(&name_contains)))),
        );
    }
    expression
}

/// Escape the special characters of an SQL LIKE pattern in the given string, using PostgreSQL's
/// default escape character (backslash).
fn escape_like_pattern(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
