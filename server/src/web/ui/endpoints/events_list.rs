use crate::data_store::models::Event;
use crate::data_store::EventFilter;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::util;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

#[derive(Deserialize, Default)]
pub struct EventsListQuery {
    /// Only show events whose name contains this text (case-insensitive)
    search: Option<String>,
    /// Only show events that have not ended yet
    #[serde(default)]
    upcoming: bool,
}

impl EventsListQuery {
    fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn to_filter(&self) -> EventFilter {
        let mut filter = EventFilter::builder();
        if let Some(search) = self.search_text() {
            filter = filter.name_contains(search.to_owned());
        }
        if self.upcoming {
            filter = filter.after(chrono::Local::now().naive_local());
        }
        filter.build()
    }
}

#[get("/Event/All")]
pub async fn events_list(
    state: web::Data<AppState>,
    query: web::Query<EventsListQuery>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();
    let filter = query.to_filter();
    let events = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_events(filter)?)
    })
    .await??;

    let rows = events
        .into_iter()
        .map(|event| EventRow::new(event, &req))
        .collect::<Result<Vec<_>, AppError>>()?;

    let tmpl = EventsListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "All Events",
        },
        rows: &rows,
        search: query.search_text().unwrap_or(""),
        upcoming: query.upcoming,
        add_url: req.url_for_static("add_event_form")?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

/// An event with the URLs of its actions, for rendering one row of the list
struct EventRow {
    event: Event,
    details_url: String,
    edit_url: String,
    delete_url: String,
}

impl EventRow {
    fn new(event: Event, req: &HttpRequest) -> Result<Self, AppError> {
        Ok(Self {
            details_url: util::url_for_event_details(req, event.id)?.to_string(),
            edit_url: util::url_for_edit_event(req, event.id)?.to_string(),
            delete_url: util::url_for_delete_event(req, event.id)?.to_string(),
            event,
        })
    }
}

mod filters {
    pub use crate::web::ui::askama_filters::ellipsis;
}

#[derive(Template)]
#[template(path = "events_list.html")]
struct EventsListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    rows: &'a Vec<EventRow>,
    search: &'a str,
    upcoming: bool,
    add_url: String,
}
