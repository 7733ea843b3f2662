use crate::data_store::models::Event;
use crate::data_store::EventId;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::util;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/Event/Details/{event_id}")]
pub async fn event_details(
    path: web::Path<EventId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let event_id = path.into_inner();
    let event = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_event(event_id)?)
    })
    .await??;

    let tmpl = EventDetailsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &event.name,
        },
        event: &event,
        edit_url: util::url_for_edit_event(&req, event_id)?.to_string(),
        delete_url: util::url_for_delete_event(&req, event_id)?.to_string(),
        events_list_url: util::url_for_events_list(&req)?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "event_details.html")]
struct EventDetailsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    event: &'a Event,
    edit_url: String,
    delete_url: String,
    events_list_url: String,
}

impl EventDetailsTemplate<'_> {
    fn duration(&self) -> String {
        let duration = self.event.end - self.event.start;
        let days = duration.num_days();
        let hours = duration.num_hours() - 24 * days;
        let minutes = duration.num_minutes() - 60 * duration.num_hours();
        if days > 0 {
            format!("{}d {:02}:{:02}h", days, hours, minutes)
        } else {
            format!("{:02}:{:02}h", hours, minutes)
        }
    }
}
