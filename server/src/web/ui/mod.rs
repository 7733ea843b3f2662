use crate::web::ui::error::AppError;
use crate::web::ui::error_page::error_page_middleware;
use crate::web::ui::flash::flash_middleware;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::middleware::from_fn;
use actix_web::{get, web, HttpResponse, Responder};
use rust_embed::Embed;

mod askama_filters;
mod base_template;
mod endpoints;
pub mod error;
mod error_page;
mod flash;
mod form_values;
mod sub_templates;
#[cfg(test)]
mod tests;
mod util;
mod validation;

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .service(static_resources)
            .service(endpoints::index::index)
            .service(endpoints::events_list::events_list)
            .service(endpoints::event_details::event_details)
            .service(endpoints::edit_event::add_event_form)
            .service(endpoints::edit_event::add_event)
            .service(endpoints::edit_event::edit_event_form)
            .service(endpoints::edit_event::edit_event)
            .service(endpoints::delete_event::delete_event)
            .default_service(web::to(not_found_handler))
            .wrap(from_fn(flash_middleware))
            .wrap(from_fn(error_page_middleware)),
    );
}

#[derive(Embed)]
#[folder = "static/"]
struct Resources;

impl Resources {
    fn handle_embedded_file(path: &str) -> HttpResponse {
        match Self::get(path) {
            Some(content) => HttpResponse::Ok()
                .content_type(mime_guess::from_path(path).first_or_octet_stream().as_ref())
                .append_header(CacheControl(vec![CacheDirective::MaxAge(86400 * 365)]))
                .body(content.data.into_owned()),
            None => {
                HttpResponse::NotFound().body(format!("Static resource file '{}' not found", path))
            }
        }
    }
}

#[get("/static/{_:.*}")]
async fn static_resources(path: web::Path<String>) -> impl Responder {
    Resources::handle_embedded_file(path.as_str())
}

async fn not_found_handler() -> Result<&'static str, AppError> {
    Err(AppError::PageNotFound)
}
