use crate::web::ui::error::AppError;
use crate::web::ui::util;
use actix_web::web::Redirect;
use actix_web::{get, HttpRequest, Responder};

#[get("/")]
pub async fn index(req: HttpRequest) -> Result<impl Responder, AppError> {
    Ok(Redirect::to(util::url_for_events_list(&req)?.to_string()).see_other())
}
