use crate::data_store::EventId;
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashType, FlashesInterface};
use crate::web::ui::util;
use crate::web::AppState;
use actix_web::web::Redirect;
use actix_web::{post, web, HttpRequest, Responder};

#[post("/Event/Delete/{event_id}")]
pub async fn delete_event(
    path: web::Path<EventId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let event_id = path.into_inner();
    web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        store.delete_event(event_id)?;
        Ok(())
    })
    .await??;

    req.add_flash_message(FlashMessage {
        flash_type: FlashType::Success,
        message: "The event was deleted.".to_owned(),
    });
    Ok(Redirect::to(util::url_for_events_list(&req)?.to_string()).see_other())
}
