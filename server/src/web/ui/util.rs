use crate::data_store::{EventId, StoreError};
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashType, FlashesInterface};
use actix_web::error::UrlGenerationError;
use actix_web::web::Redirect;
use actix_web::{Either, HttpRequest, HttpResponse};
use askama::Template;

/// Outcome of processing a submitted edit form, used by [create_edit_form_response]
pub enum FormSubmitResult {
    Success,
    ValidationError,
    TransactionConflict,
    UnexpectedError(AppError),
}

impl From<Result<(), StoreError>> for FormSubmitResult {
    fn from(value: Result<(), StoreError>) -> Self {
        match value {
            Ok(_) => FormSubmitResult::Success,
            Err(e) => match e {
                StoreError::TransactionConflict => FormSubmitResult::TransactionConflict,
                _ => FormSubmitResult::UnexpectedError(e.into()),
            },
        }
    }
}

/// Generate the HTTP response for a submitted edit form
///
/// On success, a flash message with `success_message` is added and the client is redirected
/// (303 See Other) to `success_redirect`. On validation errors, the form template is re-rendered
/// with status 200 to show the erroneous fields to the user. A transaction conflict re-renders the
/// form with status 503, so the user can simply submit it again.
pub fn create_edit_form_response(
    result: FormSubmitResult,
    tmpl: impl Template,
    success_message: &str,
    success_redirect: url::Url,
    request: &HttpRequest,
) -> Result<Either<Redirect, HttpResponse>, AppError> {
    match result {
        FormSubmitResult::Success => {
            request.add_flash_message(FlashMessage {
                flash_type: FlashType::Success,
                message: success_message.to_owned(),
            });
            Ok(Either::Left(
                Redirect::to(success_redirect.to_string()).see_other(),
            ))
        }
        FormSubmitResult::ValidationError => {
            request.add_flash_message(FlashMessage {
                flash_type: FlashType::Error,
                message: "The entered data is invalid. Please check the marked fields.".to_owned(),
            });
            Ok(Either::Right(
                HttpResponse::Ok()
                    .content_type("text/html; charset=utf-8")
                    .body(tmpl.render()?),
            ))
        }
        FormSubmitResult::TransactionConflict => {
            request.add_flash_message(FlashMessage {
                flash_type: FlashType::Warning,
                message: "Could not save due to a concurrent database access. Please submit the form again."
                    .to_owned(),
            });
            Ok(Either::Right(
                HttpResponse::ServiceUnavailable()
                    .content_type("text/html; charset=utf-8")
                    .body(tmpl.render()?),
            ))
        }
        FormSubmitResult::UnexpectedError(e) => Err(e),
    }
}

pub fn url_for_events_list(req: &HttpRequest) -> Result<url::Url, UrlGenerationError> {
    req.url_for_static("events_list")
}

pub fn url_for_event_details(
    req: &HttpRequest,
    event_id: EventId,
) -> Result<url::Url, UrlGenerationError> {
    req.url_for("event_details", [event_id.to_string()])
}

pub fn url_for_edit_event(
    req: &HttpRequest,
    event_id: EventId,
) -> Result<url::Url, UrlGenerationError> {
    req.url_for("edit_event_form", [event_id.to_string()])
}

pub fn url_for_delete_event(
    req: &HttpRequest,
    event_id: EventId,
) -> Result<url::Url, UrlGenerationError> {
    req.url_for("delete_event", [event_id.to_string()])
}
