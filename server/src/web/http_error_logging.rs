use crate::web::ui::error::AppError;
use log::{error, warn};

/// An actix-web middleware for logging error responses of the endpoint handlers.
///
/// Client-side errors (unknown pages or events, invalid form data) are logged as warnings, server
/// side errors (database and internal errors) as errors.
pub async fn error_logging_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<B>, actix_web::Error> {
    let response = next.call(req).await?;

    if let Some(error) = response.response().error() {
        if let Some(app_error) = error.as_error::<AppError>() {
            match app_error {
                AppError::PageNotFound => {
                    warn!(
                        "HTTP {} page not found at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                AppError::EntityNotFound => {
                    warn!(
                        "HTTP {} event not found at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                AppError::EntityIdMismatch { url_id, form_id } => {
                    warn!(
                        "HTTP {} event id mismatch at <{}>: form data refers to event {}, URL to event {}",
                        response.response().status(),
                        response.request().uri(),
                        form_id
                            .map(|id| id.to_string())
                            .unwrap_or("<none>".to_owned()),
                        url_id
                    );
                }
                AppError::TransactionConflict => {
                    warn!(
                        "HTTP {} transaction conflict at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                AppError::DatabaseConnectionError(e) => {
                    error!(
                        "HTTP {} database connection error: {}",
                        response.response().status(),
                        e
                    );
                }
                AppError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else {
            error!(
                "HTTP {} unexpected error at <{}>: {:?}",
                response.response().status(),
                response.request().uri(),
                error
            );
        }
    }
    Ok(response)
}
