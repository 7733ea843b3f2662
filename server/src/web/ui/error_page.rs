//! This module provides functionality to generate nice-looking error pages for errors returned from
//! handler functions.
//!
//! This is achieved by an actix-web middleware that replaces the original HTTP response in the case
//! of an error. In contrast to rendering the error page in our [actix_web::ResponseError]
//! implementation, this allows us to access the HTTP Request, e.g. for generating URLs to static
//! files and other pages.
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use actix_web::body::EitherBody;
use actix_web::web::Html;
use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError};
use askama::Template;

/// An actix-web middleware for generating nice error pages
///
/// The middleware replaces the existing HTTP response (typically generated from the error's
/// ResponseError implementation) with a nice error page, when an error has been returned by the
/// endpoint handler function. The nice error page is generated from askama templates, extending the
/// "base.html" template to keep the application's look & feel. In case, rendering the template
/// fails, we fall back to a plain text representation of the error.
///
/// If the error, returned from the endpoint handler, is an [AppError], we use the semantic
/// information to provide a descriptive and helpful error page to the user. Otherwise, we simply
/// show the string representation of the error.
pub async fn error_page_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<EitherBody<B, String>>, actix_web::Error> {
    let response = next.call(req).await?;

    if response.response().error().is_some() {
        let (req, res) = response.into_parts();
        let error = res
            .error()
            .expect("We checked that res has an error, above.");
        let response = if let Some(app_error) = error.as_error::<AppError>() {
            generate_app_error_page(app_error, &req)
        } else {
            generate_generic_error_page(error.as_response_error(), &req)
        };
        Ok(actix_web::dev::ServiceResponse::new(
            req,
            response.map_body(|_, body| EitherBody::right(body)),
        ))
    } else {
        Ok(response.map_body(|_, body| EitherBody::left(body)))
    }
}

/// Generate a nice error page with additional information and help for the given [AppError].
fn generate_app_error_page(
    app_error: &AppError,
    http_request: &HttpRequest,
) -> HttpResponse<String> {
    let tmpl = AppErrorTemplate {
        base: BaseTemplateContext {
            request: http_request,
            page_title: "Error",
        },
        error: app_error,
        url: &http_request.full_url(),
        timestamp: chrono::Local::now(),
        events_list_url: http_request
            .url_for_static("events_list")
            .map(|url| url.to_string())
            .unwrap_or_else(|_| "/".to_owned()),
    };
    render_template_or_show_error_as_string(tmpl, app_error, http_request)
}

/// Generate a nice error page for the given `error`, using its string representation.
fn generate_generic_error_page(
    error: &dyn ResponseError,
    http_request: &HttpRequest,
) -> HttpResponse<String> {
    let tmpl = ErrorTemplate {
        base: BaseTemplateContext {
            request: http_request,
            page_title: "Error",
        },
        error,
        url: &http_request.full_url(),
        timestamp: chrono::Local::now(),
    };
    render_template_or_show_error_as_string(tmpl, error, http_request)
}

/// Try to render the given [askama::Template] structure and generate an HTTP response as an HTML
/// error page for the given error and create an HTTP response.
///
/// In case of an error while rendering the template, return a plain text HTTP response with the
/// error's string representation.
fn render_template_or_show_error_as_string(
    tmpl: impl Template,
    error: &dyn ResponseError,
    req: &HttpRequest,
) -> HttpResponse<String> {
    match tmpl.render() {
        Ok(body) => (Html::new(body), error.status_code()).respond_to(req),
        Err(err) => (
            format!(
                "Error: {}\n(Could not render nice error page: {})",
                error, err
            ),
            error.status_code(),
        )
            .respond_to(req),
    }
}

#[derive(Debug, Template)]
#[template(path = "app_error.html")]
struct AppErrorTemplate<'a> {
    base: BaseTemplateContext<'a>,
    error: &'a AppError,
    url: &'a url::Url,
    timestamp: chrono::DateTime<chrono::Local>,
    events_list_url: String,
}

impl AppErrorTemplate<'_> {
    fn title(&self) -> &'static str {
        match self.error {
            AppError::PageNotFound => "Page not found",
            AppError::EntityNotFound => "Event not found",
            AppError::EntityIdMismatch { .. } => "Event does not match",
            AppError::TransactionConflict => "Please try again",
            AppError::DatabaseConnectionError(_) | AppError::InternalError(_) => {
                "Internal server error"
            }
        }
    }

    fn hint(&self) -> &'static str {
        match self.error {
            AppError::PageNotFound => "The requested page does not exist. Please check the address.",
            AppError::EntityNotFound => {
                "The requested event does not exist. Maybe it has been deleted in the meantime."
            }
            AppError::EntityIdMismatch { .. } => {
                "The submitted form belongs to a different event than the one addressed by the URL."
            }
            AppError::TransactionConflict => {
                "The change could not be saved due to a concurrent database access. Please submit the form again."
            }
            AppError::DatabaseConnectionError(_) | AppError::InternalError(_) => {
                "Something went wrong on our side. Please try again later."
            }
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    base: BaseTemplateContext<'a>,
    error: &'a dyn ResponseError,
    url: &'a url::Url,
    timestamp: chrono::DateTime<chrono::Local>,
}
