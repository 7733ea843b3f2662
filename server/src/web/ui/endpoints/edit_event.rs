use crate::data_store::models::{Event, NewEvent};
use crate::data_store::{EventId, StoreError};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::FormValue;
use crate::web::ui::sub_templates::form_inputs::{FormFieldTemplate, InputType};
use crate::web::ui::util;
use crate::web::ui::validation::{EventDateTime, NonEmptyString};
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

#[get("/Event/Add")]
pub async fn add_event_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = EventFormData::default();
    let tmpl = EditEventFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Add Event",
        },
        form_data: &form_data,
        event_id: None,
        post_url: req.url_for_static("add_event")?.to_string(),
        cancel_url: util::url_for_events_list(&req)?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/Event/Add")]
pub async fn add_event(
    state: web::Data<AppState>,
    data: Form<EventFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let event = form_data.validate();

    let result: util::FormSubmitResult = if let Some(event) = event {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_event(event)?;
            Ok(())
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditEventFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Add Event",
        },
        form_data: &form_data,
        event_id: None,
        post_url: req.url_for_static("add_event")?.to_string(),
        cancel_url: util::url_for_events_list(&req)?.to_string(),
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        "The event was created.",
        util::url_for_events_list(&req)?,
        &req,
    )
}

#[get("/Event/Edit/{event_id}")]
pub async fn edit_event_form(
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

    let form_data: EventFormData = event.into();
    let tmpl = EditEventFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit Event",
        },
        form_data: &form_data,
        event_id: Some(event_id),
        post_url: req
            .url_for("edit_event", [event_id.to_string()])?
            .to_string(),
        cancel_url: util::url_for_event_details(&req, event_id)?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/Event/Edit/{event_id}")]
pub async fn edit_event(
    path: web::Path<EventId>,
    state: web::Data<AppState>,
    data: Form<EventFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let event_id = path.into_inner();
    let mut form_data = data.into_inner();

    // The submitted form must belong to the event addressed by the URL. This is checked before
    // validating the remaining fields.
    let form_id = form_data.id.validate();
    if form_id != Some(event_id) {
        return Err(AppError::EntityIdMismatch {
            url_id: event_id,
            form_id,
        });
    }

    let store = state.store.clone();
    web::block(move || -> Result<_, AppError> {
        let mut store = store.get_facade()?;
        Ok(store.get_event(event_id)?)
    })
    .await??;

    let event = form_data.validate();
    let result: util::FormSubmitResult = if let Some(event) = event {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_event(event_id, event)?;
            Ok(())
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditEventFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit Event",
        },
        form_data: &form_data,
        event_id: Some(event_id),
        post_url: req
            .url_for("edit_event", [event_id.to_string()])?
            .to_string(),
        cancel_url: util::url_for_event_details(&req, event_id)?.to_string(),
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        "The event was saved.",
        util::url_for_events_list(&req)?,
        &req,
    )
}

/// Submitted data of the add and edit form, with the field names used on the wire
#[derive(Deserialize, Default, Debug)]
pub struct EventFormData {
    /// Id of the edited event. Not present in the add form.
    #[serde(rename = "Id", default)]
    id: FormValue<EventId>,
    #[serde(rename = "Name", default)]
    name: FormValue<NonEmptyString>,
    #[serde(rename = "Start", default)]
    start: FormValue<EventDateTime>,
    #[serde(rename = "End", default)]
    end: FormValue<EventDateTime>,
    #[serde(rename = "Place", default)]
    place: FormValue<NonEmptyString>,
}

impl EventFormData {
    /// Validate all form fields (except for the id) and convert them into a [NewEvent].
    ///
    /// All fields are validated, even if one of them fails, so that all errors are shown to the
    /// user at once. An end before the start is reported as an error of the `End` field.
    fn validate(&mut self) -> Option<NewEvent> {
        let name = self.name.validate();
        let start = self.start.validate();
        let end = self.end.validate();
        let place = self.place.validate();

        if let (Some(start), Some(end)) = (start, end) {
            if end.0 < start.0 {
                self.end
                    .add_error("The end must not be before the start of the event".to_owned());
                return None;
            }
        }

        Some(NewEvent {
            name: name?.into_inner(),
            start: start?.into_inner(),
            end: end?.into_inner(),
            place: place?.into_inner(),
        })
    }
}

impl From<Event> for EventFormData {
    fn from(value: Event) -> Self {
        Self {
            id: value.id.into(),
            name: NonEmptyString(value.name).into(),
            start: EventDateTime(value.start).into(),
            end: EventDateTime(value.end).into(),
            place: NonEmptyString(value.place).into(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_event_form.html")]
struct EditEventFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a EventFormData,
    event_id: Option<EventId>,
    post_url: String,
    cancel_url: String,
}

impl EditEventFormTemplate<'_> {
    fn name_field(&self) -> FormFieldTemplate<'_, NonEmptyString> {
        FormFieldTemplate::new(&self.form_data.name, "Name", "Name")
    }

    fn start_field(&self) -> FormFieldTemplate<'_, EventDateTime> {
        FormFieldTemplate::new(&self.form_data.start, "Start", "Start")
            .input_type(InputType::DateTime)
    }

    fn end_field(&self) -> FormFieldTemplate<'_, EventDateTime> {
        FormFieldTemplate::new(&self.form_data.end, "End", "End")
            .input_type(InputType::DateTime)
            .info("Must not be before the start.")
    }

    fn place_field(&self) -> FormFieldTemplate<'_, NonEmptyString> {
        FormFieldTemplate::new(&self.form_data.place, "Place", "Place")
    }

    fn id_value(&self) -> &str {
        self.form_data.id.string_value()
    }
}
