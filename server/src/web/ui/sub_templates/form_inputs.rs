use crate::web::ui::form_values::{FormValue, FormValueRepresentation};
use askama::Template;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputType {
    Text,
    /// A text input expecting a date and time in the event date format
    DateTime,
}

impl InputType {
    fn as_html_type_attr(&self) -> &'static str {
        match self {
            InputType::Text | InputType::DateTime => "text",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            InputType::Text => "",
            InputType::DateTime => "MM/DD/YYYY hh:mm AM",
        }
    }
}

/// A labeled text input with its current value and validation errors
#[derive(Template)]
#[template(path = "sub_templates/form_inputs/form_field.html")]
pub struct FormFieldTemplate<'a, T: FormValueRepresentation> {
    name: &'a str,
    label: &'a str,
    input_type: InputType,
    info: Option<&'a str>,
    data: &'a FormValue<T>,
}

impl<'a, T: FormValueRepresentation> FormFieldTemplate<'a, T> {
    pub fn new(data: &'a FormValue<T>, name: &'a str, label: &'a str) -> Self {
        Self {
            name,
            label,
            input_type: InputType::Text,
            info: None,
            data,
        }
    }

    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn info(mut self, info: &'a str) -> Self {
        self.info = Some(info);
        self
    }

    fn input_id(&self) -> String {
        format!("input-{}", self.name.to_lowercase())
    }
}
