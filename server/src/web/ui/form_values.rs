//! This module provides the `FormValue` helper type that encapsulates the submitted string value
//! and validation error messages of a single HTML form field. It is used for re-rendering a form
//! with the user's input and the validation errors after an invalid submission.

use std::fmt::Debug;
use std::marker::PhantomData;

/// The submitted (or prefilled) string value of a form field, which shall be validated/converted to
/// type `T`
///
/// When deserialized from form data, a missing field results in a FormValue without value, which
/// fails validation with a "value missing" error instead of rejecting the whole request.
#[derive(Debug, serde::Deserialize)]
#[serde(transparent)]
pub struct FormValue<T: FormValueRepresentation> {
    value: Option<String>,
    #[serde(skip)]
    errors: Vec<String>,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

/// Implemented by types that can be used as an HTML form string value, i.e. they can be rendered
/// as the `value` attribute of an input.
pub trait FormValueRepresentation: Debug {
    fn into_form_value_string(self) -> String;
}

/// Trait for [FormValueRepresentation]-implementing types that can be validated and converted
/// from their form string representation.
pub trait ValidateFromFormInput: FormValueRepresentation + Sized {
    fn from_form_value(value: &'_ str) -> Result<Self, String>;
}

impl FormValueRepresentation for String {
    fn into_form_value_string(self) -> String {
        self
    }
}

impl ValidateFromFormInput for String {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        Ok(value.to_owned())
    }
}

impl FormValueRepresentation for i32 {
    fn into_form_value_string(self) -> String {
        self.to_string()
    }
}

impl ValidateFromFormInput for i32 {
    fn from_form_value(value: &str) -> Result<Self, String> {
        value
            .trim()
            .parse()
            .map_err(|_| "Not a valid number".to_owned())
    }
}

impl<T: FormValueRepresentation> FormValue<T> {
    /// Create a FormValue without contained value, e.g. for an empty form for a new entity. This
    /// will cause an error when trying to validate it.
    pub fn empty() -> Self {
        Self {
            value: None,
            errors: vec![],
            _phantom: Default::default(),
        }
    }

    /// Manually add a validation error related to this form field.
    ///
    /// This can be used to attach error messages to a specific input field to inform the user about
    /// higher-level validation errors that were found when checking the consistency of the overall
    /// form/entity.
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &Vec<String> {
        &self.errors
    }

    /// Get the current string representation of the form value to be used as the `value` attribute
    /// when rendering the form input.
    pub fn string_value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl<T: ValidateFromFormInput> FormValue<T> {
    /// Try to convert the string value to `T`. On failure, the error message is recorded for this
    /// field and `None` is returned.
    pub fn validate(&mut self) -> Option<T> {
        if let Some(value) = &self.value {
            match T::from_form_value(value) {
                Ok(v) => Some(v),
                Err(e) => {
                    self.errors.push(e);
                    None
                }
            }
        } else {
            self.errors.push("Value missing in form data".to_owned());
            None
        }
    }
}

impl<T: FormValueRepresentation> Default for FormValue<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: FormValueRepresentation> From<T> for FormValue<T> {
    fn from(value: T) -> Self {
        FormValue {
            value: Some(value.into_form_value_string()),
            errors: vec![],
            _phantom: Default::default(),
        }
    }
}
