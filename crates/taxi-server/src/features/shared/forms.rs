//! Form contexts for the create/update views
//!
//! A form view answers `GET` with its initial values and answers an invalid
//! `POST` with the submitted values plus the collected field errors. Both are
//! a [`FormContext`]; a valid `POST` redirects instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::validation::FieldErrors;
use crate::api::response::ApiResponse;

#[derive(Debug, Clone, Serialize)]
pub struct FormContext<F> {
    pub form: F,
    pub errors: FieldErrors,
}

impl<F: Serialize> FormContext<F> {
    /// Form with initial values and no errors
    pub fn unbound(form: F) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
        }
    }

    /// Submitted form that failed validation
    pub fn invalid(form: F, errors: FieldErrors) -> Self {
        Self { form, errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<F: Serialize> IntoResponse for FormContext<F> {
    fn into_response(self) -> Response {
        let body = if self.is_valid() {
            ApiResponse::success(self)
        } else {
            ApiResponse::failure(self)
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}
