//! # Custom Extractors
//!
//! Handlers take `Result<Json<T>, JsonRejection>` so that body parse
//! failures go through [`AppError`] instead of axum's plain-text rejection,
//! then call [`extract_validated_json`] to run request-level checks.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request-level validation beyond what deserialization enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON body and validate it.
///
/// # Errors
///
/// - [`AppError::BadRequest`] when the body is not valid JSON for `T`.
/// - [`AppError::Validation`] when [`Validate::validate`] fails.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = extract_json(body)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

/// Unwrap a JSON body without further validation.
///
/// # Errors
///
/// [`AppError::BadRequest`] when the body is not valid JSON for `T`.
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<Json<T>, AppError> {
    body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
