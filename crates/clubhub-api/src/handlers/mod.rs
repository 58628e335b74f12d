//! HTTP request handlers, grouped by domain.

pub mod auth;
pub mod divisions;
pub mod health;
pub mod persons;
pub mod teams;

use clubhub_core::error::AppError;
use validator::Validate;

/// Run validator checks on a request body.
pub(crate) fn validate(req: &impl Validate) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// The error returned when a permission predicate answers `false`.
pub(crate) fn forbidden() -> AppError {
    AppError::forbidden("You do not have permission to perform this action")
}
