//! # Request Extraction Helpers
//!
//! JSON body extraction with field-presence validation at the boundary.
//! Handlers take `Result<Json<T>, JsonRejection>` and pass it through
//! [`extract_validated_json`], so a malformed body becomes a structured
//! 400 instead of Axum's default rejection, and every create/update body
//! is field-validated before the service body runs.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use polman_core::{FieldErrors, PolicyInput};

use crate::error::ApiError;

/// Request bodies that run the field-presence pass after deserialization.
pub trait ValidateFields {
    fn validate_fields(&self) -> Result<(), FieldErrors>;
}

impl ValidateFields for PolicyInput {
    fn validate_fields(&self) -> Result<(), FieldErrors> {
        PolicyInput::validate_fields(self)
    }
}

/// Unwrap a JSON body extraction and run field validation.
///
/// A deserialization failure maps to [`ApiError::BadRequest`]; a
/// validation failure maps to [`ApiError::Validation`] carrying the full
/// field → message map.
pub fn extract_validated_json<T: ValidateFields>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    value.validate_fields().map_err(ApiError::Validation)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_body_passes_through() {
        let input: PolicyInput = serde_json::from_str(
            r#"{"policyName":"Auto","status":"ACTIVE","coverageStartDate":"2031-01-01","coverageEndDate":"2031-06-30"}"#,
        )
        .unwrap();
        let extracted = extract_validated_json(Ok(Json(input))).unwrap();
        assert_eq!(extracted.policy_name.as_deref(), Some("Auto"));
    }

    #[test]
    fn invalid_body_maps_to_validation_error() {
        let input = PolicyInput::default();
        let err = extract_validated_json(Ok(Json(input))).unwrap_err();
        match err {
            ApiError::Validation(fields) => assert_eq!(fields.len(), 4),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }
}
