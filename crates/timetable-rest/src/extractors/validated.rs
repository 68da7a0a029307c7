//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes JSON and validates it using the
//! `validator` crate. Validation errors are returned as 422 Unprocessable
//! Entity with field-level error details.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use timetable_core::{field_errors, ErrorResponse};
use validator::{Validate, ValidationErrors};

/// JSON extractor that automatically validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use timetable_rest::extractors::ValidatedJson;
/// use timetable_service::GroupDto;
///
/// async fn create_group(ValidatedJson(dto): ValidatedJson<GroupDto>) {
///     // dto.group_number is guaranteed not to be blank here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let error_response = ErrorResponse {
                    code: "INVALID_JSON".to_string(),
                    message: format!("Invalid JSON: {}", rejection.body_text()),
                    details: None,
                };
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error(error_response)),
                )
                    .into_response()
            }
            Self::ValidationError(errors) => {
                let error_response = ErrorResponse {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "Request validation failed".to_string(),
                    details: Some(field_errors(&errors)),
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiResponse::<()>::error(error_response)),
                )
                    .into_response()
            }
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use timetable_service::{GroupDto, ScheduleDto};

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let ValidatedJson(dto) =
            ValidatedJson::<GroupDto>::from_request(json_request(r#"{"groupNumber":"350501"}"#), &())
                .await
                .unwrap();

        assert_eq!(dto.group_number, "350501");
    }

    #[tokio::test]
    async fn test_blank_field_is_unprocessable() {
        let rejection =
            ValidatedJson::<GroupDto>::from_request(json_request(r#"{"groupNumber":" "}"#), &())
                .await
                .unwrap_err();

        match &rejection {
            ValidatedJsonRejection::ValidationError(errors) => {
                let fields = field_errors(errors);
                assert_eq!(fields[0].field, "group_number");
                assert_eq!(fields[0].message, "Group number cannot be blank");
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
        assert_eq!(rejection.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_group_id_is_unprocessable() {
        let body = r#"{"subject":"Math","lessonType":"LK","time":"09:00","auditorium":"101"}"#;

        let rejection = ValidatedJson::<ScheduleDto>::from_request(json_request(body), &())
            .await
            .unwrap_err();

        assert_eq!(rejection.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let rejection = ValidatedJson::<GroupDto>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();

        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
