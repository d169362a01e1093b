use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::ValidationErrors;
use serde::Serialize;
use service::errors::ServiceError;
use tracing::error;

/// Generic text for 5xx responses; the real cause only goes to the log.
pub const INTERNAL_FAULT_MESSAGE: &str = "A problem happened while handling your request.";

/// Problem-details style error response.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    title: &'static str,
    detail: Option<String>,
    errors: Option<ValidationErrors>,
}

#[derive(Serialize)]
struct ProblemBody<'a> {
    status: u16,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationErrors>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, errors: None }
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            title: "One or more validation errors occurred.",
            detail: None,
            errors: Some(errors),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(INTERNAL_FAULT_MESSAGE.into()))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ProblemBody {
            status: self.status.as_u16(),
            title: self.title,
            detail: self.detail.as_deref(),
            errors: self.errors.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Validation(errors) => Self::validation(errors),
            ServiceError::Internal(_) | ServiceError::Mail(_) => {
                error!(error = %e, "request failed");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Media Type",
                Some(rejection.body_text()),
            ),
            _ => Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(JsonApiError::from(ServiceError::city_not_found(9)).status(), StatusCode::NOT_FOUND);
        let invalid = ServiceError::Validation(ValidationErrors::single("name", "required"));
        assert_eq!(JsonApiError::from(invalid).status(), StatusCode::BAD_REQUEST);
        let internal = JsonApiError::from(ServiceError::Internal("lock poisoned".into()));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.detail.as_deref(), Some(INTERNAL_FAULT_MESSAGE));
    }
}
