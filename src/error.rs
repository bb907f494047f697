use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::{Display, From};
use serde_json::json;

use crate::browser::BrowserError;
use crate::portal::PortalError;

/// Errors returned by the HTTP handlers, always rendered as `{"error": "..."}`.
#[derive(Debug, Display, From)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    #[from(ignore)]
    InvalidRequest(String),

    #[display(fmt = "{}", _0)]
    Portal(PortalError),
}

impl ApiError {
    pub fn invalid_request() -> Self {
        ApiError::InvalidRequest("invalid request".to_string())
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Portal(PortalError::LoginRejected) => StatusCode::UNAUTHORIZED,
            ApiError::Portal(PortalError::Browser(BrowserError::Launch(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Portal(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}
