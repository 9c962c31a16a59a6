// 🚨 API Errors - Failure taxonomy and its JSON rendering
// Every failure ends up here; nothing propagates past the handler

use crate::body::BodyError;
use crate::response::ApiResponse;
use crate::validation::ValidationError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-correctable input problem (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Body exceeded the cap; the connection is not reused (500)
    #[error("Request body too large")]
    BodyTooLarge,

    /// Anything unexpected (500)
    #[error("Server error")]
    Server(#[source] anyhow::Error),
}

impl From<BodyError> for ApiError {
    fn from(err: BodyError) -> Self {
        match err {
            BodyError::TooLarge { .. } => Self::BodyTooLarge,
            BodyError::Stream(e) => Self::Server(e.into()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Server(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BodyTooLarge | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the envelope. With `expose_details` off, 500s carry no `details`.
    pub fn into_response_with_details(self, expose_details: bool) -> Response {
        let status = self.status();

        let (message, details) = match &self {
            Self::Validation(e) => (e.to_string(), None),
            Self::MethodNotAllowed => (self.to_string(), None),
            Self::BodyTooLarge => ("Server error".to_string(), Some(self.to_string())),
            Self::Server(e) => (self.to_string(), Some(e.to_string())),
        };
        let details = details.filter(|_| expose_details);

        let mut response =
            (status, Json(ApiResponse::<()>::failure(message, details))).into_response();

        if matches!(self, Self::BodyTooLarge) {
            response
                .headers_mut()
                .insert(header::CONNECTION, HeaderValue::from_static("close"));
        }

        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with_details(true)
    }
}
