//! JSON error responses for the HTTP API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use newplaces_broker::BrokerError;
use serde::Serialize;
use tracing::error;

/// Body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
}

/// Failure of an API request
#[derive(Debug)]
pub enum ApiError {
    Canvas(newplaces_canvas::Error),
    Broker(BrokerError),
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Canvas(e) if e.is_rejection() => StatusCode::BAD_REQUEST,
            Self::Canvas(newplaces_canvas::Error::Storage(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Canvas(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Broker(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Canvas(e) => e.code(),
            Self::Broker(BrokerError::Stopped) => "BROKER_STOPPED",
            Self::InvalidBody(_) => "INVALID_BODY",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Canvas(e) => e.to_string(),
            Self::Broker(e) => e.to_string(),
            Self::InvalidBody(msg) => msg.clone(),
        }
    }
}

impl From<newplaces_canvas::Error> for ApiError {
    fn from(err: newplaces_canvas::Error) -> Self {
        Self::Canvas(err)
    }
}

impl From<BrokerError> for ApiError {
    fn from(err: BrokerError) -> Self {
        Self::Broker(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self.message(), "Request failed");
        }

        let body = ErrorResponse {
            success: false,
            error: self.message(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newplaces_canvas::Error;

    #[test]
    fn test_rejections_are_bad_requests() {
        let out_of_range = ApiError::from(Error::OutOfRange {
            x: 5,
            y: 0,
            width: 4,
            height: 3,
        });
        assert_eq!(out_of_range.status(), StatusCode::BAD_REQUEST);
        assert_eq!(out_of_range.code(), "OUT_OF_RANGE");

        let color = ApiError::from(Error::InvalidColor(0x12345678));
        assert_eq!(color.status(), StatusCode::BAD_REQUEST);
        assert_eq!(color.code(), "INVALID_COLOR");
    }

    #[test]
    fn test_system_failures() {
        let storage = ApiError::from(Error::Storage("connection refused".to_string()));
        assert_eq!(storage.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(storage.code(), "STORAGE_ERROR");

        let stopped = ApiError::from(BrokerError::Stopped);
        assert_eq!(stopped.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(stopped.code(), "BROKER_STOPPED");

        let config = ApiError::from(Error::Config("width is zero".to_string()));
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
