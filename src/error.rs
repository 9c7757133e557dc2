use std::fmt::Formatter;

use actix_web::{HttpResponse, ResponseError};
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::data::geocode::GeocodeError;

#[derive(Debug)]
pub enum ApiError {
    /// The service is missing its geocoding credential
    Configuration(String),
    /// Anything wrong with the uploaded file or its content
    BadRequest(String),
    /// The geocoding provider answered with a non-success status
    UpstreamStatus(u16),
    /// The geocoding provider sent an unusable body
    BadGateway(String),
    /// The geocoding provider could not be reached
    Unreachable(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn message(&self) -> String {
        match self {
            ApiError::Configuration(msg) => msg.clone(),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::UpstreamStatus(status) => {
                format!("Geocoding API returned status {}", status)
            },
            ApiError::BadGateway(msg) => {
                format!("Invalid geocoding response: {}", msg)
            },
            ApiError::Unreachable(msg) => {
                format!("Geocoding API unreachable: {}", msg)
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Configuration(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamStatus(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) | ApiError::Unreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.message();
        HttpResponse::build(self.status_code()).json(ErrorBody { error: &message })
    }
}

impl From<csv::Error> for ApiError {
    fn from(error: csv::Error) -> Self {
        ApiError::BadRequest(format!("Malformed CSV file: {}", error))
    }
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(error: actix_multipart::MultipartError) -> Self {
        ApiError::BadRequest(format!("Malformed upload: {}", error))
    }
}

impl From<GeocodeError> for ApiError {
    fn from(error: GeocodeError) -> Self {
        match error {
            GeocodeError::Status(status) => ApiError::UpstreamStatus(status),
            GeocodeError::Transport(reason) => ApiError::Unreachable(reason),
            other => ApiError::BadGateway(other.to_string()),
        }
    }
}

/// Raised at startup when the environment holds an unusable value
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub reason: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invalid {}: {}", self.variable, self.reason)
    }
}

impl std::error::Error for ConfigError {}
