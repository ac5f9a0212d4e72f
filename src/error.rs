use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::handlers::shared::ApiResponse;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl LeagueError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeagueError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        LeagueError::NotFound(message.into())
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        LeagueError::Persistence(message.into())
    }
}

impl ResponseError for LeagueError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeagueError::Validation(_) => StatusCode::BAD_REQUEST,
            LeagueError::NotFound(_) => StatusCode::NOT_FOUND,
            LeagueError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        if status_code.is_server_error() {
            log::error!(
                "Request failed with status {}: {}",
                status_code,
                error_message
            );
        } else {
            log::debug!("Request rejected with status {}: {}", status_code, error_message);
        }

        // Storage details stay in the logs
        let public_message = match self {
            LeagueError::Persistence(_) => "Changes could not be saved".to_string(),
            _ => error_message,
        };

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(&public_message))
    }
}

pub type LeagueResult<T> = Result<T, LeagueError>;
