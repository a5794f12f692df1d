use log::{error, warn};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::Request;

/// Which store operation a persistence failure interrupted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
}

#[derive(Debug)]
pub enum RequestError {
    InvalidInput {
        reason: String,
    },
    Persistence {
        operation: Operation,
        source: sqlx::Error,
    },
}

impl RequestError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn load_failed(source: sqlx::Error) -> Self {
        Self::Persistence {
            operation: Operation::Load,
            source,
        }
    }

    pub fn save_failed(source: sqlx::Error) -> Self {
        Self::Persistence {
            operation: Operation::Save,
            source,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::InvalidInput { .. } => Status::BadRequest,
            Self::Persistence { .. } => Status::InternalServerError,
        }
    }

    /// The message sent to clients. Details stay in the server log.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "Invalid name or score",
            Self::Persistence {
                operation: Operation::Load,
                ..
            } => "Failed to load scores",
            Self::Persistence {
                operation: Operation::Save,
                ..
            } => "Failed to save score",
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput { .. } => None,
            Self::Persistence { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid input: {}", reason),
            Self::Persistence {
                operation: Operation::Load,
                source,
            } => write!(f, "failed to load scores: {}", source),
            Self::Persistence {
                operation: Operation::Save,
                source,
            } => write!(f, "failed to save score: {}", source),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match &self {
            Self::InvalidInput { .. } => warn!("{} {}: {}", request.method(), request.uri(), self),
            Self::Persistence { .. } => error!("{} {}: {}", request.method(), request.uri(), self),
        }

        let body = ErrorBody::new(self.public_message());
        (self.status(), Json(body)).respond_to(request)
    }
}

pub type RequestResult<T, E = RequestError> = std::result::Result<T, E>;
