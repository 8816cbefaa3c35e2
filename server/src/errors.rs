use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use larder_core::errors::GeminiError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Error type for HTTP server
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required field was missing or empty.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// The body could not be read as the route's JSON shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: GeminiError,
    },

    #[error("{context}: {source}")]
    MalformedUpstreamOutput {
        context: &'static str,
        #[source]
        source: GeminiError,
    },
}

impl ApiError {
    /// Wrap a model failure, keeping unparseable output apart from call failures.
    pub fn upstream(context: &'static str, source: GeminiError) -> Self {
        match source {
            GeminiError::MalformedOutput(_) => Self::MalformedUpstreamOutput { context, source },
            source => Self::Upstream { context, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::MalformedUpstreamOutput { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.to_string())
    }
}

/// JSON error envelope
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::InvalidInput(message) => {
                warn!(error = message, "Rejected request");
                ErrorResponse {
                    error: message.to_string(),
                    details: None,
                }
            }
            Self::InvalidBody(details) => {
                warn!(error = %details, "Rejected request body");
                ErrorResponse {
                    error: "Invalid request body".to_string(),
                    details: Some(details),
                }
            }
            Self::Upstream { context, source } | Self::MalformedUpstreamOutput { context, source } => {
                error!(error = %source, "{}", context);
                ErrorResponse {
                    error: context.to_string(),
                    details: Some(source.to_string()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
