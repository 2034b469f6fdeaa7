//! The result of one API call.

use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, ErrorCode};

/// Outcome of a call: a JSON payload, a saved file or an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Json(JsonResult),
    File(FileResult),
    Error(ErrorResult),
}

/// Successful response with a JSON object body.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResult {
    pub status: u16,
    pub content_type: String,
    pub body: Map<String, Value>,
}

/// Successful response whose body was written to `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    pub status: u16,
    pub content_type: String,
    pub path: PathBuf,
}

/// Failed call. `status` and `content_type` are absent when no response was received.
#[derive(Debug, Clone)]
pub struct ErrorResult {
    pub status: Option<u16>,
    pub content_type: Option<String>,
    pub code: ErrorCode,
    pub message: String,
    pub cause: Option<Arc<Error>>,
}

impl ErrorResult {
    /// Error raised locally from a stage failure, before or without a usable response.
    pub(crate) fn from_cause(
        status: Option<u16>,
        content_type: Option<String>,
        cause: Error,
    ) -> Self {
        let code = ErrorCode::from(&cause);
        Self {
            status,
            content_type,
            code,
            message: code.description().to_string(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Error decided from the response itself.
    pub(crate) fn from_response(
        status: u16,
        content_type: Option<String>,
        code: ErrorCode,
        message: String,
    ) -> Self {
        Self {
            status: Some(status),
            content_type,
            code,
            message,
            cause: None,
        }
    }
}

impl PartialEq for ErrorResult {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
            && self.content_type == other.content_type
            && self.code == other.code
            && self.message == other.message
            && self.cause.as_ref().map(|c| c.to_string())
                == other.cause.as_ref().map(|c| c.to_string())
    }
}

impl Outcome {
    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Json(r) => Some(r.status),
            Outcome::File(r) => Some(r.status),
            Outcome::Error(e) => e.status,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Outcome::Error(e) => Some(e.code),
            _ => None,
        }
    }
}

impl From<ErrorResult> for Outcome {
    fn from(error: ErrorResult) -> Self {
        Outcome::Error(error)
    }
}
