use bytes::Bytes;
use http::{HeaderValue, Method, Response, StatusCode, header::CONTENT_TYPE};
use thiserror::Error;

use crate::body::BoxError;

/// Everything that can go wrong between receiving a request and handing a
/// response back to the transport.
#[derive(Debug, Error)]
pub enum RequestError {
  #[error("no route matches `{path}`")]
  NotFound { path: String },
  #[error("method {method} is not allowed for `{path}`")]
  MethodNotAllowed { method: Method, path: String },
  #[error("invalid value for parameter `{name}`: {reason}")]
  InvalidParameter { name: String, reason: String },
  #[error("failed to read request body: {0}")]
  ReadFailed(#[source] BoxError),
  #[error("request body is not valid UTF-8: {0}")]
  EncodingError(#[from] std::str::Utf8Error),
  #[error("invalid request body at `{path}`: {message}")]
  InvalidInput { path: String, message: String },
  #[error("failed to serialize response body: {0}")]
  SerializationFailure(#[source] serde_json::Error),
  #[error("operation failed: {0}")]
  OperationFailed(#[source] BoxError),
}

impl RequestError {
  pub fn invalid_parameter(name: impl Into<String>, reason: impl ToString) -> Self {
    Self::InvalidParameter {
      name: name.into(),
      reason: reason.to_string(),
    }
  }

  pub fn operation<E: Into<BoxError>>(error: E) -> Self {
    Self::OperationFailed(error.into())
  }

  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::NotFound { .. } => StatusCode::NOT_FOUND,
      Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
      Self::InvalidParameter { .. } | Self::ReadFailed(_) | Self::EncodingError(_) => StatusCode::BAD_REQUEST,
      Self::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      Self::SerializationFailure(_) | Self::OperationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Stable machine-readable code written to the `error` field of the response body.
  #[must_use]
  pub const fn code(&self) -> &'static str {
    match self {
      Self::NotFound { .. } => "not_found",
      Self::MethodNotAllowed { .. } => "method_not_allowed",
      Self::InvalidParameter { .. } => "invalid_parameter",
      Self::ReadFailed(_) => "read_failed",
      Self::EncodingError(_) => "encoding_error",
      Self::InvalidInput { .. } => "invalid_input",
      Self::SerializationFailure(_) => "serialization_failure",
      Self::OperationFailed(_) => "operation_failed",
    }
  }

  /// Renders `{"error": <code>, "message": <text>}` with the matching status.
  #[must_use]
  pub fn into_response(self) -> Response<Bytes> {
    let body = serde_json::json!({
      "error": self.code(),
      "message": self.to_string(),
    });

    let mut response = Response::new(Bytes::from(body.to_string()));
    *response.status_mut() = self.status();
    response
      .headers_mut()
      .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
  }
}

/// Returned by generated enums without a declared default when the text
/// names no variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{value}` is not a valid {type_name}")]
pub struct ParseEnumError {
  pub type_name: &'static str,
  pub value: String,
}

impl ParseEnumError {
  pub fn new(type_name: &'static str, value: impl Into<String>) -> Self {
    Self {
      type_name,
      value: value.into(),
    }
  }
}
