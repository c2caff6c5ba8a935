use bytes::Bytes;
use http::{HeaderValue, Response, StatusCode, header::CONTENT_TYPE};
use serde::Serialize;

use crate::error::RequestError;

/// Implemented by every generated `<Operation>Response` enum.
pub trait IntoHttpResponse {
  fn into_http_response(self) -> Result<Response<Bytes>, RequestError>;
}

fn status_from(code: u16) -> StatusCode {
  StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn with_body(code: u16, body: Bytes, content_type: Option<&'static str>) -> Response<Bytes> {
  let mut response = Response::new(body);
  *response.status_mut() = status_from(code);
  if let Some(content_type) = content_type {
    response
      .headers_mut()
      .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
  }
  response
}

pub fn json_response<T: Serialize>(code: u16, value: &T) -> Result<Response<Bytes>, RequestError> {
  let body = serde_json::to_vec(value).map_err(RequestError::SerializationFailure)?;
  Ok(with_body(code, Bytes::from(body), Some("application/json")))
}

#[must_use]
pub fn bytes_response(code: u16, body: Bytes) -> Response<Bytes> {
  with_body(code, body, Some("application/octet-stream"))
}

#[must_use]
pub fn empty_response(code: u16) -> Response<Bytes> {
  with_body(code, Bytes::new(), None)
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;

  #[test]
  fn json_response_sets_status_and_content_type() {
    let response = json_response(201, &BTreeMap::from([("id", 7)])).unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(response.body().as_ref(), br#"{"id":7}"#);
  }

  #[test]
  fn empty_response_has_no_content_type() {
    let response = empty_response(204);
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().get(CONTENT_TYPE).is_none());
    assert!(response.body().is_empty());
  }

  #[test]
  fn out_of_range_status_falls_back_to_internal_error() {
    assert_eq!(empty_response(1000).status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn bytes_response_is_octet_stream() {
    let response = bytes_response(200, Bytes::from_static(b"raw"));
    assert_eq!(response.headers()[CONTENT_TYPE], "application/octet-stream");
  }
}
