//! Runtime pieces shared by every server module emitted by `oas3-scaffold`.
//!
//! Generated code only reaches into this crate through the re-exports below:
//! the path [`Router`], [`QueryParams`], the parameter coercion helpers, body
//! readers and response rendering. All request-time failures are expressed as
//! [`RequestError`], which renders itself as a JSON error response.

mod body;
mod error;
mod params;
mod query;
mod response;
mod router;

pub use body::{BoxError, RawBody, decode_json, raw_body, read_bytes, read_json, read_optional_json};
pub use error::{ParseEnumError, RequestError};
pub use params::{
  ArrayStyle, optional_query_param, optional_query_values, parse_param, path_param, query_param, query_values,
};
pub use query::QueryParams;
pub use response::{IntoHttpResponse, bytes_response, empty_response, json_response};
pub use router::{Match, PathParams, RouteInsertError, Router, normalize_path};

pub use bytes::Bytes;
pub use http;
pub use http_body;
