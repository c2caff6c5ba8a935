use bytes::Bytes;
use http_body::Body;
use http_body_util::{BodyExt, combinators::UnsyncBoxBody};
use serde::de::DeserializeOwned;

use crate::error::RequestError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Request body handed to operations whose content is not JSON. It is never buffered.
pub type RawBody = UnsyncBoxBody<Bytes, BoxError>;

pub fn raw_body<B>(body: B) -> RawBody
where
  B: Body<Data = Bytes> + Send + 'static,
  B::Error: Into<BoxError>,
{
  body.map_err(|error| -> BoxError { error.into() }).boxed_unsync()
}

/// Buffers the whole body.
pub async fn read_bytes<B>(body: B) -> Result<Bytes, RequestError>
where
  B: Body<Data = Bytes>,
  B::Error: Into<BoxError>,
{
  let collected = body
    .collect()
    .await
    .map_err(|error| RequestError::ReadFailed(error.into()))?;
  Ok(collected.to_bytes())
}

pub async fn read_json<T, B>(body: B) -> Result<T, RequestError>
where
  T: DeserializeOwned,
  B: Body<Data = Bytes>,
  B::Error: Into<BoxError>,
{
  let bytes = read_bytes(body).await?;
  decode_json(&bytes)
}

/// Like [`read_json`], but an empty or whitespace-only body yields `None`.
pub async fn read_optional_json<T, B>(body: B) -> Result<Option<T>, RequestError>
where
  T: DeserializeOwned,
  B: Body<Data = Bytes>,
  B::Error: Into<BoxError>,
{
  let bytes = read_bytes(body).await?;
  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(None);
  }
  decode_json(&bytes).map(Some)
}

/// Decodes UTF-8 JSON, reporting the path of the first offending value.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RequestError> {
  let text = std::str::from_utf8(bytes)?;
  let deserializer = &mut serde_json::Deserializer::from_str(text);
  serde_path_to_error::deserialize(deserializer).map_err(|error| RequestError::InvalidInput {
    path: error.path().to_string(),
    message: error.inner().to_string(),
  })
}

#[cfg(test)]
mod tests {
  use http_body_util::Full;
  use serde::Deserialize;

  use super::*;

  #[derive(Debug, Deserialize, PartialEq)]
  struct NewItem {
    name: String,
    quantity: i32,
  }

  #[tokio::test]
  async fn reads_json_body() {
    let body = Full::new(Bytes::from_static(br#"{"name":"bolt","quantity":3}"#));
    let item: NewItem = read_json(body).await.unwrap();
    assert_eq!(
      item,
      NewItem {
        name: "bolt".to_string(),
        quantity: 3
      }
    );
  }

  #[tokio::test]
  async fn invalid_json_reports_path() {
    let body = Full::new(Bytes::from_static(br#"{"name":"bolt","quantity":"three"}"#));
    let error = read_json::<NewItem, _>(body).await.unwrap_err();
    let RequestError::InvalidInput { path, .. } = &error else {
      panic!("expected invalid input, got {error:?}");
    };
    assert_eq!(path, "quantity");
    assert_eq!(error.code(), "invalid_input");
  }

  #[tokio::test]
  async fn invalid_utf8_is_an_encoding_error() {
    let body = Full::new(Bytes::from_static(&[0xff, 0xfe, 0xfd]));
    let error = read_json::<NewItem, _>(body).await.unwrap_err();
    assert_eq!(error.code(), "encoding_error");
  }

  #[tokio::test]
  async fn empty_optional_body_is_none() {
    let body = Full::new(Bytes::from_static(b"  \n"));
    let item = read_optional_json::<NewItem, _>(body).await.unwrap();
    assert_eq!(item, None);
  }

  #[tokio::test]
  async fn raw_body_is_not_buffered_until_read() {
    let body = raw_body(Full::new(Bytes::from_static(b"plain text")));
    assert_eq!(read_bytes(body).await.unwrap(), Bytes::from_static(b"plain text"));
  }
}
