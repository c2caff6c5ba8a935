#[path = "fixtures/items_server"]
mod items_server {
  pub mod server;
  pub mod types;
}

use std::sync::Mutex;

use http_body_util::Full;
use items_server::{
  server::{Api, handle},
  types::{CreateItemResponse, GetItemResponse, Item, ListItemsResponse, NewItem},
};
use oas3_scaffold_support::{
  Bytes,
  http::{Method, Request, Response, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Value, json};

#[derive(Default)]
struct RecordingApi {
  seen: Mutex<Vec<String>>,
}

impl RecordingApi {
  fn record(&self, entry: String) {
    self.seen.lock().unwrap().push(entry);
  }

  fn seen(&self) -> Vec<String> {
    self.seen.lock().unwrap().clone()
  }
}

fn item(id: i32, name: &str) -> Item {
  Item {
    id,
    name: name.to_string(),
    tags: None,
  }
}

impl Api for RecordingApi {
  async fn list_items(&self, limit: Option<u32>, tag: Option<Vec<String>>) -> anyhow::Result<ListItemsResponse> {
    self.record(format!("list_items limit={limit:?} tag={tag:?}"));
    Ok(vec![item(1, "bolt"), item(2, "nut")].into())
  }

  async fn get_item(&self, id: i32) -> anyhow::Result<GetItemResponse> {
    self.record(format!("get_item id={id}"));
    if id == 404 {
      return Ok(GetItemResponse::Http404);
    }
    Ok(item(id, "bolt").into())
  }

  async fn create_item(&self, body: NewItem) -> anyhow::Result<CreateItemResponse> {
    self.record(format!("create_item name={}", body.name));
    if body.name.is_empty() {
      anyhow::bail!("name must not be empty");
    }
    Ok(item(3, &body.name).into())
  }
}

fn request(method: Method, uri: &str, body: &'static str) -> Request<Full<Bytes>> {
  Request::builder()
    .method(method)
    .uri(uri)
    .body(Full::new(Bytes::from_static(body.as_bytes())))
    .unwrap()
}

fn json_body(response: &Response<Bytes>) -> Value {
  serde_json::from_slice(response.body()).unwrap()
}

#[tokio::test]
async fn matched_path_parameter_reaches_the_operation() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::GET, "/v1/items/42", "")).await;

  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
  assert_eq!(json_body(&response), json!({ "id": 42, "name": "bolt" }));
  assert_eq!(api.seen(), vec!["get_item id=42".to_string()]);
}

#[tokio::test]
async fn bodyless_response_renders_empty() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::GET, "/v1/items/404", "")).await;

  assert_eq!(response.status(), StatusCode::NOT_FOUND);
  assert!(response.body().is_empty());
}

#[tokio::test]
async fn uncoercible_path_parameter_is_rejected_before_the_operation() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::GET, "/v1/items/abc", "")).await;

  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  let body = json_body(&response);
  assert_eq!(body["error"], "invalid_parameter");
  assert!(body["message"].as_str().unwrap().contains("`id`"));
  assert!(api.seen().is_empty());
}

#[tokio::test]
async fn unknown_path_is_not_found() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::GET, "/v1/unknown", "")).await;

  assert_eq!(response.status(), StatusCode::NOT_FOUND);
  assert_eq!(json_body(&response)["error"], "not_found");
}

#[tokio::test]
async fn method_without_routes_is_not_allowed() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::DELETE, "/v1/items/42", "")).await;

  assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(json_body(&response)["error"], "method_not_allowed");
}

#[tokio::test]
async fn path_known_only_to_another_method_is_not_allowed() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::POST, "/v1/items/42", "")).await;

  assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn query_parameters_are_bound_by_style() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::GET, "/v1/items?limit=5&tag=a&tag=b", "")).await;

  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(json_body(&response).as_array().map(Vec::len), Some(2));
  assert_eq!(
    api.seen(),
    vec![r#"list_items limit=Some(5) tag=Some(["a", "b"])"#.to_string()]
  );
}

#[tokio::test]
async fn json_body_is_decoded_into_the_operation_input() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::POST, "/v1/items", r#"{"name":"washer"}"#)).await;

  assert_eq!(response.status(), StatusCode::CREATED);
  assert_eq!(json_body(&response)["name"], "washer");
  assert_eq!(api.seen(), vec!["create_item name=washer".to_string()]);
}

#[tokio::test]
async fn malformed_json_body_is_invalid_input() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::POST, "/v1/items", r#"{"name":7}"#)).await;

  assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let body = json_body(&response);
  assert_eq!(body["error"], "invalid_input");
  assert!(body["message"].as_str().unwrap().contains("name"));
  assert!(api.seen().is_empty());
}

#[tokio::test]
async fn operation_failure_is_an_internal_error() {
  let api = RecordingApi::default();
  let response = handle(&api, request(Method::POST, "/v1/items", r#"{"name":""}"#)).await;

  assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json_body(&response)["error"], "operation_failed");
}
