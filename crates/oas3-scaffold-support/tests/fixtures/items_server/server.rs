//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Items API 1.0.0
//! Generated by `oas3-scaffold` 0.1.0

use oas3_scaffold_support::{self as support, IntoHttpResponse};
use super::types::*;
/// Routed paths for `GET` requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetPath {
    Items,
    ItemsId,
}
static GET_ROUTES: std::sync::LazyLock<support::Router<GetPath>> = std::sync::LazyLock::new(|| {
    let mut router = support::Router::new();
    let _ = router.insert("/v1/items", GetPath::Items);
    let _ = router.insert("/v1/items/{id}", GetPath::ItemsId);
    router
});
/// Routed paths for `POST` requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostPath {
    Items,
}
static POST_ROUTES: std::sync::LazyLock<support::Router<PostPath>> = std::sync::LazyLock::new(|| {
    let mut router = support::Router::new();
    let _ = router.insert("/v1/items", PostPath::Items);
    router
});
/// Implemented by the application; one method per operation.
pub trait Api: Send + Sync {
    /// Lists items, optionally filtered by tag.
    fn list_items(
        &self,
        limit: Option<u32>,
        tag: Option<Vec<String>>,
    ) -> impl std::future::Future<Output = anyhow::Result<ListItemsResponse>> + Send;
    fn create_item(
        &self,
        body: NewItem,
    ) -> impl std::future::Future<Output = anyhow::Result<CreateItemResponse>> + Send;
    fn get_item(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = anyhow::Result<GetItemResponse>> + Send;
}
impl support::IntoHttpResponse for ListItemsResponse {
    fn into_http_response(
        self,
    ) -> std::result::Result<support::http::Response<support::Bytes>, support::RequestError> {
        let status = self.status_code();
        match self {
            Self::Http200(body) => support::json_response(status, &body),
        }
    }
}
impl support::IntoHttpResponse for CreateItemResponse {
    fn into_http_response(
        self,
    ) -> std::result::Result<support::http::Response<support::Bytes>, support::RequestError> {
        let status = self.status_code();
        match self {
            Self::Http201(body) => support::json_response(status, &body),
            Self::Default(body) => support::json_response(status, &body),
        }
    }
}
impl support::IntoHttpResponse for GetItemResponse {
    fn into_http_response(
        self,
    ) -> std::result::Result<support::http::Response<support::Bytes>, support::RequestError> {
        let status = self.status_code();
        match self {
            Self::Http200(body) => support::json_response(status, &body),
            Self::Http404 => Ok(support::empty_response(status)),
        }
    }
}
/// Routes `request`, binds its arguments, awaits the operation and renders
/// the result. Binding and operation failures become JSON error responses.
pub async fn handle<A, B>(
    api: &A,
    request: support::http::Request<B>,
) -> support::http::Response<support::Bytes>
where
    A: Api,
    B: support::http_body::Body<Data = support::Bytes> + Send + 'static,
    B::Error: Into<support::BoxError>,
{
    match dispatch(api, request).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}
#[allow(unused_variables)]
async fn dispatch<A, B>(
    api: &A,
    request: support::http::Request<B>,
) -> std::result::Result<support::http::Response<support::Bytes>, support::RequestError>
where
    A: Api,
    B: support::http_body::Body<Data = support::Bytes> + Send + 'static,
    B::Error: Into<support::BoxError>,
{
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();
    let query = support::QueryParams::parse(parts.uri.query());
    match parts.method.as_str() {
        "GET" => {
            let Some(matched) = GET_ROUTES.at(path) else {
                return Err(unrouted(&parts.method, path));
            };
            match matched.value {
                GetPath::Items => {
                    api.list_items(
                            support::optional_query_param(&query, "limit")?,
                            support::optional_query_values(
                                &query,
                                "tag",
                                support::ArrayStyle::Repeated,
                            )?,
                        )
                        .await
                        .map_err(support::RequestError::operation)?
                        .into_http_response()
                }
                GetPath::ItemsId => {
                    api.get_item(support::path_param(&matched.params, "id")?)
                        .await
                        .map_err(support::RequestError::operation)?
                        .into_http_response()
                }
            }
        }
        "POST" => {
            let Some(matched) = POST_ROUTES.at(path) else {
                return Err(unrouted(&parts.method, path));
            };
            match matched.value {
                PostPath::Items => {
                    api.create_item(support::read_json(body).await?)
                        .await
                        .map_err(support::RequestError::operation)?
                        .into_http_response()
                }
            }
        }
        _ => Err(unrouted(&parts.method, path)),
    }
}
fn unrouted(method: &support::http::Method, path: &str) -> support::RequestError {
    let routed = GET_ROUTES.at(path).is_some() || POST_ROUTES.at(path).is_some();
    if routed {
        support::RequestError::MethodNotAllowed {
            method: method.clone(),
            path: path.to_string(),
        }
    } else {
        support::RequestError::NotFound {
            path: path.to_string(),
        }
    }
}
