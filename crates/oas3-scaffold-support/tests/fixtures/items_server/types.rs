//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Items API 1.0.0
//! Generated by `oas3-scaffold` 0.1.0

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Error {
    pub message: String,
}
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Item {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
/// Responses of `GET /items`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItemsResponse {
    /// Matching items.
    Http200(Vec<Item>),
}
impl ListItemsResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http200(_) => 200,
        }
    }
}
impl From<Vec<Item>> for ListItemsResponse {
    fn from(value: Vec<Item>) -> Self {
        Self::Http200(value)
    }
}
/// Responses of `POST /items`.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateItemResponse {
    /// The created item.
    Http201(Item),
    /// Unexpected failure.
    Default(Error),
}
impl CreateItemResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http201(_) => 201,
            Self::Default(_) => 500,
        }
    }
}
impl From<Item> for CreateItemResponse {
    fn from(value: Item) -> Self {
        Self::Http201(value)
    }
}
impl From<Error> for CreateItemResponse {
    fn from(value: Error) -> Self {
        Self::Default(value)
    }
}
/// Responses of `GET /items/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub enum GetItemResponse {
    /// The item.
    Http200(Item),
    /// No such item.
    Http404,
}
impl GetItemResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http200(_) => 200,
            Self::Http404 => 404,
        }
    }
}
impl From<Item> for GetItemResponse {
    fn from(value: Item) -> Self {
        Self::Http200(value)
    }
}
