use std::sync::LazyLock;

use http::{Method, Uri};
use regex::{Captures, Regex};
use serde_json::Value;

use super::{
  errors::{GenerationError, GenerationResult},
  naming::identifiers::to_pascal_case,
};

static SERVER_VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

static HTTP_METHODS: [(&str, Method); 8] = [
  ("get", Method::GET),
  ("put", Method::PUT),
  ("post", Method::POST),
  ("delete", Method::DELETE),
  ("options", Method::OPTIONS),
  ("head", Method::HEAD),
  ("patch", Method::PATCH),
  ("trace", Method::TRACE),
];

/// The parsed API description. Read-only once constructed.
#[derive(Debug, Clone)]
pub(crate) struct SchemaDocument {
  root: Value,
}

/// One operation object together with the path item that declares it.
#[derive(Debug, Clone)]
pub(crate) struct OperationRef<'a> {
  pub(crate) path: &'a str,
  pub(crate) method: Method,
  pub(crate) operation: &'a Value,
  pub(crate) path_item: &'a Value,
}

impl OperationRef<'_> {
  /// The declared `operationId`, or one synthesized from method and path
  /// (`GET /pets/{petId}` becomes `GetPetsPetId`).
  pub(crate) fn operation_id(&self) -> String {
    self
      .operation
      .get("operationId")
      .and_then(Value::as_str)
      .map_or_else(
        || to_pascal_case(&[self.method.as_str().to_ascii_lowercase().as_str(), self.path]),
        ToString::to_string,
      )
  }
}

impl SchemaDocument {
  pub(crate) fn from_value(root: Value) -> GenerationResult<Self> {
    let Some(object) = root.as_object() else {
      return Err(GenerationError::InvalidDocument("document root must be an object".to_string()));
    };

    if object.get("paths").is_some_and(|paths| !paths.is_object()) {
      return Err(GenerationError::InvalidDocument("`paths` must be an object".to_string()));
    }

    if root
      .pointer("/components/schemas")
      .is_some_and(|schemas| !schemas.is_object())
    {
      return Err(GenerationError::InvalidDocument(
        "`components.schemas` must be an object".to_string(),
      ));
    }

    Ok(Self { root })
  }

  pub(crate) fn root(&self) -> &Value {
    &self.root
  }

  pub(crate) fn title(&self) -> Option<&str> {
    self.root.pointer("/info/title").and_then(Value::as_str)
  }

  pub(crate) fn version(&self) -> Option<&str> {
    self.root.pointer("/info/version").and_then(Value::as_str)
  }

  /// Path component of the first declared server URL, without a trailing slash.
  /// Server variables are replaced by their defaults first. Empty when no
  /// server is declared or the server sits at the root.
  pub(crate) fn base_path(&self) -> String {
    let Some(server) = self.root.pointer("/servers/0") else {
      return String::new();
    };
    let Some(url) = server.get("url").and_then(Value::as_str) else {
      return String::new();
    };

    let expanded = SERVER_VARIABLE_RE.replace_all(url, |captures: &Captures| {
      server
        .get("variables")
        .and_then(|variables| variables.get(&captures[1]))
        .and_then(|variable| variable.get("default"))
        .and_then(Value::as_str)
        .map_or_else(|| captures[0].to_string(), str::to_string)
    });
    server_path(&expanded)
  }

  pub(crate) fn component_schemas(&self) -> impl Iterator<Item = (&str, &Value)> {
    self
      .root
      .pointer("/components/schemas")
      .and_then(Value::as_object)
      .into_iter()
      .flatten()
      .map(|(name, schema)| (name.as_str(), schema))
  }

  /// Operations in document order: paths as declared, then methods in the
  /// conventional get, put, post, delete, options, head, patch, trace order.
  pub(crate) fn operations(&self) -> Vec<OperationRef<'_>> {
    let Some(paths) = self.root.get("paths").and_then(Value::as_object) else {
      return vec![];
    };

    paths
      .iter()
      .flat_map(|(path, path_item)| {
        HTTP_METHODS.iter().filter_map(move |(key, method)| {
          path_item
            .get(*key)
            .filter(|operation| operation.is_object())
            .map(|operation| OperationRef {
              path: path.as_str(),
              method: method.clone(),
              operation,
              path_item,
            })
        })
      })
      .collect()
  }
}

pub(crate) fn normalize_base_path(raw: &str) -> String {
  let trimmed = raw.trim().trim_end_matches('/');
  if trimmed.is_empty() {
    String::new()
  } else if trimmed.starts_with('/') {
    trimmed.to_string()
  } else {
    format!("/{trimmed}")
  }
}

fn server_path(url: &str) -> String {
  if let Ok(uri) = url.parse::<Uri>() {
    return normalize_base_path(uri.path());
  }

  // Templated hosts such as `https://{region}.example.com/v1` are not valid URIs.
  let without_fragment = url.split(['?', '#']).next().unwrap_or_default();
  let path = match without_fragment.split_once("://") {
    Some((_, rest)) => rest.find('/').map_or("", |index| &rest[index..]),
    None => without_fragment,
  };
  normalize_base_path(path)
}
