use std::collections::{BTreeSet, HashMap};

use http::Method;
use indexmap::IndexMap;

use crate::generator::{
  ast::{ConstToken, ParsedPath, RouteDef, RouteTableDef, TypeToken},
  errors::{GenerationError, GenerationResult},
  naming::identifiers::{ensure_unique, to_pascal_case},
};

/// Where a (method, path) pair landed in the route tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteSlot {
  pub(crate) path_enum: TypeToken,
  pub(crate) variant: TypeToken,
}

#[derive(Debug)]
struct TableState {
  table: RouteTableDef,
  by_template: HashMap<String, TypeToken>,
  by_shape: HashMap<String, String>,
  used: BTreeSet<String>,
}

/// Collects one route table per HTTP method, in first-appearance order.
#[derive(Debug, Default)]
pub(crate) struct RouteTableBuilder {
  base_path: String,
  tables: IndexMap<Method, TableState>,
}

impl RouteTableBuilder {
  pub(crate) fn new(base_path: impl Into<String>) -> Self {
    Self {
      base_path: base_path.into(),
      tables: IndexMap::new(),
    }
  }

  /// Adds `path` to the table for `method`, returning its path identifier.
  ///
  /// Adding the same template twice returns the same identifier. Two templates
  /// that differ only in placeholder names cannot share a router and fail.
  pub(crate) fn add(&mut self, method: &Method, path: &ParsedPath) -> GenerationResult<RouteSlot> {
    let state = self
      .tables
      .entry(method.clone())
      .or_insert_with(|| TableState::new(method));

    if let Some(variant) = state.by_template.get(path.template()) {
      return Ok(RouteSlot {
        path_enum: state.table.enum_name.clone(),
        variant: variant.clone(),
      });
    }

    let shape = path.shape();
    if let Some(existing) = state.by_shape.get(&shape) {
      return Err(GenerationError::InvalidPath {
        path: path.template().to_string(),
        detail: format!("conflicts with `{existing}` for {method}"),
      });
    }

    let variant = TypeToken::new(&ensure_unique(&variant_base(path), &state.used));
    state.used.insert(variant.to_string());
    state.by_shape.insert(shape, path.template().to_string());
    state.by_template.insert(path.template().to_string(), variant.clone());
    state.table.routes.push(RouteDef {
      variant: variant.clone(),
      pattern: format!("{}{}", self.base_path, path.template()),
    });

    Ok(RouteSlot {
      path_enum: state.table.enum_name.clone(),
      variant,
    })
  }

  pub(crate) fn finish(self) -> Vec<RouteTableDef> {
    self.tables.into_values().map(|state| state.table).collect()
  }
}

impl TableState {
  fn new(method: &Method) -> Self {
    let lower = method.as_str().to_ascii_lowercase();
    Self {
      table: RouteTableDef {
        method: method.clone(),
        enum_name: TypeToken::from_fragments(&[lower.as_str(), "Path"]),
        static_name: ConstToken::from(format!("{lower}_routes").as_str()),
        routes: vec![],
      },
      by_template: HashMap::new(),
      by_shape: HashMap::new(),
      used: BTreeSet::new(),
    }
  }
}

fn variant_base(path: &ParsedPath) -> String {
  let pascal = to_pascal_case(&[path.template()]);
  if pascal.is_empty() {
    "Root".to_string()
  } else {
    TypeToken::from_raw(&pascal).to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parsed(template: &str) -> ParsedPath {
    ParsedPath::parse(template).unwrap()
  }

  #[test]
  fn test_tables_group_by_method_in_order() {
    let mut builder = RouteTableBuilder::new("/v1");
    let list = builder.add(&Method::GET, &parsed("/items")).unwrap();
    let create = builder.add(&Method::POST, &parsed("/items")).unwrap();
    let get = builder.add(&Method::GET, &parsed("/items/{id}")).unwrap();
    let root = builder.add(&Method::GET, &parsed("/")).unwrap();

    assert_eq!(list.path_enum.as_str(), "GetPath");
    assert_eq!(create.path_enum.as_str(), "PostPath");
    assert_eq!(list.variant.as_str(), "Items");
    assert_eq!(get.variant.as_str(), "ItemsId");
    assert_eq!(root.variant.as_str(), "Root");

    let tables = builder.finish();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].method, Method::GET);
    assert_eq!(tables[0].static_name.to_string(), "GET_ROUTES");
    let patterns = tables[0].routes.iter().map(|r| r.pattern.as_str()).collect::<Vec<_>>();
    assert_eq!(patterns, ["/v1/items", "/v1/items/{id}", "/v1/"]);
  }

  #[test]
  fn test_repeated_template_reuses_variant() {
    let mut builder = RouteTableBuilder::new("");
    let first = builder.add(&Method::GET, &parsed("/pets/{id}")).unwrap();
    let second = builder.add(&Method::GET, &parsed("/pets/{id}")).unwrap();
    assert_eq!(first, second);
    assert_eq!(builder.finish()[0].routes.len(), 1);
  }

  #[test]
  fn test_colliding_variant_names_get_suffixes() {
    let mut builder = RouteTableBuilder::new("");
    let first = builder.add(&Method::GET, &parsed("/pet-items")).unwrap();
    let second = builder.add(&Method::GET, &parsed("/pet/items")).unwrap();
    assert_eq!(first.variant.as_str(), "PetItems");
    assert_eq!(second.variant.as_str(), "PetItems2");
  }

  #[test]
  fn test_same_shape_with_other_placeholder_fails() {
    let mut builder = RouteTableBuilder::new("");
    builder.add(&Method::GET, &parsed("/pets/{id}")).unwrap();
    let error = builder.add(&Method::GET, &parsed("/pets/{name}")).unwrap_err();
    assert!(matches!(error, GenerationError::InvalidPath { .. }));
    assert!(builder.add(&Method::DELETE, &parsed("/pets/{name}")).is_ok());
  }
}
