use std::collections::HashSet;

use serde_json::Value;

use super::{
  document::SchemaDocument,
  errors::{GenerationError, GenerationResult},
};

pub(crate) const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Follows local JSON pointers (`#/a/b`) through the document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SchemaResolver<'a> {
  document: &'a SchemaDocument,
}

impl<'a> SchemaResolver<'a> {
  pub(crate) const fn new(document: &'a SchemaDocument) -> Self {
    Self { document }
  }

  pub(crate) fn resolve(&self, pointer: &str) -> GenerationResult<&'a Value> {
    let unresolved = || GenerationError::UnresolvedReference {
      pointer: pointer.to_string(),
    };

    let Some(path) = pointer.strip_prefix('#') else {
      return Err(unresolved());
    };

    let mut current = self.document.root();
    if path.is_empty() {
      return Ok(current);
    }

    let Some(path) = path.strip_prefix('/') else {
      return Err(unresolved());
    };

    for segment in path.split('/') {
      let key = unescape_segment(segment);
      current = match current {
        Value::Object(map) => map.get(&key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
      }
      .ok_or_else(unresolved)?;
    }

    Ok(current)
  }

  /// Follows `$ref` chains until a non-reference node is reached.
  pub(crate) fn dereference(&self, node: &'a Value) -> GenerationResult<&'a Value> {
    let mut visited = HashSet::new();
    let mut current = node;

    while let Some(pointer) = reference_of(current) {
      if !visited.insert(pointer) {
        return Err(GenerationError::RecursiveSchema {
          pointer: pointer.to_string(),
        });
      }
      current = self.resolve(pointer)?;
    }

    Ok(current)
  }
}

pub(crate) fn reference_of(node: &Value) -> Option<&str> {
  node.get("$ref").and_then(Value::as_str)
}

/// Name of the component a `#/components/schemas/<name>` pointer targets.
pub(crate) fn component_name(pointer: &str) -> Option<String> {
  pointer
    .strip_prefix(SCHEMA_REF_PREFIX)
    .filter(|name| !name.is_empty() && !name.contains('/'))
    .map(unescape_segment)
}

fn unescape_segment(segment: &str) -> String {
  segment.replace("~1", "/").replace("~0", "~")
}
