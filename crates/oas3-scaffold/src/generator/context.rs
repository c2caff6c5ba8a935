use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::Value;

use super::{
  ast::{ConversionDef, FieldDef, RustType, TypeToken},
  converter::{
    deferred::DeferredTypeQueue,
    enums::EnumRegistry,
  },
  document::SchemaDocument,
  errors::{GenerationError, GenerationResult},
  resolver::SchemaResolver,
};

#[derive(Debug, Clone)]
struct NamedEntry<'a> {
  node: &'a Value,
  origin: String,
}

/// Every registry one generation run writes to, threaded explicitly through
/// each resolution call. Nothing here outlives the run.
#[derive(Debug)]
pub(crate) struct GenerationContext<'a> {
  pub(crate) document: &'a SchemaDocument,
  pub(crate) resolver: SchemaResolver<'a>,
  named: IndexMap<TypeToken, NamedEntry<'a>>,
  pub(crate) deferred: DeferredTypeQueue<'a>,
  pub(crate) enums: EnumRegistry,
  pub(crate) conversions: Vec<ConversionDef>,
  pub(crate) types: Vec<RustType>,
  pub(crate) warnings: Vec<String>,
  field_cache: HashMap<TypeToken, Vec<FieldDef>>,
  merge_stack: Vec<TypeToken>,
}

impl<'a> GenerationContext<'a> {
  pub(crate) fn new(document: &'a SchemaDocument) -> Self {
    Self {
      document,
      resolver: SchemaResolver::new(document),
      named: IndexMap::new(),
      deferred: DeferredTypeQueue::default(),
      enums: EnumRegistry::default(),
      conversions: vec![],
      types: vec![],
      warnings: vec![],
      field_cache: HashMap::new(),
      merge_stack: vec![],
    }
  }

  /// Registers `name` for `node` and queues its declaration.
  ///
  /// Registering the same name again for an identical node returns the
  /// existing name without queueing twice. A different node under a taken
  /// name is a fatal [`GenerationError::NameCollision`].
  pub(crate) fn register_named(
    &mut self,
    name: TypeToken,
    node: &'a Value,
    origin: impl Into<String>,
  ) -> GenerationResult<TypeToken> {
    let origin = origin.into();

    if let Some(existing) = self.named.get(&name) {
      if std::ptr::eq(existing.node, node) || existing.node == node {
        return Ok(name);
      }
      return Err(GenerationError::NameCollision {
        name: name.to_string(),
        first: existing.origin.clone(),
        second: origin,
      });
    }

    self.named.insert(name.clone(), NamedEntry { node, origin });
    self.deferred.push(name.clone(), node);
    Ok(name)
  }

  /// Claims `name` for a declaration that is not built from a schema, such as
  /// a response enum. Schemas registered under it later collide.
  pub(crate) fn reserve_name(&mut self, name: TypeToken, node: &'a Value, origin: impl Into<String>) -> GenerationResult<()> {
    let origin = origin.into();
    if let Some(existing) = self.named.get(&name) {
      return Err(GenerationError::NameCollision {
        name: name.to_string(),
        first: existing.origin.clone(),
        second: origin,
      });
    }
    self.named.insert(name, NamedEntry { node, origin });
    Ok(())
  }

  pub(crate) fn named_node(&self, name: &TypeToken) -> Option<&'a Value> {
    self.named.get(name).map(|entry| entry.node)
  }

  pub(crate) fn cached_fields(&self, name: &TypeToken) -> Option<&Vec<FieldDef>> {
    self.field_cache.get(name)
  }

  pub(crate) fn cache_fields(&mut self, name: TypeToken, fields: Vec<FieldDef>) {
    self.field_cache.insert(name, fields);
  }

  /// Marks `name` as being merged. Fails when an `allOf` chain leads back to itself.
  pub(crate) fn enter_merge(&mut self, name: &TypeToken) -> GenerationResult<()> {
    if self.merge_stack.contains(name) {
      let chain = self
        .merge_stack
        .iter()
        .chain(std::iter::once(name))
        .map(TypeToken::as_str)
        .join(" -> ");
      return Err(GenerationError::RecursiveSchema { pointer: chain });
    }
    self.merge_stack.push(name.clone());
    Ok(())
  }

  pub(crate) fn leave_merge(&mut self) {
    self.merge_stack.pop();
  }

  pub(crate) fn warn(&mut self, message: impl Into<String>) {
    self.warnings.push(message.into());
  }
}
