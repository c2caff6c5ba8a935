//! Turns the document into the declaration tree `codegen` prints.
//!
//! Components are registered up front, operations are converted next, and
//! the deferred queue is drained until no pass discovers a new inline type.
//! The last step settles what only the finished tree can tell: enum sibling
//! conversions, boxing of recursive fields and which `allOf` fields convert.

mod composition;
mod cycles;
pub(crate) mod deferred;
pub(crate) mod enums;
mod operations;
mod requests;
mod responses;
mod routes;
mod structs;
mod type_resolver;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use deferred::DeferredType;
use operations::OperationConverter;

use super::{
  ast::{
    AliasDef, ConversionDef, Documentation, EnumConversionDef, OperationDef, RouteTableDef, RustType, TypeRef,
    TypeToken,
  },
  context::GenerationContext,
  document::SchemaDocument,
  errors::GenerationResult,
  resolver::SCHEMA_REF_PREFIX,
  schema::{SchemaNode, nullable_arm},
};

/// Everything one run produces before printing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConversionOutput {
  pub(crate) types: Vec<RustType>,
  pub(crate) enum_conversions: Vec<EnumConversionDef>,
  pub(crate) conversions: Vec<ConversionDef>,
  pub(crate) operations: Vec<OperationDef>,
  pub(crate) route_tables: Vec<RouteTableDef>,
  pub(crate) warnings: Vec<String>,
  pub(crate) boxed_fields: usize,
}

pub(crate) struct SchemaConverter<'a> {
  ctx: GenerationContext<'a>,
  operations: OperationConverter,
}

impl<'a> SchemaConverter<'a> {
  pub(crate) fn new(document: &'a SchemaDocument, base_path: impl Into<String>) -> Self {
    Self {
      ctx: GenerationContext::new(document),
      operations: OperationConverter::new(base_path),
    }
  }

  pub(crate) fn convert(mut self) -> GenerationResult<ConversionOutput> {
    let document = self.ctx.document;

    for (name, node) in document.component_schemas() {
      self
        .ctx
        .register_named(TypeToken::from_raw(name), node, format!("{SCHEMA_REF_PREFIX}{name}"))?;
    }

    let mut operations = vec![];
    let mut responses = vec![];
    for operation in document.operations() {
      let (def, response) = self.operations.convert(&mut self.ctx, &operation)?;
      operations.push(def);
      responses.push(RustType::Response(response));
    }

    self.drain()?;
    Ok(self.finish(operations, responses))
  }

  fn drain(&mut self) -> GenerationResult<()> {
    while !self.ctx.deferred.is_empty() {
      for item in self.ctx.deferred.take_pass() {
        let declaration = emit(&mut self.ctx, &item)?;
        self.ctx.types.push(declaration);
      }
    }
    Ok(())
  }

  fn finish(mut self, operations: Vec<OperationDef>, responses: Vec<RustType>) -> ConversionOutput {
    let enum_conversions = self.ctx.enums.conversions();
    let boxed_fields = cycles::box_recursive_fields(&mut self.ctx.types, &mut self.ctx.conversions);

    let enum_pairs = enum_conversions
      .iter()
      .map(|conversion| (conversion.source.clone(), conversion.target.clone()))
      .collect::<HashSet<_>>();
    composition::settle_conversions(&mut self.ctx.conversions, &enum_pairs);

    let mut types = std::mem::take(&mut self.ctx.types);
    types.extend(responses);

    ConversionOutput {
      types,
      enum_conversions,
      conversions: std::mem::take(&mut self.ctx.conversions),
      operations,
      route_tables: self.operations.finish(),
      warnings: std::mem::take(&mut self.ctx.warnings),
      boxed_fields,
    }
  }
}

/// Builds the declaration for one queued name.
fn emit<'a>(ctx: &mut GenerationContext<'a>, item: &DeferredType<'a>) -> GenerationResult<RustType> {
  let name = &item.name;
  let node = item.node;
  let docs = Documentation::from_node(node);

  match SchemaNode::classify(node, name.as_str())? {
    SchemaNode::Object { .. } | SchemaNode::AllOf(_) => Ok(RustType::Struct(structs::build_struct(ctx, name, node)?)),
    SchemaNode::StringEnum { members, default } => Ok(RustType::Enum(ctx.enums.register(
      name.clone(),
      docs,
      &members,
      default.as_deref(),
    ))),
    SchemaNode::OneOf(arms) => match nullable_arm(&arms) {
      Some(arm) => {
        let target = type_resolver::resolve_type(ctx, arm, &value_name(name))?.optional();
        Ok(alias(name, docs, target))
      }
      None => Ok(RustType::Union(composition::build_union(ctx, name, node, &arms)?)),
    },
    SchemaNode::Reference(_) => {
      ctx.resolver.dereference(node)?;
      let target = type_resolver::resolve_type(ctx, node, &value_name(name))?;
      Ok(alias(name, docs, target))
    }
    SchemaNode::Primitive { .. } => {
      let target = type_resolver::resolve_type(ctx, node, &value_name(name))?;
      Ok(alias(name, docs, target))
    }
    SchemaNode::Array(_) => {
      let target = type_resolver::resolve_type(ctx, node, name)?;
      Ok(alias(name, docs, target))
    }
  }
}

/// Name under which an alias resolves its target, so that an inline type it
/// registers never claims the alias's own name.
fn value_name(name: &TypeToken) -> TypeToken {
  TypeToken::new(&format!("{name}Value"))
}

fn alias(name: &TypeToken, docs: Documentation, target: TypeRef) -> RustType {
  RustType::Alias(AliasDef {
    name: name.clone(),
    docs,
    target,
  })
}

/// Convenience entry point used by the orchestrator and tests.
pub(crate) fn convert_document(document: &SchemaDocument, base_path: &str) -> GenerationResult<ConversionOutput> {
  SchemaConverter::new(document, base_path).convert()
}
