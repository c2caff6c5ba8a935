use std::collections::BTreeSet;

use super::{
  requests::{bind_body, bind_parameters},
  responses::build_response,
  routes::RouteTableBuilder,
};
use crate::generator::{
  ast::{Documentation, FieldToken, OperationDef, ParsedPath, ResponseEnumDef, RouteTableDef},
  context::GenerationContext,
  document::OperationRef,
  errors::GenerationResult,
  naming::identifiers::ensure_unique,
};

/// Turns every operation of the document into an [`OperationDef`] plus its
/// response enum, registering routes as it goes.
#[derive(Debug)]
pub(crate) struct OperationConverter {
  routes: RouteTableBuilder,
  used_names: BTreeSet<String>,
}

impl OperationConverter {
  pub(crate) fn new(base_path: impl Into<String>) -> Self {
    Self {
      routes: RouteTableBuilder::new(base_path),
      used_names: BTreeSet::new(),
    }
  }

  pub(crate) fn convert<'a>(
    &mut self,
    ctx: &mut GenerationContext<'a>,
    operation: &OperationRef<'a>,
  ) -> GenerationResult<(OperationDef, ResponseEnumDef)> {
    let context = format!("{} {}", operation.method, operation.path);
    let path = ParsedPath::parse(operation.path)?;

    let operation_id = operation.operation_id();

    let bare = ensure_unique(FieldToken::from_raw(&operation_id).bare(), &self.used_names);
    self.used_names.insert(bare.clone());

    let slot = self.routes.add(&operation.method, &path)?;
    let parameters = bind_parameters(ctx, &bare, operation, &path)?;
    let body = bind_body(ctx, &bare, operation, &parameters)?;
    let response = build_response(ctx, &bare, &context, operation.operation)?;

    let def = OperationDef::builder()
      .name(FieldToken::from_raw(&bare))
      .operation_id(operation_id)
      .method(operation.method.clone())
      .path(operation.path)
      .docs(Documentation::from_node(operation.operation))
      .parameters(parameters)
      .maybe_body(body)
      .response(response.name.clone())
      .path_enum(slot.path_enum)
      .path_variant(slot.variant)
      .build();

    Ok((def, response))
  }

  pub(crate) fn finish(self) -> Vec<RouteTableDef> {
    self.routes.finish()
  }
}
