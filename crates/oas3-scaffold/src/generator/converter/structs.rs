use std::collections::BTreeSet;

use serde_json::Value;

use super::{composition, type_resolver::resolve_type};
use crate::generator::{
  ast::{Documentation, FieldDef, FieldToken, StructDef, TypeToken},
  context::GenerationContext,
  errors::{GenerationError, GenerationResult},
  naming::identifiers::{ensure_unique, to_pascal_case},
  schema::SchemaNode,
};

/// Builds the struct declaration for an object or `allOf` node and records
/// the conversions its referenced `allOf` fragments imply.
pub(crate) fn build_struct<'a>(
  ctx: &mut GenerationContext<'a>,
  name: &TypeToken,
  node: &'a Value,
) -> GenerationResult<StructDef> {
  let fields = struct_fields(ctx, name, node)?;

  if let SchemaNode::AllOf(parts) = SchemaNode::classify(node, name.as_str())? {
    composition::record_conversions(ctx, name, &parts, &fields)?;
  }

  Ok(
    StructDef::builder()
      .name(name.clone())
      .docs(Documentation::from_node(node))
      .fields(fields)
      .build(),
  )
}

/// Fields of the named struct declared by `node`, computed once per name.
pub(crate) fn struct_fields<'a>(
  ctx: &mut GenerationContext<'a>,
  name: &TypeToken,
  node: &'a Value,
) -> GenerationResult<Vec<FieldDef>> {
  if let Some(fields) = ctx.cached_fields(name) {
    return Ok(fields.clone());
  }

  let fields = match SchemaNode::classify(node, name.as_str())? {
    SchemaNode::Object { properties, required } => object_fields(ctx, name, &properties, &required)?,
    SchemaNode::AllOf(parts) => {
      ctx.enter_merge(name)?;
      let merged = composition::merge_all_of(ctx, name, &parts);
      ctx.leave_merge();
      merged?
    }
    _ => {
      return Err(GenerationError::unsupported(
        name.as_str(),
        "expected an object or allOf schema",
      ));
    }
  };

  let fields = dedupe_field_names(fields);
  ctx.cache_fields(name.clone(), fields.clone());
  Ok(fields)
}

/// Fields of a payload or fragment type, when that type is a struct.
pub(crate) fn struct_fields_of_named(
  ctx: &mut GenerationContext<'_>,
  name: &TypeToken,
) -> GenerationResult<Option<Vec<FieldDef>>> {
  let Some(node) = ctx.named_node(name) else {
    return Ok(None);
  };
  match SchemaNode::classify(node, name.as_str())? {
    SchemaNode::Object { .. } | SchemaNode::AllOf(_) => struct_fields(ctx, name, node).map(Some),
    _ => Ok(None),
  }
}

/// One field per property, in declaration order. Properties resolve under
/// `owner`, so an inline property `owner` of `Pet` becomes `PetOwner`.
pub(crate) fn object_fields<'a>(
  ctx: &mut GenerationContext<'a>,
  owner: &TypeToken,
  properties: &[(&'a str, &'a Value)],
  required: &BTreeSet<&str>,
) -> GenerationResult<Vec<FieldDef>> {
  properties
    .iter()
    .map(|&(json_name, schema)| {
      let suggested = TypeToken::from_fragments(&[owner.as_str(), to_pascal_case(&[json_name]).as_str()]);
      let ty = resolve_type(ctx, schema, &suggested)?;
      Ok(
        FieldDef::builder()
          .name(FieldToken::from_raw(json_name))
          .json_name(json_name)
          .ty(ty)
          .required(required.contains(json_name))
          .docs(Documentation::from_node(schema))
          .build(),
      )
    })
    .collect()
}

/// `foo-bar` and `foo_bar` both map to `foo_bar`; later ones get a numeric suffix.
fn dedupe_field_names(fields: Vec<FieldDef>) -> Vec<FieldDef> {
  let mut used = BTreeSet::new();
  fields
    .into_iter()
    .map(|mut field| {
      let bare = field.name.bare().to_string();
      if used.contains(&bare) {
        field.name = FieldToken::from_raw(&ensure_unique(&bare, &used));
      }
      used.insert(field.name.bare().to_string());
      field
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::ast::{RustPrimitive, TypeRef};

  fn field(name: &str) -> FieldDef {
    FieldDef::builder()
      .name(FieldToken::from_raw(name))
      .json_name(name)
      .ty(TypeRef::Primitive(RustPrimitive::String))
      .required(true)
      .build()
  }

  #[test]
  fn test_colliding_field_names_get_suffixes() {
    let fields = dedupe_field_names(vec![field("foo-bar"), field("foo_bar"), field("fooBar")]);
    let names = fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["foo_bar", "foo_bar2", "foo_bar3"]);
    assert!(fields.iter().all(FieldDef::needs_rename));
  }
}
