use serde_json::Value;

use crate::generator::{
  ast::{RustPrimitive, TypeRef, TypeToken},
  context::GenerationContext,
  errors::{GenerationError, GenerationResult},
  resolver::component_name,
  schema::{PrimitiveKind, SchemaNode, nullable_arm},
};

/// Maps a schema node to the type a field, parameter or payload holding it should have.
///
/// References to `#/components/schemas/*` stay named and are not followed.
/// Composite inline nodes register a named type under `suggested`, and their
/// declaration is built later when the deferred queue drains.
pub(crate) fn resolve_type<'a>(
  ctx: &mut GenerationContext<'a>,
  node: &'a Value,
  suggested: &TypeToken,
) -> GenerationResult<TypeRef> {
  let context = suggested.as_str();

  match SchemaNode::classify(node, context)? {
    SchemaNode::Reference(pointer) => {
      if let Some(name) = component_name(pointer) {
        ctx.resolver.resolve(pointer)?;
        return Ok(TypeRef::named(TypeToken::from_raw(&name)));
      }
      // Surfaces pointer loops before following a single hop.
      ctx.resolver.dereference(node)?;
      let target = ctx.resolver.resolve(pointer)?;
      resolve_type(ctx, target, suggested)
    }
    SchemaNode::Primitive { kind, format } => primitive_type(kind, format, context),
    SchemaNode::Array(items) => {
      let item_name = TypeToken::new(&format!("{suggested}Item"));
      Ok(TypeRef::vec(resolve_type(ctx, items, &item_name)?))
    }
    SchemaNode::OneOf(arms) => match nullable_arm(&arms) {
      Some(arm) => Ok(resolve_type(ctx, arm, suggested)?.optional()),
      None => register_inline(ctx, node, suggested),
    },
    SchemaNode::Object { .. } | SchemaNode::AllOf(_) | SchemaNode::StringEnum { .. } => {
      register_inline(ctx, node, suggested)
    }
  }
}

fn register_inline<'a>(
  ctx: &mut GenerationContext<'a>,
  node: &'a Value,
  suggested: &TypeToken,
) -> GenerationResult<TypeRef> {
  let token = ctx.register_named(suggested.clone(), node, suggested.as_str())?;
  Ok(TypeRef::named(token))
}

fn primitive_type(kind: PrimitiveKind, format: Option<&str>, context: &str) -> GenerationResult<TypeRef> {
  let primitive = match kind {
    PrimitiveKind::String => RustPrimitive::String,
    PrimitiveKind::Number => RustPrimitive::F64,
    PrimitiveKind::Boolean => RustPrimitive::Bool,
    PrimitiveKind::Integer => {
      RustPrimitive::from_integer_format(format).ok_or_else(|| GenerationError::UnsupportedFormat {
        context: context.to_string(),
        format: format.unwrap_or_default().to_string(),
      })?
    }
    PrimitiveKind::Null => {
      return Err(GenerationError::unsupported(
        context,
        "`null` is only supported as one arm of a two-armed oneOf",
      ));
    }
  };
  Ok(TypeRef::Primitive(primitive))
}
