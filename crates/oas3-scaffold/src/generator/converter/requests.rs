use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

use super::type_resolver::resolve_type;
use crate::generator::{
  ast::{
    ContentKind, Documentation, FieldToken, ParameterDef, ParameterLocation, ParameterStyle, ParsedPath,
    RequestBodyDef, RequestBodyKind, RustPrimitive, TypeRef, TypeToken,
  },
  context::GenerationContext,
  document::OperationRef,
  errors::{GenerationError, GenerationResult},
  naming::identifiers::{ensure_unique, to_pascal_case},
  schema::{PrimitiveKind, SchemaNode},
};

/// A parameter object after `$ref` resolution, keyed by `(in, name)`.
struct RawParameter<'a> {
  name: &'a str,
  location: &'a str,
  node: &'a Value,
}

/// Binds the path and query parameters of one operation, in declaration order.
///
/// Path-item parameters come first; an operation parameter with the same
/// `(in, name)` replaces the inherited one. Header and cookie parameters are
/// skipped with a warning, and template placeholders nobody declared are bound
/// as required strings.
pub(crate) fn bind_parameters<'a>(
  ctx: &mut GenerationContext<'a>,
  operation_name: &str,
  operation: &OperationRef<'a>,
  path: &ParsedPath,
) -> GenerationResult<Vec<ParameterDef>> {
  let context = format!("{} {}", operation.method, operation.path);

  let mut merged = IndexMap::<(&str, &str), RawParameter<'a>>::new();
  for source in [operation.path_item, operation.operation] {
    for raw in parameter_list(source, &context)? {
      let parameter = raw_parameter(ctx, raw, &context)?;
      merged.insert((parameter.location, parameter.name), parameter);
    }
  }

  let mut used = BTreeSet::new();
  let mut bound = vec![];
  let mut declared_path = BTreeSet::new();

  for parameter in merged.into_values() {
    let location = match parameter.location {
      "path" => ParameterLocation::Path,
      "query" => ParameterLocation::Query,
      "header" | "cookie" => {
        ctx.warn(format!(
          "{context}: {} parameter `{}` is not bound",
          parameter.location, parameter.name
        ));
        continue;
      }
      other => {
        return Err(GenerationError::unsupported(
          &context,
          format!("parameter location `{other}` is not supported"),
        ));
      }
    };

    if location == ParameterLocation::Path && !path.params().any(|name| name == parameter.name) {
      ctx.warn(format!(
        "{context}: path parameter `{}` does not appear in the template",
        parameter.name
      ));
      continue;
    }
    if location == ParameterLocation::Path {
      declared_path.insert(parameter.name);
    }

    bound.push(bind_parameter(ctx, operation_name, &context, &parameter, location, &mut used)?);
  }

  for placeholder in path.params() {
    if declared_path.contains(placeholder) {
      continue;
    }
    ctx.warn(format!("{context}: placeholder `{{{placeholder}}}` is undeclared, binding it as a string"));
    bound.push(
      ParameterDef::builder()
        .name(unique_argument(placeholder, &mut used))
        .original_name(placeholder)
        .location(ParameterLocation::Path)
        .required(true)
        .ty(TypeRef::Primitive(RustPrimitive::String))
        .style(ParameterStyle::Single)
        .build(),
    );
  }

  Ok(bound)
}

fn parameter_list<'a>(owner: &'a Value, context: &str) -> GenerationResult<&'a [Value]> {
  match owner.get("parameters") {
    None => Ok(&[]),
    Some(Value::Array(items)) => Ok(items),
    Some(_) => Err(GenerationError::unsupported(context, "`parameters` must be a list")),
  }
}

fn raw_parameter<'a>(
  ctx: &GenerationContext<'a>,
  raw: &'a Value,
  context: &str,
) -> GenerationResult<RawParameter<'a>> {
  let node = ctx.resolver.dereference(raw)?;
  let name = node.get("name").and_then(Value::as_str);
  let location = node.get("in").and_then(Value::as_str);
  match (name, location) {
    (Some(name), Some(location)) => Ok(RawParameter { name, location, node }),
    _ => Err(GenerationError::unsupported(
      context,
      "parameters must declare `name` and `in`",
    )),
  }
}

fn bind_parameter<'a>(
  ctx: &mut GenerationContext<'a>,
  operation_name: &str,
  context: &str,
  parameter: &RawParameter<'a>,
  location: ParameterLocation,
  used: &mut BTreeSet<String>,
) -> GenerationResult<ParameterDef> {
  let context = format!("{context} parameter `{}`", parameter.name);

  let ty = match parameter.node.get("schema") {
    Some(schema) => {
      let suggested = TypeToken::from_fragments(&[operation_name, to_pascal_case(&[parameter.name]).as_str()]);
      resolve_type(ctx, schema, &suggested)?
    }
    None => {
      ctx.warn(format!("{context}: no schema, binding it as a string"));
      TypeRef::Primitive(RustPrimitive::String)
    }
  };

  let (style, element) = match ty.without_option() {
    TypeRef::Vec(item) => {
      if location == ParameterLocation::Path {
        return Err(GenerationError::unsupported(context, "array path parameters are not supported"));
      }
      (array_style(parameter.node, &context)?, item.without_option().clone())
    }
    other => (ParameterStyle::Single, other.clone()),
  };

  if !is_bindable(ctx, &element)? {
    return Err(GenerationError::unsupported(
      context,
      format!("parameter type `{element}` cannot be parsed from text"),
    ));
  }

  let required = location == ParameterLocation::Path
    || parameter.node.get("required").and_then(Value::as_bool).unwrap_or(false);

  Ok(
    ParameterDef::builder()
      .name(unique_argument(parameter.name, used))
      .original_name(parameter.name)
      .location(location)
      .required(required)
      .ty(element)
      .style(style)
      .docs(Documentation::from_node(parameter.node))
      .build(),
  )
}

/// `form` arrays explode by default into repeated keys; `explode: false` joins with commas.
fn array_style(node: &Value, context: &str) -> GenerationResult<ParameterStyle> {
  let style = node.get("style").and_then(Value::as_str).unwrap_or("form");
  let explode = node.get("explode").and_then(Value::as_bool).unwrap_or(style == "form");
  match (style, explode) {
    ("form", true) => Ok(ParameterStyle::Repeated),
    ("form", false) => Ok(ParameterStyle::Delimited),
    (other, _) => Err(GenerationError::unsupported(
      context,
      format!("array parameter style `{other}` is not supported"),
    )),
  }
}

/// Scalars and string enums implement `FromStr`; nothing else can be bound from text.
fn is_bindable(ctx: &GenerationContext<'_>, ty: &TypeRef) -> GenerationResult<bool> {
  match ty {
    TypeRef::Primitive(_) => Ok(ty.is_scalar()),
    TypeRef::Named(name) => {
      let Some(node) = ctx.named_node(name) else {
        return Ok(false);
      };
      let node = ctx.resolver.dereference(node)?;
      Ok(matches!(
        SchemaNode::classify(node, name.as_str())?,
        SchemaNode::StringEnum { .. }
          | SchemaNode::Primitive {
            kind: PrimitiveKind::String | PrimitiveKind::Integer | PrimitiveKind::Number | PrimitiveKind::Boolean,
            ..
          }
      ))
    }
    TypeRef::Vec(_) | TypeRef::Option(_) | TypeRef::Boxed(_) => Ok(false),
  }
}

fn unique_argument(raw: &str, used: &mut BTreeSet<String>) -> FieldToken {
  let unique = ensure_unique(FieldToken::from_raw(raw).bare(), used);
  used.insert(unique.clone());
  FieldToken::from_raw(&unique)
}

/// Binds the request body. JSON media types deserialize into the resolved
/// schema type; any other content is handed over as a raw body.
pub(crate) fn bind_body<'a>(
  ctx: &mut GenerationContext<'a>,
  operation_name: &str,
  operation: &OperationRef<'a>,
  parameters: &[ParameterDef],
) -> GenerationResult<Option<RequestBodyDef>> {
  let Some(raw) = operation.operation.get("requestBody") else {
    return Ok(None);
  };
  let node = ctx.resolver.dereference(raw)?;
  let Some(content) = node.get("content").and_then(Value::as_object).filter(|c| !c.is_empty()) else {
    ctx.warn(format!(
      "{} {}: request body declares no content and is ignored",
      operation.method, operation.path
    ));
    return Ok(None);
  };

  let required = node.get("required").and_then(Value::as_bool).unwrap_or(false);
  let json_schema = content
    .iter()
    .filter(|(content_type, _)| ContentKind::from_content_type(content_type) == ContentKind::Json)
    .find_map(|(_, media)| media.get("schema"));

  let kind = match json_schema {
    Some(schema) => {
      let ty = resolve_type(ctx, schema, &TypeToken::from_fragments(&[operation_name, "Body"]))?;
      RequestBodyKind::Json { ty, required }
    }
    None => RequestBodyKind::Raw,
  };

  let mut used = parameters
    .iter()
    .map(|parameter| parameter.name.bare().to_string())
    .collect::<BTreeSet<_>>();

  Ok(Some(RequestBodyDef {
    name: unique_argument("body", &mut used),
    kind,
  }))
}
