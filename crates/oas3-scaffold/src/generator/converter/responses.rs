use serde_json::Value;

use super::type_resolver::resolve_type;
use crate::generator::{
  ast::{ContentKind, Documentation, ResponseEnumDef, ResponsePayload, ResponseVariant, TypeToken},
  context::GenerationContext,
  errors::{GenerationError, GenerationResult},
  naming::identifiers::to_pascal_case,
};

/// Builds `<Op>Response` with one variant per declared status, in document order.
pub(crate) fn build_response<'a>(
  ctx: &mut GenerationContext<'a>,
  operation_name: &str,
  context: &str,
  operation: &'a Value,
) -> GenerationResult<ResponseEnumDef> {
  let name = TypeToken::from_fragments(&[operation_name, "Response"]);
  ctx.reserve_name(name.clone(), operation, context)?;

  let Some(responses) = operation
    .get("responses")
    .and_then(Value::as_object)
    .filter(|responses| !responses.is_empty())
  else {
    return Err(GenerationError::unsupported(context, "operation declares no responses"));
  };

  let mut variants = vec![];
  for (key, response) in responses {
    let status = parse_status(key, context)?;
    let variant_name = match status {
      Some(code) => TypeToken::new(&format!("Http{code}")),
      None => TypeToken::new("Default"),
    };

    let response = ctx.resolver.dereference(response)?;
    let payload = response_payload(ctx, operation_name, key, response)?;

    variants.push(ResponseVariant {
      name: variant_name,
      status,
      docs: Documentation::from_node(response),
      payload,
    });
  }

  Ok(ResponseEnumDef {
    name,
    docs: Documentation::from_lines([format!("Responses of `{context}`.")]),
    variants,
  })
}

/// `default` maps to `None`; anything else must be a status code in 100..=599.
fn parse_status(key: &str, context: &str) -> GenerationResult<Option<u16>> {
  if key == "default" {
    return Ok(None);
  }
  match key.parse::<u16>() {
    Ok(code @ 100..=599) => Ok(Some(code)),
    _ => Err(GenerationError::unsupported(
      context,
      format!("response key `{key}` must be `default` or a status code between 100 and 599"),
    )),
  }
}

fn response_payload<'a>(
  ctx: &mut GenerationContext<'a>,
  operation_name: &str,
  key: &str,
  response: &'a Value,
) -> GenerationResult<Option<ResponsePayload>> {
  let Some(content) = response
    .get("content")
    .and_then(Value::as_object)
    .filter(|content| !content.is_empty())
  else {
    return Ok(None);
  };

  let json_schema = content
    .iter()
    .filter(|(content_type, _)| ContentKind::from_content_type(content_type) == ContentKind::Json)
    .find_map(|(_, media)| media.get("schema"));

  match json_schema {
    Some(schema) => {
      let suggested = TypeToken::from_fragments(&[operation_name, to_pascal_case(&[key]).as_str(), "Body"]);
      Ok(Some(ResponsePayload::Json(resolve_type(ctx, schema, &suggested)?)))
    }
    None => Ok(Some(ResponsePayload::Bytes)),
  }
}
