use std::collections::BTreeSet;

use serde_json::Value;

use super::errors::{GenerationError, GenerationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum PrimitiveKind {
  String,
  Integer,
  Number,
  Boolean,
  Null,
}

/// Closed view over a raw schema object. Every consumer matches on this
/// instead of poking at JSON keys.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SchemaNode<'a> {
  Primitive {
    kind: PrimitiveKind,
    format: Option<&'a str>,
  },
  Reference(&'a str),
  Array(&'a Value),
  Object {
    properties: Vec<(&'a str, &'a Value)>,
    required: BTreeSet<&'a str>,
  },
  AllOf(Vec<&'a Value>),
  OneOf(Vec<&'a Value>),
  StringEnum {
    members: Vec<String>,
    default: Option<String>,
  },
}

impl<'a> SchemaNode<'a> {
  /// Classifies `node`. `context` names the location for error messages.
  pub(crate) fn classify(node: &'a Value, context: &str) -> GenerationResult<Self> {
    let Some(object) = node.as_object() else {
      return Err(GenerationError::unsupported(context, "schema must be an object"));
    };

    if let Some(reference) = object.get("$ref") {
      return reference
        .as_str()
        .map(SchemaNode::Reference)
        .ok_or_else(|| GenerationError::unsupported(context, "`$ref` must be a string"));
    }

    if let Some(parts) = object.get("allOf") {
      return non_empty_list(parts, "allOf", context).map(SchemaNode::AllOf);
    }

    if let Some(arms) = object.get("oneOf") {
      return non_empty_list(arms, "oneOf", context).map(SchemaNode::OneOf);
    }

    for keyword in ["anyOf", "not"] {
      if object.contains_key(keyword) {
        return Err(GenerationError::unsupported(context, format!("`{keyword}` is not supported")));
      }
    }

    let schema_type = match object.get("type") {
      None => None,
      Some(Value::String(name)) => Some(name.as_str()),
      Some(_) => {
        return Err(GenerationError::unsupported(
          context,
          "`type` must be a single type name",
        ));
      }
    };

    if object.contains_key("enum") || object.contains_key("const") {
      return string_enum(object, schema_type, context);
    }

    let format = object.get("format").and_then(Value::as_str);
    match schema_type {
      Some("object") => Ok(object_node(object, context)?),
      None if object.contains_key("properties") => Ok(object_node(object, context)?),
      Some("array") => object
        .get("items")
        .map(SchemaNode::Array)
        .ok_or_else(|| GenerationError::unsupported(context, "array schema without `items`")),
      Some("string") => Ok(Self::primitive(PrimitiveKind::String, format)),
      Some("integer") => Ok(Self::primitive(PrimitiveKind::Integer, format)),
      Some("number") => Ok(Self::primitive(PrimitiveKind::Number, format)),
      Some("boolean") => Ok(Self::primitive(PrimitiveKind::Boolean, format)),
      Some("null") => Ok(Self::primitive(PrimitiveKind::Null, None)),
      Some(other) => Err(GenerationError::unsupported(context, format!("unknown type `{other}`"))),
      None => Err(GenerationError::unsupported(context, "schema declares no type")),
    }
  }

  const fn primitive(kind: PrimitiveKind, format: Option<&'a str>) -> Self {
    Self::Primitive { kind, format }
  }
}

/// Returns the non-null arm of a two-armed `oneOf` where exactly one arm is
/// `{"type": "null"}`.
pub(crate) fn nullable_arm<'a>(arms: &[&'a Value]) -> Option<&'a Value> {
  let [first, second] = arms else {
    return None;
  };
  match (is_null_schema(first), is_null_schema(second)) {
    (true, false) => Some(*second),
    (false, true) => Some(*first),
    _ => None,
  }
}

fn is_null_schema(node: &Value) -> bool {
  node.get("type").and_then(Value::as_str) == Some("null")
}

fn non_empty_list<'a>(value: &'a Value, keyword: &str, context: &str) -> GenerationResult<Vec<&'a Value>> {
  match value.as_array() {
    Some(items) if !items.is_empty() => Ok(items.iter().collect()),
    _ => Err(GenerationError::unsupported(
      context,
      format!("`{keyword}` must be a non-empty list"),
    )),
  }
}

fn object_node<'a>(
  object: &'a serde_json::Map<String, Value>,
  context: &str,
) -> GenerationResult<SchemaNode<'a>> {
  let properties = match object.get("properties") {
    None => vec![],
    Some(Value::Object(properties)) => properties.iter().map(|(name, schema)| (name.as_str(), schema)).collect(),
    Some(_) => return Err(GenerationError::unsupported(context, "`properties` must be an object")),
  };

  let required = match object.get("required") {
    None => BTreeSet::new(),
    Some(Value::Array(names)) => names
      .iter()
      .map(|name| {
        name
          .as_str()
          .ok_or_else(|| GenerationError::unsupported(context, "`required` must list property names"))
      })
      .collect::<GenerationResult<_>>()?,
    Some(_) => return Err(GenerationError::unsupported(context, "`required` must be a list")),
  };

  Ok(SchemaNode::Object { properties, required })
}

fn string_enum<'a>(
  object: &'a serde_json::Map<String, Value>,
  schema_type: Option<&str>,
  context: &str,
) -> GenerationResult<SchemaNode<'a>> {
  if schema_type.is_some_and(|kind| kind != "string") {
    return Err(GenerationError::unsupported(context, "only string enumerations are supported"));
  }

  let raw_members = match (object.get("enum"), object.get("const")) {
    (Some(Value::Array(values)), _) => values.iter().collect::<Vec<_>>(),
    (None, Some(value)) => vec![value],
    _ => return Err(GenerationError::unsupported(context, "`enum` must be a list")),
  };

  let mut members: Vec<String> = vec![];
  for value in raw_members {
    let Some(member) = value.as_str() else {
      return Err(GenerationError::unsupported(context, "only string enumerations are supported"));
    };
    if !members.iter().any(|existing| existing == member) {
      members.push(member.to_string());
    }
  }

  if members.is_empty() {
    return Err(GenerationError::unsupported(context, "enumeration has no members"));
  }

  let default = match object.get("default") {
    None => None,
    Some(Value::String(default)) if members.contains(default) => Some(default.clone()),
    Some(other) => {
      return Err(GenerationError::unsupported(
        context,
        format!("default {other} is not one of the enumeration members"),
      ));
    }
  };

  Ok(SchemaNode::StringEnum { members, default })
}
