use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde_json::Value;

use super::{
  structs::{object_fields, struct_fields, struct_fields_of_named},
  type_resolver::resolve_type,
};
use crate::generator::{
  ast::{ConversionDef, Documentation, FieldDef, FieldMapping, SharedField, TypeRef, TypeToken, UnionDef, UnionVariant},
  context::GenerationContext,
  errors::{GenerationError, GenerationResult},
  naming::identifiers::to_pascal_case,
  resolver::component_name,
  schema::SchemaNode,
};

/// Flattens every `allOf` fragment of `name` into one field list.
///
/// A property declared by several fragments keeps its first declaration and is
/// required when any fragment requires it.
pub(crate) fn merge_all_of<'a>(
  ctx: &mut GenerationContext<'a>,
  name: &TypeToken,
  parts: &[&'a Value],
) -> GenerationResult<Vec<FieldDef>> {
  let mut merged = IndexMap::<String, FieldDef>::new();
  for &part in parts {
    merge_fragment(ctx, name, part, &mut merged)?;
  }
  Ok(merged.into_values().collect())
}

fn merge_fragment<'a>(
  ctx: &mut GenerationContext<'a>,
  owner: &TypeToken,
  fragment: &'a Value,
  merged: &mut IndexMap<String, FieldDef>,
) -> GenerationResult<()> {
  if let Some((component, node)) = fragment_component(ctx, fragment, owner)? {
    let fields = struct_fields(ctx, &component, node)?;
    absorb(merged, fields);
    return Ok(());
  }

  let fragment = ctx.resolver.dereference(fragment)?;
  match SchemaNode::classify(fragment, owner.as_str())? {
    SchemaNode::Object { properties, required } => {
      let fields = object_fields(ctx, owner, &properties, &required)?;
      absorb(merged, fields);
    }
    SchemaNode::AllOf(nested) => {
      for part in nested {
        merge_fragment(ctx, owner, part, merged)?;
      }
    }
    _ => {
      return Err(GenerationError::unsupported(
        owner.as_str(),
        "allOf fragments must be objects or references to objects",
      ));
    }
  }
  Ok(())
}

fn absorb(merged: &mut IndexMap<String, FieldDef>, fields: Vec<FieldDef>) {
  for field in fields {
    match merged.get_mut(&field.json_name) {
      Some(existing) => existing.required |= field.required,
      None => {
        merged.insert(field.json_name.clone(), field);
      }
    }
  }
}

/// The component a fragment references, following component aliases to the
/// schema that actually declares properties.
fn fragment_component<'a>(
  ctx: &GenerationContext<'a>,
  fragment: &'a Value,
  owner: &TypeToken,
) -> GenerationResult<Option<(TypeToken, &'a Value)>> {
  ctx.resolver.dereference(fragment)?;

  let mut component = None;
  let mut current = fragment;
  while let SchemaNode::Reference(pointer) = SchemaNode::classify(current, owner.as_str())? {
    if let Some(name) = component_name(pointer) {
      component = Some(TypeToken::from_raw(&name));
    }
    current = ctx.resolver.resolve(pointer)?;
  }

  Ok(component.map(|name| (name, current)))
}

fn collect_sources<'a>(
  ctx: &GenerationContext<'a>,
  owner: &TypeToken,
  parts: &[&'a Value],
  sources: &mut Vec<(TypeToken, &'a Value)>,
) -> GenerationResult<()> {
  for &part in parts {
    if let Some((component, node)) = fragment_component(ctx, part, owner)? {
      if !sources.iter().any(|(existing, _)| *existing == component) {
        sources.push((component, node));
      }
      continue;
    }
    if let SchemaNode::AllOf(nested) = SchemaNode::classify(ctx.resolver.dereference(part)?, owner.as_str())? {
      collect_sources(ctx, owner, &nested, sources)?;
    }
  }
  Ok(())
}

/// Records one conversion per component referenced from the `allOf` of `name`.
///
/// A merged field is copied when the source declares the same property; every
/// other merged field becomes an extra the conversion has to supply.
pub(crate) fn record_conversions<'a>(
  ctx: &mut GenerationContext<'a>,
  name: &TypeToken,
  parts: &[&'a Value],
  fields: &[FieldDef],
) -> GenerationResult<()> {
  let mut sources = vec![];
  collect_sources(ctx, name, parts, &mut sources)?;

  for (source, node) in sources {
    if source == *name
      || ctx
        .conversions
        .iter()
        .any(|existing| existing.source == source && existing.target == *name)
    {
      continue;
    }

    let source_fields = struct_fields(ctx, &source, node)?;
    let (copied, extras) = split_fields(fields, &source_fields);
    ctx.conversions.push(ConversionDef {
      source,
      target: name.clone(),
      copied,
      extras,
    });
  }
  Ok(())
}

fn split_fields(target: &[FieldDef], source: &[FieldDef]) -> (Vec<FieldMapping>, Vec<FieldDef>) {
  let mut copied = vec![];
  let mut extras = vec![];
  for field in target {
    match source.iter().find(|candidate| candidate.json_name == field.json_name) {
      Some(from) => copied.push(FieldMapping {
        field: field.clone(),
        source: from.field_type(),
      }),
      None => extras.push(field.clone()),
    }
  }
  (copied, extras)
}

/// Whether a value of `source` can be turned into `target` structurally.
///
/// `known` holds the `(from, into)` pairs that have a `From` impl, which is
/// what a `.into()` between two named types relies on.
pub(crate) fn is_convertible(source: &TypeRef, target: &TypeRef, known: &HashSet<(TypeToken, TypeToken)>) -> bool {
  match (source, target) {
    _ if source == target => true,
    (TypeRef::Boxed(inner), _) => is_convertible(inner, target, known),
    (_, TypeRef::Boxed(inner)) => is_convertible(source, inner, known),
    (TypeRef::Option(from), TypeRef::Option(into)) => is_convertible(from, into, known),
    (TypeRef::Option(_), _) => false,
    (_, TypeRef::Option(into)) => is_convertible(source, into, known),
    (TypeRef::Vec(from), TypeRef::Vec(into)) => is_convertible(from, into, known),
    (TypeRef::Named(from), TypeRef::Named(into)) => known.contains(&(from.clone(), into.clone())),
    _ => false,
  }
}

/// Moves every copied field that has no structural conversion into the extras.
///
/// Demoting a field can turn a plain `From` into a constructor, which removes
/// a `known` pair, so this runs until nothing changes.
pub(crate) fn settle_conversions(conversions: &mut [ConversionDef], enum_pairs: &HashSet<(TypeToken, TypeToken)>) {
  loop {
    let mut known = enum_pairs.clone();
    known.extend(
      conversions
        .iter()
        .filter(|conversion| conversion.is_plain_from())
        .map(|conversion| (conversion.source.clone(), conversion.target.clone())),
    );

    let mut changed = false;
    for conversion in conversions.iter_mut() {
      let (keep, demote): (Vec<_>, Vec<_>) = std::mem::take(&mut conversion.copied)
        .into_iter()
        .partition(|mapping| is_convertible(&mapping.source, &mapping.field.field_type(), &known));
      changed |= !demote.is_empty();
      conversion.copied = keep;
      conversion.extras.extend(demote.into_iter().map(|mapping| mapping.field));
    }

    if !changed {
      return;
    }
  }
}

/// Builds the adjacently tagged union for a `oneOf` whose arms each carry a
/// constant discriminator and one payload property.
pub(crate) fn build_union<'a>(
  ctx: &mut GenerationContext<'a>,
  name: &TypeToken,
  node: &'a Value,
  arms: &[&'a Value],
) -> GenerationResult<UnionDef> {
  let mut layout: Option<(String, String)> = None;
  let mut tags = BTreeSet::new();
  let mut variant_names = BTreeSet::new();
  let mut variants = vec![];

  for (index, arm) in arms.iter().copied().enumerate() {
    let arm = ctx.resolver.dereference(arm)?;
    let SchemaNode::Object { properties, required } = SchemaNode::classify(arm, name.as_str())? else {
      return Err(GenerationError::malformed_union(
        name.as_str(),
        format!("arm {index} is not an object"),
      ));
    };
    if properties.len() != 2 || properties.iter().any(|(property, _)| !required.contains(property)) {
      return Err(GenerationError::malformed_union(
        name.as_str(),
        format!("arm {index} must declare exactly two required properties"),
      ));
    }

    let mut literals = vec![];
    for &(property, schema) in &properties {
      if let Some(literal) = single_literal(ctx, schema, name)? {
        literals.push((property, literal));
      }
    }

    let (discriminator, tag) = match (literals.as_slice(), &layout) {
      ([(property, tag)], _) => (*property, tag.clone()),
      ([_, _], Some((expected, _))) => literals
        .iter()
        .find(|(property, _)| *property == expected.as_str())
        .map(|(property, tag)| (*property, tag.clone()))
        .ok_or_else(|| GenerationError::malformed_union(name.as_str(), format!("arm {index} has no `{expected}`")))?,
      ([], _) => {
        return Err(GenerationError::malformed_union(
          name.as_str(),
          format!("arm {index} has no constant discriminator property"),
        ));
      }
      _ => {
        return Err(GenerationError::malformed_union(
          name.as_str(),
          format!("arm {index} has an ambiguous discriminator"),
        ));
      }
    };

    let Some(&(payload_field, payload_schema)) = properties.iter().find(|(property, _)| *property != discriminator)
    else {
      return Err(GenerationError::malformed_union(
        name.as_str(),
        format!("arm {index} has no payload property"),
      ));
    };

    match &layout {
      None => layout = Some((discriminator.to_string(), payload_field.to_string())),
      Some((expected_tag, expected_payload)) if expected_tag == discriminator && expected_payload == payload_field => {}
      Some((expected_tag, expected_payload)) => {
        return Err(GenerationError::malformed_union(
          name.as_str(),
          format!(
            "arm {index} uses `{discriminator}`/`{payload_field}` but earlier arms use `{expected_tag}`/`{expected_payload}`"
          ),
        ));
      }
    }

    if !tags.insert(tag.clone()) {
      return Err(GenerationError::malformed_union(
        name.as_str(),
        format!("discriminator value `{tag}` is used by more than one arm"),
      ));
    }

    let suggested = TypeToken::from_fragments(&[name.as_str(), to_pascal_case(&[tag.as_str()]).as_str()]);
    let payload = resolve_type(ctx, payload_schema, &suggested)?;
    let variant = payload.variant_name();
    if !variant_names.insert(variant.clone()) {
      return Err(GenerationError::malformed_union(
        name.as_str(),
        format!("two arms resolve to the variant `{variant}`"),
      ));
    }

    variants.push(UnionVariant {
      name: variant,
      tag,
      payload,
    });
  }

  let Some((discriminator, payload_field)) = layout else {
    return Err(GenerationError::malformed_union(name.as_str(), "no arms"));
  };
  let shared_fields = shared_fields(ctx, &variants)?;

  Ok(
    UnionDef::builder()
      .name(name.clone())
      .docs(Documentation::from_node(node))
      .discriminator(discriminator)
      .payload_field(payload_field)
      .variants(variants)
      .shared_fields(shared_fields)
      .build(),
  )
}

/// The literal of a single-member string enum or `const`, if `schema` is one.
fn single_literal<'a>(
  ctx: &GenerationContext<'a>,
  schema: &'a Value,
  union: &TypeToken,
) -> GenerationResult<Option<String>> {
  let schema = ctx.resolver.dereference(schema)?;
  Ok(match SchemaNode::classify(schema, union.as_str()) {
    Ok(SchemaNode::StringEnum { mut members, .. }) if members.len() == 1 => members.pop(),
    _ => None,
  })
}

/// Fields every payload struct declares with the same name, type and required-ness.
pub(crate) fn shared_fields(
  ctx: &mut GenerationContext<'_>,
  variants: &[UnionVariant],
) -> GenerationResult<Vec<SharedField>> {
  let mut payload_fields = vec![];
  for variant in variants {
    let TypeRef::Named(payload) = &variant.payload else {
      return Ok(vec![]);
    };
    let Some(fields) = struct_fields_of_named(ctx, payload)? else {
      return Ok(vec![]);
    };
    payload_fields.push(fields);
  }

  Ok(intersect_fields(&payload_fields))
}

pub(crate) fn intersect_fields(payload_fields: &[Vec<FieldDef>]) -> Vec<SharedField> {
  let Some((first, rest)) = payload_fields.split_first() else {
    return vec![];
  };

  first
    .iter()
    .filter(|field| {
      rest.iter().all(|others| {
        others.iter().any(|other| {
          other.json_name == field.json_name
            && other.name == field.name
            && other.ty == field.ty
            && other.required == field.required
        })
      })
    })
    .map(|field| SharedField {
      name: field.name.clone(),
      json_name: field.json_name.clone(),
      ty: field.field_type(),
    })
    .collect()
}
