use std::collections::HashMap;

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use super::composition::intersect_fields;
use crate::generator::ast::{ConversionDef, FieldDef, RustType, TypeRef, TypeToken};

/// Boxes struct fields that close a by-value cycle between named types.
///
/// Only edges that hold the target inline count: a `Vec` already puts its
/// items on the heap. Returns the number of fields that were boxed.
pub(crate) fn box_recursive_fields(types: &mut [RustType], conversions: &mut [ConversionDef]) -> usize {
  let components = cyclic_components(types);
  if components.is_empty() {
    return 0;
  }

  let mut boxed = 0;
  for rust_type in types.iter_mut() {
    let RustType::Struct(def) = rust_type else {
      continue;
    };
    let Some(own) = components.get(def.name.as_str()).copied() else {
      continue;
    };
    for field in &mut def.fields {
      if inline_target(&field.ty).is_some_and(|target| components.get(target.as_str()) == Some(&own)) {
        field.ty = box_named(field.ty.clone());
        boxed += 1;
      }
    }
  }

  if boxed > 0 {
    refresh_dependents(types, conversions);
  }
  boxed
}

/// Maps every type that sits on a cycle to the index of its strongly connected component.
fn cyclic_components(types: &[RustType]) -> HashMap<String, usize> {
  let mut graph = DiGraphMap::<&str, ()>::new();
  for rust_type in types {
    let from = rust_type.type_name().as_str();
    graph.add_node(from);
    for target in inline_edges(rust_type) {
      graph.add_edge(from, target.as_str(), ());
    }
  }

  kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
    .enumerate()
    .flat_map(|(index, scc)| scc.into_iter().map(move |name| (name.to_string(), index)))
    .collect()
}

fn inline_edges(rust_type: &RustType) -> Vec<&TypeToken> {
  match rust_type {
    RustType::Struct(def) => def.fields.iter().filter_map(|field| inline_target(&field.ty)).collect(),
    RustType::Union(def) => def
      .variants
      .iter()
      .filter_map(|variant| inline_target(&variant.payload))
      .collect(),
    RustType::Alias(def) => inline_target(&def.target).into_iter().collect(),
    RustType::Enum(_) | RustType::Response(_) => vec![],
  }
}

/// The named type stored inline by a value of `ty`.
fn inline_target(ty: &TypeRef) -> Option<&TypeToken> {
  match ty {
    TypeRef::Named(token) => Some(token),
    TypeRef::Option(inner) => inline_target(inner),
    TypeRef::Primitive(_) | TypeRef::Vec(_) | TypeRef::Boxed(_) => None,
  }
}

fn box_named(ty: TypeRef) -> TypeRef {
  match ty {
    TypeRef::Option(inner) => box_named(*inner).optional(),
    named @ TypeRef::Named(_) => named.boxed(),
    other => other,
  }
}

/// Brings conversions and union accessors in line with the boxed field types.
fn refresh_dependents(types: &mut [RustType], conversions: &mut [ConversionDef]) {
  let structs = types
    .iter()
    .filter_map(|rust_type| match rust_type {
      RustType::Struct(def) => Some((def.name.clone(), def.fields.clone())),
      _ => None,
    })
    .collect::<HashMap<TypeToken, Vec<FieldDef>>>();

  let current = |owner: &TypeToken, field: &FieldDef| {
    structs
      .get(owner)
      .and_then(|fields| fields.iter().find(|candidate| candidate.json_name == field.json_name))
      .cloned()
  };

  for conversion in conversions.iter_mut() {
    for mapping in &mut conversion.copied {
      if let Some(field) = current(&conversion.target, &mapping.field) {
        mapping.field = field;
      }
      if let Some(source) = current(&conversion.source, &mapping.field) {
        mapping.source = source.field_type();
      }
    }
    for extra in &mut conversion.extras {
      if let Some(field) = current(&conversion.target, extra) {
        *extra = field;
      }
    }
  }

  for rust_type in types.iter_mut() {
    let RustType::Union(def) = rust_type else {
      continue;
    };
    if def.shared_fields.is_empty() {
      continue;
    }
    let payload_fields = def
      .variants
      .iter()
      .map(|variant| match &variant.payload {
        TypeRef::Named(payload) => structs.get(payload).cloned(),
        _ => None,
      })
      .collect::<Option<Vec<_>>>();
    if let Some(payload_fields) = payload_fields {
      def.shared_fields = intersect_fields(&payload_fields);
    }
  }
}
