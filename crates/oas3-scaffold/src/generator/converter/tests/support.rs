use serde_json::Value;

use crate::generator::{
  ast::{AliasDef, EnumDef, OperationDef, ResponseEnumDef, RustType, StructDef, UnionDef},
  converter::{ConversionOutput, convert_document},
  document::SchemaDocument,
  errors::GenerationError,
};

pub(super) fn convert(document: Value) -> ConversionOutput {
  let document = SchemaDocument::from_value(document).expect("document should load");
  convert_document(&document, &document.base_path()).expect("conversion should succeed")
}

pub(super) fn convert_err(document: Value) -> GenerationError {
  let document = SchemaDocument::from_value(document).expect("document should load");
  convert_document(&document, &document.base_path()).expect_err("conversion should fail")
}

pub(super) fn find_struct<'o>(output: &'o ConversionOutput, name: &str) -> &'o StructDef {
  output
    .types
    .iter()
    .find_map(|rust_type| match rust_type {
      RustType::Struct(def) if def.name.as_str() == name => Some(def),
      _ => None,
    })
    .unwrap_or_else(|| panic!("struct `{name}` not generated"))
}

pub(super) fn find_enum<'o>(output: &'o ConversionOutput, name: &str) -> &'o EnumDef {
  output
    .types
    .iter()
    .find_map(|rust_type| match rust_type {
      RustType::Enum(def) if def.name.as_str() == name => Some(def),
      _ => None,
    })
    .unwrap_or_else(|| panic!("enum `{name}` not generated"))
}

pub(super) fn find_union<'o>(output: &'o ConversionOutput, name: &str) -> &'o UnionDef {
  output
    .types
    .iter()
    .find_map(|rust_type| match rust_type {
      RustType::Union(def) if def.name.as_str() == name => Some(def),
      _ => None,
    })
    .unwrap_or_else(|| panic!("union `{name}` not generated"))
}

pub(super) fn find_alias<'o>(output: &'o ConversionOutput, name: &str) -> &'o AliasDef {
  output
    .types
    .iter()
    .find_map(|rust_type| match rust_type {
      RustType::Alias(def) if def.name.as_str() == name => Some(def),
      _ => None,
    })
    .unwrap_or_else(|| panic!("alias `{name}` not generated"))
}

pub(super) fn find_response<'o>(output: &'o ConversionOutput, name: &str) -> &'o ResponseEnumDef {
  output
    .types
    .iter()
    .find_map(|rust_type| match rust_type {
      RustType::Response(def) if def.name.as_str() == name => Some(def),
      _ => None,
    })
    .unwrap_or_else(|| panic!("response enum `{name}` not generated"))
}

pub(super) fn find_operation<'o>(output: &'o ConversionOutput, name: &str) -> &'o OperationDef {
  output
    .operations
    .iter()
    .find(|operation| operation.name.as_str() == name)
    .unwrap_or_else(|| panic!("operation `{name}` not converted"))
}

/// `(field name, declared type)` pairs in declaration order.
pub(super) fn field_types(def: &StructDef) -> Vec<(String, String)> {
  def
    .fields
    .iter()
    .map(|field| (field.name.to_string(), field.field_type().to_string()))
    .collect()
}

pub(super) fn type_names(output: &ConversionOutput) -> Vec<&str> {
  output.types.iter().map(|rust_type| rust_type.type_name().as_str()).collect()
}
