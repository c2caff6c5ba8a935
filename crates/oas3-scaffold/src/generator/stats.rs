use crate::generator::{
  ast::{OperationDef, RustType},
  converter::ConversionOutput,
};

/// Counts reported after a run. `--verbose` prints them per kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub types_generated: usize,
  pub structs_generated: usize,
  pub enums_generated: usize,
  pub unions_generated: usize,
  pub type_aliases_generated: usize,
  pub response_enums_generated: usize,
  pub enum_conversions_generated: usize,
  pub conversions_generated: usize,
  pub operations_converted: usize,
  pub routes_generated: usize,
  pub boxed_fields: usize,
  pub warnings: Vec<String>,
}

impl GenerationStats {
  pub(crate) fn from_output(output: &ConversionOutput) -> Self {
    let mut stats = Self::default();
    stats.record_rust_types(&output.types);
    stats.record_operations(&output.operations);
    stats.enum_conversions_generated = output.enum_conversions.len();
    stats.conversions_generated = output.conversions.len();
    stats.routes_generated = output.route_tables.iter().map(|table| table.routes.len()).sum();
    stats.boxed_fields = output.boxed_fields;
    stats.warnings.clone_from(&output.warnings);
    stats
  }

  pub(crate) fn record_rust_type(&mut self, rust_type: &RustType) {
    self.types_generated += 1;
    match rust_type {
      RustType::Struct(_) => self.structs_generated += 1,
      RustType::Enum(_) => self.enums_generated += 1,
      RustType::Union(_) => self.unions_generated += 1,
      RustType::Alias(_) => self.type_aliases_generated += 1,
      RustType::Response(_) => self.response_enums_generated += 1,
    }
  }

  pub(crate) fn record_rust_types(&mut self, types: &[RustType]) {
    for rust_type in types {
      self.record_rust_type(rust_type);
    }
  }

  pub(crate) fn record_operations(&mut self, operations: &[OperationDef]) {
    self.operations_converted += operations.len();
  }
}
