//! Runs the whole pipeline: document, declarations, files.
//!
//! Everything happens in memory; the caller decides when (and whether) the
//! returned files reach the disk.

use serde_json::Value;

use crate::generator::{
  codegen::{self, CrateMetadata, GeneratedCode, Visibility},
  converter::convert_document,
  document::{SchemaDocument, normalize_base_path},
  errors::GenerationResult,
  stats::GenerationStats,
};

/// Generation options that do not come from the document itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
  pub visibility: Visibility,
  /// Replaces the crate name derived from `info.title`.
  pub crate_name: Option<String>,
  /// Replaces the path of the first server URL as the route prefix.
  pub base_path: Option<String>,
}

pub struct Orchestrator {
  document: SchemaDocument,
  options: GenerationOptions,
}

impl Orchestrator {
  /// Validates the document's top-level shape.
  pub fn new(document: Value, options: GenerationOptions) -> GenerationResult<Self> {
    Ok(Self {
      document: SchemaDocument::from_value(document)?,
      options,
    })
  }

  pub fn metadata(&self) -> CrateMetadata {
    CrateMetadata::from_document(&self.document, self.options.crate_name.as_deref())
  }

  /// The prefix every route pattern starts with, `""` for the root.
  pub fn base_path(&self) -> String {
    self
      .options
      .base_path
      .as_deref()
      .map_or_else(|| self.document.base_path(), normalize_base_path)
  }

  /// Converts the document and renders every file of the scaffold crate.
  pub fn generate(&self) -> GenerationResult<(GeneratedCode, GenerationStats)> {
    let output = convert_document(&self.document, &self.base_path())?;
    let code = codegen::generate(&output, &self.metadata(), self.options.visibility)?;
    Ok((code, GenerationStats::from_output(&output)))
  }
}
