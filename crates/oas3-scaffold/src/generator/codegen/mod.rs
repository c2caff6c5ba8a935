//! Prints the converted declaration tree as the files of a scaffold crate.
//!
//! Every file is rendered through `syn` and `prettyplease`, so malformed tokens
//! surface as [`GenerationError::Emit`] before anything reaches the disk.

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{
  converter::ConversionOutput,
  errors::{GenerationError, GenerationResult},
};

mod conversions;
mod enums;
pub(crate) mod manifest;
mod responses;
mod server;
mod structs;
mod types;
mod unions;

#[cfg(test)]
mod tests;

pub(crate) use manifest::CrateMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Public,
  Crate,
}

impl Visibility {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "public" => Some(Visibility::Public),
      "crate" => Some(Visibility::Crate),
      _ => None,
    }
  }
}

impl ToTokens for Visibility {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let vis = match self {
      Visibility::Public => quote! { pub },
      Visibility::Crate => quote! { pub(crate) },
    };
    tokens.extend(vis);
  }
}

/// The files of a generated scaffold crate, keyed by their path inside the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeneratedFileType {
  Manifest,
  Lib,
  Types,
  Server,
}

impl GeneratedFileType {
  pub const fn relative_path(self) -> &'static str {
    match self {
      Self::Manifest => "Cargo.toml",
      Self::Lib => "src/lib.rs",
      Self::Types => "src/types.rs",
      Self::Server => "src/server.rs",
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratedCode {
  files: BTreeMap<GeneratedFileType, String>,
}

impl GeneratedCode {
  #[cfg(test)]
  pub fn code(&self, file: &GeneratedFileType) -> Option<&String> {
    self.files.get(file)
  }

  pub fn files(&self) -> impl Iterator<Item = (GeneratedFileType, &str)> {
    self.files.iter().map(|(file, code)| (*file, code.as_str()))
  }

  fn insert(&mut self, file: GeneratedFileType, code: String) {
    self.files.insert(file, code);
  }
}

/// Renders every file of the scaffold crate in memory.
pub(crate) fn generate(
  output: &ConversionOutput,
  metadata: &CrateMetadata,
  visibility: Visibility,
) -> GenerationResult<GeneratedCode> {
  let mut code = GeneratedCode::default();

  let types = types::TypesFragment::new(output, visibility);
  code.insert(
    GeneratedFileType::Types,
    generate_source(GeneratedFileType::Types, types.into_token_stream(), metadata)?,
  );

  let server = server::ServerFragment::new(output, visibility);
  code.insert(
    GeneratedFileType::Server,
    generate_source(GeneratedFileType::Server, server.into_token_stream(), metadata)?,
  );

  code.insert(
    GeneratedFileType::Lib,
    generate_source(GeneratedFileType::Lib, lib_tokens(visibility), metadata)?,
  );
  code.insert(GeneratedFileType::Manifest, manifest::render(metadata));

  Ok(code)
}

fn lib_tokens(visibility: Visibility) -> TokenStream {
  quote! {
    pub mod server;
    pub mod types;

    #visibility use server::{Api, handle};
  }
}

/// Parses and pretty-prints `tokens`, prefixed with the generated-file header.
fn generate_source(file: GeneratedFileType, tokens: TokenStream, metadata: &CrateMetadata) -> GenerationResult<String> {
  let syntax_tree = syn::parse2::<syn::File>(tokens).map_err(|error| GenerationError::Emit {
    file: file.relative_path().to_string(),
    detail: error.to_string(),
  })?;
  let formatted = prettyplease::unparse(&syntax_tree);

  Ok(format!(
    "//! AUTO-GENERATED CODE - DO NOT EDIT!\n//!\n//! {} {}\n//! Generated by `oas3-scaffold` {}\n\n{formatted}",
    metadata.title,
    metadata.version,
    env!("CARGO_PKG_VERSION"),
  ))
}
