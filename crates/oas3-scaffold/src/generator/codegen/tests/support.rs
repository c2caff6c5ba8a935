use quote::ToTokens;
use serde_json::Value;

use crate::generator::{
  codegen::{CrateMetadata, GeneratedCode, Visibility, generate},
  converter::convert_document,
  document::SchemaDocument,
};

/// Pretty-prints a fragment so assertions read like the emitted file.
pub(super) fn format_tokens(tokens: impl ToTokens) -> String {
  let file = syn::parse2::<syn::File>(tokens.into_token_stream()).expect("fragment should parse as a file");
  prettyplease::unparse(&file)
}

pub(super) fn generate_crate(document: Value, visibility: Visibility) -> GeneratedCode {
  let document = SchemaDocument::from_value(document).expect("document should load");
  let output = convert_document(&document, &document.base_path()).expect("conversion should succeed");
  let metadata = CrateMetadata::from_document(&document, None);
  generate(&output, &metadata, visibility).expect("generation should succeed")
}

pub(super) fn assert_contains_all(code: &str, expected: &[&str]) {
  for fragment in expected {
    assert!(code.contains(fragment), "missing `{fragment}` in:\n{code}");
  }
}
