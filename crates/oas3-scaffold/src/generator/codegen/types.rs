use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{
  Visibility,
  conversions::{ConversionFragment, EnumConversionFragment},
  enums::EnumFragment,
  responses::ResponseEnumFragment,
  structs::StructFragment,
  unions::UnionFragment,
};
use crate::generator::{
  ast::{AliasDef, RustType},
  converter::ConversionOutput,
};

pub(crate) struct TypeFragment<'a> {
  rust_type: &'a RustType,
  visibility: Visibility,
}

impl<'a> TypeFragment<'a> {
  pub(crate) fn new(rust_type: &'a RustType, visibility: Visibility) -> Self {
    Self { rust_type, visibility }
  }
}

impl ToTokens for TypeFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let vis = self.visibility;
    match self.rust_type {
      RustType::Struct(def) => StructFragment::new(def, vis).to_tokens(tokens),
      RustType::Enum(def) => EnumFragment::new(def, vis).to_tokens(tokens),
      RustType::Union(def) => UnionFragment::new(def, vis).to_tokens(tokens),
      RustType::Alias(def) => alias_tokens(def, vis).to_tokens(tokens),
      RustType::Response(def) => ResponseEnumFragment::new(def, vis).to_tokens(tokens),
    }
  }
}

fn alias_tokens(def: &AliasDef, visibility: Visibility) -> TokenStream {
  let name = &def.name;
  let docs = &def.docs;
  let target = &def.target;

  quote! {
    #docs
    #visibility type #name = #target;
  }
}

/// The whole `types.rs`: schema types first, then the conversions between
/// them, then the response enums.
pub(crate) struct TypesFragment<'a> {
  output: &'a ConversionOutput,
  visibility: Visibility,
}

impl<'a> TypesFragment<'a> {
  pub(crate) fn new(output: &'a ConversionOutput, visibility: Visibility) -> Self {
    Self { output, visibility }
  }
}

impl ToTokens for TypesFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let vis = self.visibility;
    let (responses, schemas): (Vec<_>, Vec<_>) = self
      .output
      .types
      .iter()
      .partition(|rust_type| matches!(rust_type, RustType::Response(_)));

    let schemas = schemas.into_iter().map(|rust_type| TypeFragment::new(rust_type, vis));
    let enum_conversions = self.output.enum_conversions.iter().map(EnumConversionFragment::new);
    let conversions = self
      .output
      .conversions
      .iter()
      .map(|conversion| ConversionFragment::new(conversion, vis));
    let responses = responses.into_iter().map(|rust_type| TypeFragment::new(rust_type, vis));

    tokens.extend(quote! {
      #(#schemas)*
      #(#enum_conversions)*
      #(#conversions)*
      #(#responses)*
    });
  }
}
