use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::Visibility;
use crate::generator::ast::{FieldDef, StructDef};

pub(crate) struct StructFragment<'a> {
  def: &'a StructDef,
  visibility: Visibility,
}

impl<'a> StructFragment<'a> {
  pub(crate) fn new(def: &'a StructDef, visibility: Visibility) -> Self {
    Self { def, visibility }
  }
}

impl ToTokens for StructFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let name = &self.def.name;
    let docs = &self.def.docs;
    let vis = self.visibility;
    let fields = self.def.fields.iter().map(|field| FieldFragment::new(field, vis));

    tokens.extend(quote! {
      #docs
      #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
      #vis struct #name {
        #(#fields),*
      }
    });
  }
}

struct FieldFragment<'a> {
  field: &'a FieldDef,
  visibility: Visibility,
}

impl<'a> FieldFragment<'a> {
  fn new(field: &'a FieldDef, visibility: Visibility) -> Self {
    Self { field, visibility }
  }
}

impl ToTokens for FieldFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let field = self.field;
    let name = &field.name;
    let docs = &field.docs;
    let vis = self.visibility;
    let ty = field.field_type();

    let rename = field.needs_rename().then(|| {
      let json_name = &field.json_name;
      quote! { #[serde(rename = #json_name)] }
    });
    let optional = ty.is_option().then(|| {
      quote! { #[serde(default, skip_serializing_if = "Option::is_none")] }
    });

    tokens.extend(quote! {
      #docs
      #rename
      #optional
      #vis #name: #ty
    });
  }
}
