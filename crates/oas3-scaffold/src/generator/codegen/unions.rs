use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::Visibility;
use crate::generator::ast::{SharedField, UnionDef};

/// An adjacently tagged enum plus accessors for the fields every payload shares.
pub(crate) struct UnionFragment<'a> {
  def: &'a UnionDef,
  visibility: Visibility,
}

impl<'a> UnionFragment<'a> {
  pub(crate) fn new(def: &'a UnionDef, visibility: Visibility) -> Self {
    Self { def, visibility }
  }

  fn definition(&self) -> TokenStream {
    let name = &self.def.name;
    let docs = &self.def.docs;
    let vis = self.visibility;
    let tag = &self.def.discriminator;
    let content = &self.def.payload_field;

    let variants = self.def.variants.iter().map(|variant| {
      let ident = &variant.name;
      let value = &variant.tag;
      let payload = &variant.payload;
      quote! {
        #[serde(rename = #value)]
        #ident(#payload)
      }
    });

    quote! {
      #docs
      #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
      #[serde(tag = #tag, content = #content)]
      #vis enum #name {
        #(#variants),*
      }
    }
  }

  fn accessors(&self) -> TokenStream {
    if self.def.shared_fields.is_empty() {
      return quote! {};
    }

    let name = &self.def.name;
    let methods = self.def.shared_fields.iter().map(|field| self.accessor_methods(field));

    quote! {
      impl #name {
        #(#methods)*
      }
    }
  }

  fn accessor_methods(&self, field: &SharedField) -> TokenStream {
    let vis = self.visibility;
    let getter = &field.name;
    let setter = field.name.prefixed("set");
    let builder = field.name.prefixed("with");
    let ty = &field.ty;

    let get_arms = self.def.variants.iter().map(|variant| {
      let ident = &variant.name;
      quote! { Self::#ident(payload) => &payload.#getter }
    });
    let set_arms = self.def.variants.iter().map(|variant| {
      let ident = &variant.name;
      quote! { Self::#ident(payload) => payload.#getter = value }
    });
    let get_doc = format!(" `{}` of whichever payload is present.", field.json_name);

    quote! {
      #[doc = #get_doc]
      #vis fn #getter(&self) -> &#ty {
        match self {
          #(#get_arms),*
        }
      }

      #vis fn #setter(&mut self, value: #ty) {
        match self {
          #(#set_arms),*
        }
      }

      #vis fn #builder(mut self, value: #ty) -> Self {
        self.#setter(value);
        self
      }
    }
  }

  fn from_payloads(&self) -> TokenStream {
    let name = &self.def.name;
    let impls = self.def.from_payloads().map(|variant| {
      let ident = &variant.name;
      let payload = &variant.payload;
      quote! {
        impl From<#payload> for #name {
          fn from(value: #payload) -> Self {
            Self::#ident(value)
          }
        }
      }
    });

    quote! { #(#impls)* }
  }
}

impl ToTokens for UnionFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    tokens.extend(self.definition());
    tokens.extend(self.accessors());
    tokens.extend(self.from_payloads());
  }
}
