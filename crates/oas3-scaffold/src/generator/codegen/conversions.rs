use std::collections::BTreeSet;

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::Ident;

use super::Visibility;
use crate::generator::{
  ast::{ConversionDef, EnumConversionDef, FieldToken, TypeRef},
  naming::identifiers::ensure_unique,
};

/// `impl From<A> for B` between two enums with the same literal set.
pub(crate) struct EnumConversionFragment<'a> {
  def: &'a EnumConversionDef,
}

impl<'a> EnumConversionFragment<'a> {
  pub(crate) fn new(def: &'a EnumConversionDef) -> Self {
    Self { def }
  }
}

impl ToTokens for EnumConversionFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let source = &self.def.source;
    let target = &self.def.target;
    let arms = self.def.variants.iter().map(|(from, into)| {
      quote! { #source::#from => Self::#into }
    });

    tokens.extend(quote! {
      impl From<#source> for #target {
        fn from(value: #source) -> Self {
          match value {
            #(#arms),*
          }
        }
      }
    });
  }
}

/// Moves a referenced `allOf` component into the merged struct.
///
/// Extra fields that are all optional give a plain `From`; otherwise the
/// required extras become arguments of a `from_<source>` constructor.
pub(crate) struct ConversionFragment<'a> {
  def: &'a ConversionDef,
  visibility: Visibility,
}

impl<'a> ConversionFragment<'a> {
  pub(crate) fn new(def: &'a ConversionDef, visibility: Visibility) -> Self {
    Self { def, visibility }
  }

  fn source_ident(&self) -> FieldToken {
    let taken = self
      .def
      .required_extras()
      .map(|field| field.name.bare().to_string())
      .collect::<BTreeSet<_>>();
    FieldToken::from_raw(&ensure_unique("value", &taken))
  }

  fn struct_literal(&self, source: &FieldToken) -> TokenStream {
    let copied = self.def.copied.iter().map(|mapping| {
      let name = &mapping.field.name;
      let value = convert_expr(quote! { #source.#name }, &mapping.source, &mapping.field.field_type(), 0);
      quote! { #name: #value }
    });
    let extras = self.def.extras.iter().map(|field| {
      let name = &field.name;
      if field.required {
        quote! { #name }
      } else {
        quote! { #name: None }
      }
    });

    quote! {
      Self {
        #(#copied,)*
        #(#extras,)*
      }
    }
  }
}

impl ToTokens for ConversionFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let source_type = &self.def.source;
    let target = &self.def.target;
    let source = self.source_ident();
    let literal = self.struct_literal(&source);

    if self.def.is_plain_from() {
      tokens.extend(quote! {
        impl From<#source_type> for #target {
          fn from(#source: #source_type) -> Self {
            #literal
          }
        }
      });
      return;
    }

    let vis = self.visibility;
    let constructor = self.def.constructor_name();
    let docs = format!(" Builds a `{target}` from a `{source_type}` plus the fields it lacks.");
    let arguments = self.def.required_extras().map(|field| {
      let name = &field.name;
      let ty = field.field_type();
      quote! { #name: #ty }
    });

    tokens.extend(quote! {
      impl #target {
        #[doc = #docs]
        #vis fn #constructor(#source: #source_type, #(#arguments),*) -> Self {
          #literal
        }
      }
    });
  }
}

/// Expression turning `value` of type `source` into `target`.
///
/// Mirrors the shapes `is_convertible` accepts: boxes are unwrapped or added,
/// `Option` and `Vec` map element-wise and named types go through `From`.
pub(crate) fn convert_expr(value: TokenStream, source: &TypeRef, target: &TypeRef, depth: usize) -> TokenStream {
  match (source, target) {
    _ if source == target => value,
    (TypeRef::Boxed(inner), _) => convert_expr(quote! { *#value }, inner, target, depth),
    (_, TypeRef::Boxed(inner)) => {
      let converted = convert_expr(value, source, inner, depth);
      quote! { Box::new(#converted) }
    }
    (TypeRef::Option(from), TypeRef::Option(into)) => {
      let item = item_ident(depth);
      let converted = convert_expr(quote! { #item }, from, into, depth + 1);
      quote! { #value.map(|#item| #converted) }
    }
    (_, TypeRef::Option(into)) => {
      let converted = convert_expr(value, source, into, depth);
      quote! { Some(#converted) }
    }
    (TypeRef::Vec(from), TypeRef::Vec(into)) => {
      let item = item_ident(depth);
      let converted = convert_expr(quote! { #item }, from, into, depth + 1);
      quote! { #value.into_iter().map(|#item| #converted).collect() }
    }
    (_, TypeRef::Named(into)) => quote! { #into::from(#value) },
    _ => value,
  }
}

fn item_ident(depth: usize) -> Ident {
  if depth == 0 {
    Ident::new("item", Span::call_site())
  } else {
    Ident::new(&format!("item{depth}"), Span::call_site())
  }
}
