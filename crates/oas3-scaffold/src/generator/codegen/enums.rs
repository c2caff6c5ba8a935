use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::Visibility;
use crate::generator::ast::EnumDef;

/// A string enum with `as_str`, `Display` and `FromStr`.
///
/// With a declared default, parsing never fails: unknown text maps to the
/// default variant and the enum derives `Default`.
pub(crate) struct EnumFragment<'a> {
  def: &'a EnumDef,
  visibility: Visibility,
}

impl<'a> EnumFragment<'a> {
  pub(crate) fn new(def: &'a EnumDef, visibility: Visibility) -> Self {
    Self { def, visibility }
  }

  fn definition(&self) -> TokenStream {
    let name = &self.def.name;
    let docs = &self.def.docs;
    let vis = self.visibility;

    let derive_default = self.def.default.as_ref().map(|_| quote! { Default, });
    let variants = self.def.variants.iter().map(|variant| {
      let ident = &variant.name;
      let value = &variant.value;
      let default = (self.def.default.as_ref() == Some(ident)).then(|| quote! { #[default] });
      quote! {
        #default
        #[serde(rename = #value)]
        #ident
      }
    });

    quote! {
      #docs
      #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, #derive_default serde::Serialize, serde::Deserialize)]
      #vis enum #name {
        #(#variants),*
      }
    }
  }

  fn methods(&self) -> TokenStream {
    let name = &self.def.name;
    let vis = self.visibility;
    let arms = self.def.variants.iter().map(|variant| {
      let ident = &variant.name;
      let value = &variant.value;
      quote! { Self::#ident => #value }
    });

    quote! {
      impl #name {
        #vis fn as_str(&self) -> &'static str {
          match self {
            #(#arms),*
          }
        }
      }

      impl std::fmt::Display for #name {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
          f.write_str(self.as_str())
        }
      }
    }
  }

  fn from_str(&self) -> TokenStream {
    let name = &self.def.name;
    let type_name = name.to_string();
    let arms = self.def.variants.iter().map(|variant| {
      let ident = &variant.name;
      let value = &variant.value;
      quote! { #value => Ok(Self::#ident) }
    });

    let (error, fallback) = match &self.def.default {
      Some(default) => (
        quote! { std::convert::Infallible },
        quote! { _ => Ok(Self::#default) },
      ),
      None => (
        quote! { oas3_scaffold_support::ParseEnumError },
        quote! { other => Err(oas3_scaffold_support::ParseEnumError::new(#type_name, other)) },
      ),
    };

    quote! {
      impl std::str::FromStr for #name {
        type Err = #error;

        fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
          match s {
            #(#arms,)*
            #fallback,
          }
        }
      }
    }
  }
}

impl ToTokens for EnumFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    tokens.extend(self.definition());
    tokens.extend(self.methods());
    tokens.extend(self.from_str());
  }
}
