use proc_macro2::{Literal, TokenStream};
use quote::{ToTokens, quote};

use super::Visibility;
use crate::generator::ast::{ResponseEnumDef, ResponsePayload, ResponseVariant};

/// `<Op>Response` with `status_code` and `From` shortcuts for unique payloads.
pub(crate) struct ResponseEnumFragment<'a> {
  def: &'a ResponseEnumDef,
  visibility: Visibility,
}

impl<'a> ResponseEnumFragment<'a> {
  pub(crate) fn new(def: &'a ResponseEnumDef, visibility: Visibility) -> Self {
    Self { def, visibility }
  }
}

impl ToTokens for ResponseEnumFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let name = &self.def.name;
    let docs = &self.def.docs;
    let vis = self.visibility;

    let variants = self.def.variants.iter().map(|variant| {
      let ident = &variant.name;
      let docs = &variant.docs;
      match &variant.payload {
        Some(payload) => {
          let ty = payload.type_ref();
          quote! { #docs #ident(#ty) }
        }
        None => quote! { #docs #ident },
      }
    });

    let status_arms = self.def.variants.iter().map(|variant| {
      let ident = &variant.name;
      let pattern = match variant.payload {
        Some(_) => quote! { Self::#ident(_) },
        None => quote! { Self::#ident },
      };
      let code = Literal::u16_unsuffixed(variant.status_code());
      quote! { #pattern => #code }
    });

    let shortcuts = self.def.from_shortcuts().into_iter().map(|(ty, variant)| {
      let ident = &variant.name;
      quote! {
        impl From<#ty> for #name {
          fn from(value: #ty) -> Self {
            Self::#ident(value)
          }
        }
      }
    });

    tokens.extend(quote! {
      #docs
      #[derive(Debug, Clone, PartialEq)]
      #vis enum #name {
        #(#variants),*
      }

      impl #name {
        #vis fn status_code(&self) -> u16 {
          match self {
            #(#status_arms),*
          }
        }
      }

      #(#shortcuts)*
    });
  }
}

/// Match pattern for `variant`, binding its payload as `body` when present.
pub(crate) fn variant_pattern(variant: &ResponseVariant) -> TokenStream {
  let ident = &variant.name;
  match variant.payload {
    Some(_) => quote! { Self::#ident(body) },
    None => quote! { Self::#ident },
  }
}

/// Expression rendering the bound `body` of a variant into an HTTP response.
pub(crate) fn render_expr(variant: &ResponseVariant) -> TokenStream {
  match variant.payload {
    Some(ResponsePayload::Json(_)) => quote! { support::json_response(status, &body) },
    Some(ResponsePayload::Bytes) => quote! { Ok(support::bytes_response(status, body)) },
    None => quote! { Ok(support::empty_response(status)) },
  }
}
