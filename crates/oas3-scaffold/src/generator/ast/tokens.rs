use std::fmt::{Display, Formatter};

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use string_cache::DefaultAtom;
use syn::Ident;

use crate::generator::naming::identifiers::{to_constant_name, to_pascal_case, to_rust_field_name, to_rust_type_name};

/// Name of a generated type or enum variant. Always a valid, non-raw identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TypeToken(DefaultAtom);

impl TypeToken {
  /// Wraps a name that has already been through [`to_rust_type_name`].
  pub(crate) fn new(name: &str) -> Self {
    Self(DefaultAtom::from(name))
  }

  /// Builds a type name from raw document text.
  pub(crate) fn from_raw(name: &str) -> Self {
    Self::new(&to_rust_type_name(name))
  }

  /// Pascal-cases the whole context path, e.g. `["find pets", "Http200", "Body"]`.
  pub(crate) fn from_fragments<S: AsRef<str>>(fragments: &[S]) -> Self {
    Self::from_raw(&to_pascal_case(fragments))
  }

  pub(crate) fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for TypeToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

impl ToTokens for TypeToken {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    Ident::new(&self.0, Span::call_site()).to_tokens(tokens);
  }
}

/// Name of a field, argument or method. Keywords are stored as `r#kw`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct FieldToken(DefaultAtom);

impl FieldToken {
  pub(crate) fn from_raw(name: &str) -> Self {
    Self(DefaultAtom::from(to_rust_field_name(name)))
  }

  /// The identifier without a raw prefix, for composing derived names such as `set_type`.
  pub(crate) fn bare(&self) -> &str {
    self.0.strip_prefix("r#").unwrap_or(&self.0)
  }

  /// Derives a method name such as `set_<field>` or `with_<field>`.
  pub(crate) fn prefixed(&self, prefix: &str) -> Self {
    Self::from_raw(&format!("{prefix}_{}", self.bare()))
  }

  #[cfg(test)]
  pub(crate) fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for FieldToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

impl ToTokens for FieldToken {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let ident = match self.0.strip_prefix("r#") {
      Some(raw) => Ident::new_raw(raw, Span::call_site()),
      None => Ident::new(&self.0, Span::call_site()),
    };
    ident.to_tokens(tokens);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ConstToken(DefaultAtom);

impl From<&str> for ConstToken {
  fn from(s: &str) -> Self {
    ConstToken(DefaultAtom::from(to_constant_name(s)))
  }
}

impl Display for ConstToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

impl ToTokens for ConstToken {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    Ident::new(&self.0, Span::call_site()).to_tokens(tokens);
  }
}
