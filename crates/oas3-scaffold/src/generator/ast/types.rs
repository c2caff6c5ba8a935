use std::fmt::{Display, Formatter};

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::tokens::TypeToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub(crate) enum RustPrimitive {
  #[strum(serialize = "i8")]
  I8,
  #[strum(serialize = "i16")]
  I16,
  #[strum(serialize = "i32")]
  I32,
  #[strum(serialize = "i64")]
  I64,
  #[strum(serialize = "u8")]
  U8,
  #[strum(serialize = "u16")]
  U16,
  #[strum(serialize = "u32")]
  U32,
  #[strum(serialize = "u64")]
  U64,
  #[strum(serialize = "f64")]
  F64,
  #[strum(serialize = "bool")]
  Bool,
  #[strum(serialize = "String")]
  String,
  #[strum(serialize = "Bytes")]
  Bytes,
}

impl RustPrimitive {
  /// Maps an `integer` schema format to its fixed-width type.
  pub(crate) fn from_integer_format(format: Option<&str>) -> Option<Self> {
    match format {
      None | Some("int64") => Some(Self::I64),
      Some("int8") => Some(Self::I8),
      Some("int16") => Some(Self::I16),
      Some("int32") => Some(Self::I32),
      Some("uint8") => Some(Self::U8),
      Some("uint16") => Some(Self::U16),
      Some("uint32") => Some(Self::U32),
      Some("uint64") => Some(Self::U64),
      Some(_) => None,
    }
  }

  fn variant_name(self) -> &'static str {
    match self {
      Self::I8 => "I8",
      Self::I16 => "I16",
      Self::I32 => "I32",
      Self::I64 => "I64",
      Self::U8 => "U8",
      Self::U16 => "U16",
      Self::U32 => "U32",
      Self::U64 => "U64",
      Self::F64 => "F64",
      Self::Bool => "Bool",
      Self::String => "Text",
      Self::Bytes => "Bytes",
    }
  }
}

impl ToTokens for RustPrimitive {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let ty = match self {
      Self::I8 => quote! { i8 },
      Self::I16 => quote! { i16 },
      Self::I32 => quote! { i32 },
      Self::I64 => quote! { i64 },
      Self::U8 => quote! { u8 },
      Self::U16 => quote! { u16 },
      Self::U32 => quote! { u32 },
      Self::U64 => quote! { u64 },
      Self::F64 => quote! { f64 },
      Self::Bool => quote! { bool },
      Self::String => quote! { String },
      Self::Bytes => quote! { oas3_scaffold_support::Bytes },
    };
    ty.to_tokens(tokens);
  }
}

/// Reference to a type from a field, parameter or payload position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum TypeRef {
  Primitive(RustPrimitive),
  Named(TypeToken),
  Vec(Box<TypeRef>),
  Option(Box<TypeRef>),
  Boxed(Box<TypeRef>),
}

impl TypeRef {
  pub(crate) fn named(token: TypeToken) -> Self {
    Self::Named(token)
  }

  pub(crate) fn vec(item: TypeRef) -> Self {
    Self::Vec(Box::new(item))
  }

  /// Wraps in `Option` unless the type already is one.
  pub(crate) fn optional(self) -> Self {
    match self {
      Self::Option(_) => self,
      other => Self::Option(Box::new(other)),
    }
  }

  pub(crate) fn boxed(self) -> Self {
    match self {
      Self::Boxed(_) => self,
      other => Self::Boxed(Box::new(other)),
    }
  }

  /// `true` when no generated declaration is involved.
  pub(crate) fn is_builtin(&self) -> bool {
    match self {
      Self::Primitive(_) => true,
      Self::Named(_) => false,
      Self::Vec(inner) | Self::Option(inner) | Self::Boxed(inner) => inner.is_builtin(),
    }
  }

  pub(crate) const fn is_option(&self) -> bool {
    matches!(self, Self::Option(_))
  }

  /// The inner type of an `Option`, or the type itself.
  pub(crate) fn without_option(&self) -> &TypeRef {
    match self {
      Self::Option(inner) => inner,
      other => other,
    }
  }

  /// Variant name for a union arm carrying this type: `Pet`, `PetList`, `Text`.
  pub(crate) fn variant_name(&self) -> TypeToken {
    match self {
      Self::Primitive(primitive) => TypeToken::new(primitive.variant_name()),
      Self::Named(token) => token.clone(),
      Self::Vec(inner) => TypeToken::new(&format!("{}List", inner.variant_name())),
      Self::Option(inner) | Self::Boxed(inner) => inner.variant_name(),
    }
  }

  /// `true` for types a query or path parameter can be parsed into.
  pub(crate) fn is_scalar(&self) -> bool {
    matches!(self, Self::Primitive(primitive) if *primitive != RustPrimitive::Bytes)
  }
}

impl Display for TypeRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Primitive(primitive) => write!(f, "{primitive}"),
      Self::Named(token) => write!(f, "{token}"),
      Self::Vec(inner) => write!(f, "Vec<{inner}>"),
      Self::Option(inner) => write!(f, "Option<{inner}>"),
      Self::Boxed(inner) => write!(f, "Box<{inner}>"),
    }
  }
}

impl ToTokens for TypeRef {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let ty = match self {
      Self::Primitive(primitive) => quote! { #primitive },
      Self::Named(token) => quote! { #token },
      Self::Vec(inner) => quote! { Vec<#inner> },
      Self::Option(inner) => quote! { Option<#inner> },
      Self::Boxed(inner) => quote! { Box<#inner> },
    };
    ty.to_tokens(tokens);
  }
}
