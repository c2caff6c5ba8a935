//! Declarations produced by the converter and printed by `codegen`.

mod documentation;
mod parsed_path;
pub(crate) mod tokens;
mod types;

pub(crate) use documentation::Documentation;
use http::Method;
use indexmap::IndexMap;
use mediatype::MediaType;
pub(crate) use parsed_path::ParsedPath;
pub(crate) use tokens::{ConstToken, FieldToken, TypeToken};
pub(crate) use types::{RustPrimitive, TypeRef};

use super::naming::identifiers::to_snake_case;

/// A top-level declaration in the generated `types.rs`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RustType {
  Struct(StructDef),
  Enum(EnumDef),
  Union(UnionDef),
  Alias(AliasDef),
  Response(ResponseEnumDef),
}

impl RustType {
  pub(crate) fn type_name(&self) -> &TypeToken {
    match self {
      Self::Struct(def) => &def.name,
      Self::Enum(def) => &def.name,
      Self::Union(def) => &def.name,
      Self::Alias(def) => &def.name,
      Self::Response(def) => &def.name,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub(crate) struct FieldDef {
  pub(crate) name: FieldToken,
  #[builder(into)]
  pub(crate) json_name: String,
  /// Declared type, before the `Option` wrapper an optional field receives.
  pub(crate) ty: TypeRef,
  pub(crate) required: bool,
  #[builder(default)]
  pub(crate) docs: Documentation,
}

impl FieldDef {
  /// The type the struct field is declared with.
  pub(crate) fn field_type(&self) -> TypeRef {
    if self.required {
      self.ty.clone()
    } else {
      self.ty.clone().optional()
    }
  }

  /// Whether the JSON key differs from the Rust identifier and needs a rename.
  pub(crate) fn needs_rename(&self) -> bool {
    self.name.bare() != self.json_name
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub(crate) struct StructDef {
  pub(crate) name: TypeToken,
  #[builder(default)]
  pub(crate) docs: Documentation,
  #[builder(default)]
  pub(crate) fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumVariant {
  pub(crate) name: TypeToken,
  pub(crate) value: String,
}

/// A closed set of string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumDef {
  pub(crate) name: TypeToken,
  pub(crate) docs: Documentation,
  pub(crate) variants: Vec<EnumVariant>,
  /// Variant that unknown text parses into.
  pub(crate) default: Option<TypeToken>,
}

impl EnumDef {
  pub(crate) fn variant_for(&self, value: &str) -> Option<&TypeToken> {
    self
      .variants
      .iter()
      .find(|variant| variant.value == value)
      .map(|variant| &variant.name)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnionVariant {
  pub(crate) name: TypeToken,
  /// Discriminator value selecting this arm.
  pub(crate) tag: String,
  pub(crate) payload: TypeRef,
}

/// A field present with the same type in every payload of a union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SharedField {
  pub(crate) name: FieldToken,
  pub(crate) json_name: String,
  pub(crate) ty: TypeRef,
}

/// Adjacently tagged `oneOf`: `{"<discriminator>": "<tag>", "<payload_field>": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub(crate) struct UnionDef {
  pub(crate) name: TypeToken,
  #[builder(default)]
  pub(crate) docs: Documentation,
  #[builder(into)]
  pub(crate) discriminator: String,
  #[builder(into)]
  pub(crate) payload_field: String,
  pub(crate) variants: Vec<UnionVariant>,
  #[builder(default)]
  pub(crate) shared_fields: Vec<SharedField>,
}

impl UnionDef {
  /// Payload types that get a `From` impl into the union.
  pub(crate) fn from_payloads(&self) -> impl Iterator<Item = &UnionVariant> {
    self.variants.iter().filter(|variant| !variant.payload.is_builtin())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AliasDef {
  pub(crate) name: TypeToken,
  pub(crate) docs: Documentation,
  pub(crate) target: TypeRef,
}

/// `From<source> for target` between two enums with the same literal set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumConversionDef {
  pub(crate) source: TypeToken,
  pub(crate) target: TypeToken,
  /// `(source variant, target variant)` pairs sharing a literal.
  pub(crate) variants: Vec<(TypeToken, TypeToken)>,
}

/// A merged-struct field filled from the same field of the source component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldMapping {
  pub(crate) field: FieldDef,
  /// Declared type of the field on the source struct.
  pub(crate) source: TypeRef,
}

/// Conversion from a referenced `allOf` fragment into the merged struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConversionDef {
  pub(crate) source: TypeToken,
  pub(crate) target: TypeToken,
  pub(crate) copied: Vec<FieldMapping>,
  /// Merged fields the source does not provide.
  pub(crate) extras: Vec<FieldDef>,
}

impl ConversionDef {
  /// `true` when every extra field can default to `None`, so a plain `From` suffices.
  pub(crate) fn is_plain_from(&self) -> bool {
    self.extras.iter().all(|field| !field.required)
  }

  /// Name of the inherent constructor used when extra fields are required.
  pub(crate) fn constructor_name(&self) -> FieldToken {
    FieldToken::from_raw(&format!("from_{}", to_snake_case(&[self.source.as_str()])))
  }

  pub(crate) fn required_extras(&self) -> impl Iterator<Item = &FieldDef> {
    self.extras.iter().filter(|field| field.required)
  }
}

/// How a body with a given media type is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentKind {
  Json,
  Raw,
}

impl ContentKind {
  /// `application/json` and any `+json` suffix are JSON; everything else,
  /// unparseable media types included, is handed over as raw bytes.
  pub(crate) fn from_content_type(content_type: &str) -> Self {
    let Ok(media) = MediaType::parse(content_type) else {
      return Self::Raw;
    };

    let suffix = media.suffix.as_ref().map(mediatype::Name::as_str);
    match (media.ty.as_str(), media.subty.as_str(), suffix) {
      ("application", "json", _) | (_, _, Some("json")) => Self::Json,
      _ => Self::Raw,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ResponsePayload {
  Json(TypeRef),
  Bytes,
}

impl ResponsePayload {
  pub(crate) fn type_ref(&self) -> TypeRef {
    match self {
      Self::Json(ty) => ty.clone(),
      Self::Bytes => TypeRef::Primitive(RustPrimitive::Bytes),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResponseVariant {
  pub(crate) name: TypeToken,
  /// `None` for the `default` response.
  pub(crate) status: Option<u16>,
  pub(crate) docs: Documentation,
  pub(crate) payload: Option<ResponsePayload>,
}

impl ResponseVariant {
  pub(crate) fn status_code(&self) -> u16 {
    self.status.unwrap_or(500)
  }
}

/// `<Op>Response`: one variant per declared status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResponseEnumDef {
  pub(crate) name: TypeToken,
  pub(crate) docs: Documentation,
  pub(crate) variants: Vec<ResponseVariant>,
}

impl ResponseEnumDef {
  /// Variants whose payload type no other variant carries, in declaration order.
  pub(crate) fn from_shortcuts(&self) -> Vec<(TypeRef, &ResponseVariant)> {
    let mut by_type: IndexMap<TypeRef, Vec<&ResponseVariant>> = IndexMap::new();
    for variant in &self.variants {
      if let Some(payload) = &variant.payload {
        by_type.entry(payload.type_ref()).or_default().push(variant);
      }
    }

    by_type
      .into_iter()
      .filter_map(|(ty, carriers)| match carriers.as_slice() {
        [only] => Some((ty, *only)),
        _ => None,
      })
      .collect()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub(crate) enum ParameterLocation {
  #[strum(serialize = "path")]
  Path,
  #[strum(serialize = "query")]
  Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParameterStyle {
  Single,
  /// `?tag=a&tag=b`
  Repeated,
  /// `?tag=a,b`
  Delimited,
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub(crate) struct ParameterDef {
  pub(crate) name: FieldToken,
  #[builder(into)]
  pub(crate) original_name: String,
  pub(crate) location: ParameterLocation,
  pub(crate) required: bool,
  /// Element type for array parameters, never wrapped in `Option`.
  pub(crate) ty: TypeRef,
  pub(crate) style: ParameterStyle,
  #[builder(default)]
  pub(crate) docs: Documentation,
}

impl ParameterDef {
  /// The argument type the `Api` method receives.
  pub(crate) fn argument_type(&self) -> TypeRef {
    let ty = match self.style {
      ParameterStyle::Single => self.ty.clone(),
      ParameterStyle::Repeated | ParameterStyle::Delimited => TypeRef::vec(self.ty.clone()),
    };
    if self.required { ty } else { ty.optional() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestBodyKind {
  Json { ty: TypeRef, required: bool },
  /// Any non-JSON media type, handed over unbuffered.
  Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestBodyDef {
  /// Argument name, `body` unless a parameter already uses it.
  pub(crate) name: FieldToken,
  pub(crate) kind: RequestBodyKind,
}

impl RequestBodyDef {
  /// `None` for raw bodies, which use the support crate's `RawBody`.
  pub(crate) fn argument_type(&self) -> Option<TypeRef> {
    match &self.kind {
      RequestBodyKind::Json { ty, required: true } => Some(ty.clone()),
      RequestBodyKind::Json { ty, required: false } => Some(ty.clone().optional()),
      RequestBodyKind::Raw => None,
    }
  }
}

/// One operation bound to its route, arguments and response enum.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub(crate) struct OperationDef {
  pub(crate) name: FieldToken,
  /// Operation id as declared, or synthesized from method and path.
  #[builder(into)]
  pub(crate) operation_id: String,
  pub(crate) method: Method,
  #[builder(into)]
  pub(crate) path: String,
  #[builder(default)]
  pub(crate) docs: Documentation,
  #[builder(default)]
  pub(crate) parameters: Vec<ParameterDef>,
  pub(crate) body: Option<RequestBodyDef>,
  pub(crate) response: TypeToken,
  pub(crate) path_enum: TypeToken,
  pub(crate) path_variant: TypeToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteDef {
  pub(crate) variant: TypeToken,
  /// Base prefix plus template, placeholders kept as `{name}`.
  pub(crate) pattern: String,
}

/// Per-method path enum and its router static.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteTableDef {
  pub(crate) method: Method,
  pub(crate) enum_name: TypeToken,
  pub(crate) static_name: ConstToken,
  pub(crate) routes: Vec<RouteDef>,
}
