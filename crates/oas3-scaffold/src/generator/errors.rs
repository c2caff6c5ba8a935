use thiserror::Error;

pub(crate) type GenerationResult<T> = Result<T, GenerationError>;

/// Fatal problems found while turning a document into declarations. Any of
/// these aborts the run before a single file is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
  #[error("invalid document: {0}")]
  InvalidDocument(String),
  #[error("unresolved reference `{pointer}`")]
  UnresolvedReference { pointer: String },
  #[error("recursive reference chain through `{pointer}` is not supported")]
  RecursiveSchema { pointer: String },
  #[error("unsupported schema at {context}: {detail}")]
  UnsupportedConstruct { context: String, detail: String },
  #[error("unsupported integer format `{format}` at {context}")]
  UnsupportedFormat { context: String, format: String },
  #[error("malformed oneOf `{union}`: {detail}")]
  MalformedUnion { union: String, detail: String },
  #[error("type name `{name}` is synthesized for two different schemas ({first} and {second})")]
  NameCollision {
    name: String,
    first: String,
    second: String,
  },
  #[error("invalid path template `{path}`: {detail}")]
  InvalidPath { path: String, detail: String },
  #[error("failed to format generated {file}: {detail}")]
  Emit { file: String, detail: String },
}

impl GenerationError {
  pub(crate) fn unsupported(context: impl Into<String>, detail: impl Into<String>) -> Self {
    Self::UnsupportedConstruct {
      context: context.into(),
      detail: detail.into(),
    }
  }

  pub(crate) fn malformed_union(union: impl Into<String>, detail: impl Into<String>) -> Self {
    Self::MalformedUnion {
      union: union.into(),
      detail: detail.into(),
    }
  }
}
