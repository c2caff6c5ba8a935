use itertools::Itertools;

use crate::generator::errors::{GenerationError, GenerationResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum PathSegment {
  Literal(String),
  Param(String),
}

/// A path template such as `/items/{id}/tags`, split into whole segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPath {
  template: String,
  segments: Vec<PathSegment>,
}

impl ParsedPath {
  pub(crate) fn parse(template: &str) -> GenerationResult<Self> {
    let invalid = |detail: String| GenerationError::InvalidPath {
      path: template.to_string(),
      detail,
    };

    if !template.starts_with('/') {
      return Err(invalid("templates must start with `/`".to_string()));
    }

    let mut segments = vec![];
    for segment in template.split('/').filter(|s| !s.is_empty()) {
      let parsed = match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some("") => return Err(invalid(format!("empty placeholder in `{segment}`"))),
        Some(name) if name.contains(['{', '}']) => return Err(invalid(format!("nested braces in `{segment}`"))),
        Some(name) => PathSegment::Param(name.to_string()),
        None if segment.contains(['{', '}']) => {
          return Err(invalid(format!(
            "placeholder must span the whole segment, found `{segment}`"
          )));
        }
        None => PathSegment::Literal(segment.to_string()),
      };

      if let PathSegment::Param(name) = &parsed
        && segments.contains(&parsed)
      {
        return Err(invalid(format!("placeholder `{name}` appears twice")));
      }
      segments.push(parsed);
    }

    Ok(Self {
      template: template.to_string(),
      segments,
    })
  }

  pub(crate) fn template(&self) -> &str {
    &self.template
  }

  pub(crate) fn params(&self) -> impl Iterator<Item = &str> {
    self.segments.iter().filter_map(|segment| match segment {
      PathSegment::Param(name) => Some(name.as_str()),
      PathSegment::Literal(_) => None,
    })
  }

  /// The template with placeholder names erased. Two templates with the same
  /// shape land on the same route.
  pub(crate) fn shape(&self) -> String {
    let parts = self.segments.iter().map(|segment| match segment {
      PathSegment::Literal(literal) => literal.as_str(),
      PathSegment::Param(_) => "{}",
    });
    format!("/{}", parts.format("/"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parses_literals_and_params() {
    let parsed = ParsedPath::parse("/items/{id}/tags/").unwrap();
    assert_eq!(parsed.shape(), "/items/{}/tags");
    assert_eq!(parsed.params().collect::<Vec<_>>(), ["id"]);
    assert_eq!(parsed.template(), "/items/{id}/tags/");
  }

  #[test]
  fn test_shape_ignores_param_names_and_slashes() {
    let first = ParsedPath::parse("/items/{id}").unwrap();
    let second = ParsedPath::parse("/items/{item_id}/").unwrap();
    assert_eq!(first.shape(), "/items/{}");
    assert_eq!(first.shape(), second.shape());
    assert_eq!(ParsedPath::parse("/").unwrap().shape(), "/");
  }

  #[test]
  fn test_rejects_malformed_templates() {
    for template in ["items", "/items/{}", "/items/{a{b}}", "/files/{name}.json", "/a/{id}/b/{id}", "/a/id}"] {
      assert!(
        matches!(ParsedPath::parse(template), Err(GenerationError::InvalidPath { .. })),
        "{template} should be rejected"
      );
    }
  }
}
