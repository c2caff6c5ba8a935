use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  pub(crate) fn from_raw(input: &str) -> Self {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Self::default();
    }
    Self {
      lines: trimmed.replace("\\n", "\n").lines().map(|line| line.trim_end().to_string()).collect(),
    }
  }

  /// Uses `description`, falling back to `summary` and then `title`.
  pub(crate) fn from_node(node: &Value) -> Self {
    ["description", "summary", "title"]
      .into_iter()
      .find_map(|key| node.get(key).and_then(Value::as_str))
      .map_or_else(Self::default, Self::from_raw)
  }

  pub(crate) fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }
}

impl ToTokens for Documentation {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    for line in &self.lines {
      let line = if line.is_empty() { String::new() } else { format!(" {line}") };
      tokens.extend(quote! { #[doc = #line] });
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_from_node_prefers_description() {
    let docs = Documentation::from_node(&json!({ "summary": "short", "description": "long\ntext" }));
    assert_eq!(docs, Documentation::from_lines(["long", "text"]));
  }

  #[test]
  fn test_blank_text_is_empty() {
    assert_eq!(Documentation::from_raw("   "), Documentation::default());
    assert_eq!(Documentation::from_node(&json!({ "type": "string" })), Documentation::default());
  }

  #[test]
  fn test_renders_doc_attributes() {
    let docs = Documentation::from_lines(["Returns a pet.", "", "Fails when missing."]);
    let mut tokens = TokenStream::new();
    docs.to_tokens(&mut tokens);
    let rendered = tokens.to_string();
    assert!(rendered.contains("\" Returns a pet.\""));
    assert!(rendered.contains("\"\""));
    assert_eq!(rendered.matches("doc").count(), 3);
  }
}
