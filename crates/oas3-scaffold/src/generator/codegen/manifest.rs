use crate::generator::{document::SchemaDocument, naming::identifiers::to_snake_case};

const FALLBACK_CRATE_NAME: &str = "api_scaffold";
const DEFAULT_VERSION: &str = "0.1.0";

/// What the file headers and `Cargo.toml` say about the generated crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrateMetadata {
  pub crate_name: String,
  pub title: String,
  pub version: String,
}

impl CrateMetadata {
  pub(crate) fn from_document(document: &SchemaDocument, crate_name: Option<&str>) -> Self {
    let title = document.title().unwrap_or("Untitled API").to_string();
    let crate_name = crate_name.map_or_else(|| crate_name_for(&title), crate_name_for);

    Self {
      crate_name,
      title,
      version: document.version().unwrap_or(DEFAULT_VERSION).to_string(),
    }
  }

  /// The document's version when it is a valid semver triple, else `0.1.0`.
  fn package_version(&self) -> &str {
    let mut parts = self.version.split('.');
    let numeric = parts.by_ref().take(3).filter(|part| part.parse::<u64>().is_ok()).count() == 3;
    if numeric && parts.next().is_none() {
      &self.version
    } else {
      DEFAULT_VERSION
    }
  }
}

/// `snake_case` of `raw`, prefixed when it would not start with a letter.
pub(crate) fn crate_name_for(raw: &str) -> String {
  let name = to_snake_case(&[raw]);
  match name.chars().next() {
    None => FALLBACK_CRATE_NAME.to_string(),
    Some(first) if first.is_ascii_alphabetic() => name,
    Some(_) => format!("api_{}", name.trim_start_matches('_')),
  }
}

pub(crate) fn render(metadata: &CrateMetadata) -> String {
  format!(
    r#"# AUTO-GENERATED by `oas3-scaffold` {generator_version} from "{title}".
[package]
name = "{name}"
version = "{version}"
edition = "2024"
publish = false

[dependencies]
anyhow = "1"
oas3-scaffold-support = "{generator_version}"
serde = {{ version = "1", features = ["derive"] }}
serde_json = "1"
"#,
    generator_version = env!("CARGO_PKG_VERSION"),
    title = metadata.title.replace('"', "'"),
    name = metadata.crate_name,
    version = metadata.package_version(),
  )
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_crate_names() {
    assert_eq!(crate_name_for("Pet Store API"), "pet_store_api");
    assert_eq!(crate_name_for("3D Printing"), "api_3d_printing");
    assert_eq!(crate_name_for("!!!"), FALLBACK_CRATE_NAME);
  }

  #[test]
  fn test_metadata_from_document() {
    let document = SchemaDocument::from_value(json!({ "info": { "title": "Items API", "version": "2.1" } })).unwrap();

    let metadata = CrateMetadata::from_document(&document, None);
    assert_eq!(metadata.crate_name, "items_api");
    assert_eq!(metadata.package_version(), DEFAULT_VERSION);

    let renamed = CrateMetadata::from_document(&document, Some("My-Items"));
    assert_eq!(renamed.crate_name, "my_items");
  }

  #[test]
  fn test_manifest_lists_runtime_dependencies() {
    let metadata = CrateMetadata {
      crate_name: "items_api".to_string(),
      title: "Items".to_string(),
      version: "1.2.3".to_string(),
    };

    let manifest = render(&metadata);
    assert!(manifest.contains("name = \"items_api\""));
    assert!(manifest.contains("version = \"1.2.3\""));
    assert!(manifest.contains("oas3-scaffold-support = "));
    assert!(manifest.contains("anyhow = \"1\""));
  }
}
