use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// A memory-mapped API description, parsed on demand into a generic JSON tree.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self {
      file,
      format: SpecFormat::from_path(path),
    })
  }

  pub fn parse(&self) -> anyhow::Result<Value> {
    parse_document(self.file.as_slice(), self.format)
  }
}

/// YAML goes straight into `serde_json::Value`, keeping mapping order.
pub fn parse_document(bytes: &[u8], format: SpecFormat) -> anyhow::Result<Value> {
  match format {
    SpecFormat::Json => serde_json::from_slice(bytes).context("document is not valid JSON"),
    SpecFormat::Yaml => serde_yaml::from_slice(bytes).context("document is not valid YAML"),
  }
}
