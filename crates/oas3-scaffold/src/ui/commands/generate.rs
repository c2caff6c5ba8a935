use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Timelike};
use serde_json::Value;

use crate::{
  generator::{
    codegen::{GeneratedCode, Visibility},
    orchestrator::{GenerationOptions, Orchestrator},
    stats::GenerationStats,
  },
  ui::{Colors, GenerateCommand, colors::paint},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub visibility: Visibility,
  pub crate_name: Option<String>,
  pub base_path: Option<String>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      visibility,
      crate_name,
      base_path,
      verbose,
      quiet,
    } = command;

    let Some(visibility) = Visibility::parse(&visibility) else {
      anyhow::bail!("Invalid visibility '{visibility}': expected 'public' or 'crate'");
    };

    Ok(Self {
      input,
      output,
      visibility,
      crate_name,
      base_path,
      verbose,
      quiet,
    })
  }

  async fn load_document(&self) -> anyhow::Result<Value> {
    SpecLoader::open(&self.input).await?.parse()
  }

  fn create_orchestrator(&self, document: Value) -> anyhow::Result<Orchestrator> {
    let options = GenerationOptions {
      visibility: self.visibility,
      crate_name: self.crate_name.clone(),
      base_path: self.base_path.clone(),
    };
    Ok(Orchestrator::new(document, options)?)
  }

  /// Writes every generated file below the output directory. Called only once
  /// all of them exist in memory.
  async fn write_output(&self, code: &GeneratedCode) -> anyhow::Result<()> {
    for (file, source) in code.files() {
      let path = self.output.join(file.relative_path());
      if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
          .await
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      tokio::fs::write(&path, source)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", paint(format_timestamp(), self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        paint(label, self.colors.label()),
        paint(value, self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    let message = format!("Loading API document from: {}", self.config.input.display());
    self.info(&paint(message, self.colors.primary()).to_string());
  }

  fn log_generating(&self, crate_name: &str) {
    let message = format!("Generating server scaffold `{crate_name}`...");
    self.info(&paint(message, self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Types generated:", stats.types_generated.to_string());
    if self.config.verbose {
      self.stat("", format!("{} structs", stats.structs_generated));
      self.stat("", format!("{} enums", stats.enums_generated));
      self.stat("", format!("{} unions", stats.unions_generated));
      self.stat("", format!("{} type aliases", stats.type_aliases_generated));
      self.stat("", format!("{} response enums", stats.response_enums_generated));
      self.stat(
        "Conversions:",
        format!(
          "{} enum, {} composition",
          stats.enum_conversions_generated, stats.conversions_generated
        ),
      );
      if stats.boxed_fields > 0 {
        self.stat("Boxed fields:", stats.boxed_fields.to_string());
      }
    }
    self.stat("Operations converted:", stats.operations_converted.to_string());
    self.stat("Routes:", stats.routes_generated.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || !self.config.verbose {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        paint("Warning:", self.colors.accent()),
        paint(warning, self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    let message = format!("Writing to: {}", self.config.output.display());
    self.info(&paint(message, self.colors.primary()).to_string());
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        paint(format_timestamp(), self.colors.timestamp()),
        paint("Successfully generated server scaffold", self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = config.load_document().await?;
  let orchestrator = config.create_orchestrator(document)?;

  logger.log_generating(&orchestrator.metadata().crate_name);
  let (code, stats) = orchestrator.generate()?;
  logger.print_statistics(&stats);

  logger.log_writing();
  config.write_output(&code).await?;

  logger.log_success();
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use serde_json::json;

  use super::*;
  use crate::ui::colors::Theme;

  fn command(input: &Path, output: &Path) -> GenerateCommand {
    GenerateCommand {
      input: input.to_path_buf(),
      output: output.to_path_buf(),
      visibility: "public".to_string(),
      crate_name: None,
      base_path: None,
      verbose: false,
      quiet: true,
    }
  }

  fn write_document(dir: &Path, name: &str, document: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(document).unwrap()).unwrap();
    path
  }

  fn pets_document() -> Value {
    json!({
      "info": { "title": "Pet Store", "version": "1.0.0" },
      "paths": {
        "/pets": {
          "get": {
            "operationId": "listPets",
            "responses": {
              "200": {
                "description": "ok",
                "content": {
                  "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } } }
                }
              }
            }
          }
        }
      },
      "components": {
        "schemas": {
          "Pet": { "type": "object", "required": ["name"], "properties": { "name": { "type": "string" } } }
        }
      }
    })
  }

  #[test]
  fn test_from_command_rejects_unknown_visibility() {
    let mut command = command(Path::new("api.json"), Path::new("out"));
    command.visibility = "file".to_string();
    let error = GenerateConfig::from_command(command).unwrap_err();
    assert!(error.to_string().contains("Invalid visibility 'file'"));
  }

  #[tokio::test]
  async fn test_generate_writes_crate_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_document(dir.path(), "pets.json", &pets_document());
    let output = dir.path().join("pet_store");

    let mut command = command(&input, &output);
    command.visibility = "crate".to_string();
    let config = GenerateConfig::from_command(command).unwrap();
    generate_code(config, &Colors::new(false, Theme::Dark)).await.unwrap();

    for file in ["Cargo.toml", "src/lib.rs", "src/types.rs", "src/server.rs"] {
      assert!(output.join(file).is_file(), "{file} should be written");
    }
    let manifest = std::fs::read_to_string(output.join("Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"pet_store\""));
    let types = std::fs::read_to_string(output.join("src/types.rs")).unwrap();
    assert!(types.contains("pub(crate) struct Pet"));
  }

  #[tokio::test]
  async fn test_yaml_input_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = serde_yaml::to_string(&pets_document()).unwrap();
    let input = dir.path().join("pets.yaml");
    std::fs::write(&input, yaml).unwrap();
    let output = dir.path().join("out");

    let mut command = command(&input, &output);
    command.crate_name = Some("zoo".to_string());
    command.base_path = Some("/api".to_string());
    let config = GenerateConfig::from_command(command).unwrap();
    generate_code(config, &Colors::new(false, Theme::Dark)).await.unwrap();

    let manifest = std::fs::read_to_string(output.join("Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"zoo\""));
    let server = std::fs::read_to_string(output.join("src/server.rs")).unwrap();
    assert!(server.contains("\"/api/pets\""));
  }

  #[tokio::test]
  async fn test_failed_generation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut document = pets_document();
    document["components"]["schemas"]["Pet"]["properties"]["owner"] = json!({ "$ref": "#/components/schemas/Owner" });
    let input = write_document(dir.path(), "broken.json", &document);
    let output = dir.path().join("out");

    let config = GenerateConfig::from_command(command(&input, &output)).unwrap();
    let error = generate_code(config, &Colors::new(false, Theme::Dark)).await.unwrap_err();

    assert!(error.to_string().contains("#/components/schemas/Owner"));
    assert!(!output.exists(), "no partial output on failure");
  }

  #[tokio::test]
  async fn test_missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerateConfig::from_command(command(&dir.path().join("missing.json"), dir.path())).unwrap();
    let error = generate_code(config, &Colors::new(false, Theme::Dark)).await.unwrap_err();
    assert!(error.to_string().contains("failed to open"));
  }
}
