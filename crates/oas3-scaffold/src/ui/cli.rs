use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-scaffold")]
#[command(author, version, about = "Typed Rust server scaffolds from OpenAPI v3 documents")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an API document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate a server scaffold crate from an API document
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// OpenAPI document; `.yaml` and `.yml` files are read as YAML, anything else as JSON
  #[arg(value_name = "SCHEMA_FILE")]
  pub input: PathBuf,

  /// Directory that receives `Cargo.toml` and `src/`
  #[arg(value_name = "OUTPUT_DIR")]
  pub output: PathBuf,

  /// Visibility of generated items (public or crate)
  #[arg(long, value_name = "VISIBILITY", default_value = "public")]
  pub visibility: String,

  /// Package name for the generated crate (default: snake_case of `info.title`)
  #[arg(long, value_name = "NAME")]
  pub crate_name: Option<String>,

  /// Route prefix (default: path of the first server URL)
  #[arg(long, value_name = "PATH")]
  pub base_path: Option<String>,

  /// Print per-kind statistics and every warning
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every operation with the handler name it generates
  Operations {
    /// OpenAPI document (JSON or YAML)
    #[arg(value_name = "SCHEMA_FILE")]
    input: PathBuf,
  },
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_generate_arguments() {
    let cli = Cli::parse_from([
      "oas3-scaffold",
      "generate",
      "api.yaml",
      "out",
      "--visibility",
      "crate",
      "--crate-name",
      "pets",
      "--base-path",
      "/v2",
      "-v",
    ]);

    let Commands::Generate(command) = cli.command else {
      panic!("expected the generate command");
    };
    assert_eq!(command.input, PathBuf::from("api.yaml"));
    assert_eq!(command.output, PathBuf::from("out"));
    assert_eq!(command.visibility, "crate");
    assert_eq!(command.crate_name.as_deref(), Some("pets"));
    assert_eq!(command.base_path.as_deref(), Some("/v2"));
    assert!(command.verbose);
    assert!(!command.quiet);
  }

  #[test]
  fn test_verbose_and_quiet_conflict() {
    let result = Cli::try_parse_from(["oas3-scaffold", "generate", "api.json", "out", "-v", "-q"]);
    assert!(result.is_err());
  }

  #[test]
  fn test_list_operations_arguments() {
    let cli = Cli::parse_from(["oas3-scaffold", "--color", "never", "list", "operations", "api.json"]);
    let Commands::List {
      list_command: ListCommands::Operations { input },
    } = cli.command
    else {
      panic!("expected the list command");
    };
    assert_eq!(input, PathBuf::from("api.json"));
  }
}
