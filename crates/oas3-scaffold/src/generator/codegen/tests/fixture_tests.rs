use super::support::generate_crate;
use crate::generator::codegen::{GeneratedFileType, Visibility};

const ITEMS_API: &str = include_str!("../../../../../oas3-scaffold-support/tests/fixtures/items_api.json");
const ITEMS_TYPES: &str = include_str!("../../../../../oas3-scaffold-support/tests/fixtures/items_server/types.rs");
const ITEMS_SERVER: &str = include_str!("../../../../../oas3-scaffold-support/tests/fixtures/items_server/server.rs");

/// Reprints `source` so layout differences do not count as drift.
fn normalized(source: &str) -> String {
  prettyplease::unparse(&syn::parse_file(source).expect("source should parse as a file"))
}

fn header(source: &str) -> &str {
  source.split_once("\n\n").map_or(source, |(header, _)| header)
}

fn assert_matches_fixture(file: GeneratedFileType, fixture: &str) {
  let document = serde_json::from_str(ITEMS_API).expect("items document should be valid JSON");
  let code = generate_crate(document, Visibility::Public);
  let generated = code.code(&file).expect("file should be generated");

  assert_eq!(header(generated), header(fixture));
  assert_eq!(
    normalized(generated),
    normalized(fixture),
    "{} no longer matches the checked-in fixture",
    file.relative_path()
  );
}

#[test]
fn test_types_match_dispatch_fixture() {
  assert_matches_fixture(GeneratedFileType::Types, ITEMS_TYPES);
}

#[test]
fn test_server_matches_dispatch_fixture() {
  assert_matches_fixture(GeneratedFileType::Server, ITEMS_SERVER);
}
