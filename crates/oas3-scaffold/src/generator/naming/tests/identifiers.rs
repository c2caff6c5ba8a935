use std::collections::BTreeSet;

use crate::generator::naming::identifiers::{
  ensure_unique, to_constant_name, to_pascal_case, to_rust_field_name, to_rust_type_name, to_snake_case,
};

#[test]
fn test_snake_case_separators() {
  assert_eq!(to_snake_case(&["/one/two/three"]), "one_two_three");
  assert_eq!(to_snake_case(&["go GETIT"]), "go_getit");
  assert_eq!(to_snake_case(&["get", "/items/{id}"]), "get_items_id");
  assert_eq!(to_snake_case(&["trailing/"]), "trailing");
}

#[test]
fn test_snake_case_splits_camel_case_only_on_lower_to_upper() {
  assert_eq!(to_snake_case(&["goGetit"]), "go_getit");
  assert_eq!(to_snake_case(&["listPetsByOwner"]), "list_pets_by_owner");
  assert_eq!(to_snake_case(&["GETIT"]), "getit");
  assert_eq!(to_snake_case(&["item2Name"]), "item2_name");
}

#[test]
fn test_snake_case_is_idempotent() {
  assert_eq!(to_snake_case(&["page_token"]), "page_token");
  assert_eq!(to_snake_case(&["_private"]), "_private");
  let once = to_snake_case(&["createdAt-utc"]);
  assert_eq!(to_snake_case(&[once.as_str()]), once);
}

#[test]
fn test_pascal_case() {
  assert_eq!(to_pascal_case(&["get", "/one/{two}/three"]), "GetOneTwoThree");
  assert_eq!(to_pascal_case(&["AlreadyCamelized"]), "AlreadyCamelized");
  assert_eq!(to_pascal_case(&["one_two"]), "OneTwo");
  assert_eq!(to_pascal_case(&["find pets", "Http200", "body"]), "FindPetsHttp200body");
  assert_eq!(to_pascal_case(&["list_pets", "Response"]), "ListPetsResponse");
  assert_eq!(to_pascal_case(&["/"]), "");
}

#[test]
fn test_fragments_are_concatenated_without_a_break() {
  assert_eq!(to_pascal_case(&["pet", "owner"]), "Petowner");
  assert_eq!(to_pascal_case(&["pet", "Owner"]), "PetOwner");
  assert_eq!(to_snake_case(&["pet", "owner"]), "petowner");
  assert_eq!(to_snake_case(&["pet", "Owner"]), "pet_owner");
}

#[test]
fn test_field_names() {
  assert_eq!(to_rust_field_name("foo-bar"), "foo_bar");
  assert_eq!(to_rust_field_name("match"), "r#match");
  assert_eq!(to_rust_field_name("type"), "r#type");
  assert_eq!(to_rust_field_name("self"), "self_");
  assert_eq!(to_rust_field_name("crate"), "crate_");
  assert_eq!(to_rust_field_name("123name"), "_123name");
  assert_eq!(to_rust_field_name(""), "unnamed");
  assert_eq!(to_rust_field_name("--"), "unnamed");
  assert_eq!(to_rust_field_name("-created"), "negative_created");
  assert_eq!(to_rust_field_name("petId"), "pet_id");
}

#[test]
fn test_type_names() {
  assert_eq!(to_rust_type_name("pet"), "Pet");
  assert_eq!(to_rust_type_name("oAuth"), "OAuth");
  assert_eq!(to_rust_type_name("123Response"), "T123Response");
  assert_eq!(to_rust_type_name("-INF"), "NegativeINF");
  assert_eq!(to_rust_type_name(""), "Unnamed");
  assert_eq!(to_rust_type_name("  "), "Unnamed");
  assert_eq!(to_rust_type_name("Result"), "ResultType");
  assert_eq!(to_rust_type_name("vec"), "VecType");
  assert_eq!(to_rust_type_name("Self"), "SelfType");
}

#[test]
fn test_constant_names() {
  assert_eq!(to_constant_name("get"), "GET");
  assert_eq!(to_constant_name("listPets"), "LIST_PETS");
  assert_eq!(to_constant_name(""), "UNNAMED");
}

#[test]
fn test_ensure_unique() {
  let used = BTreeSet::from(["Items".to_string(), "Items2".to_string()]);
  assert_eq!(ensure_unique("Pets", &used), "Pets");
  assert_eq!(ensure_unique("Items", &used), "Items3");
}
