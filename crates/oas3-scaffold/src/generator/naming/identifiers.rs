use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;

pub(crate) static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop",
    "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "typeof", "unsized", "virtual", "yield", "gen",
  ]
  .into_iter()
  .collect()
});

/// Keywords that cannot be written as raw identifiers.
static NON_RAW_IDENTIFIERS: LazyLock<HashSet<&str>> =
  LazyLock::new(|| ["self", "Self", "super", "crate"].into_iter().collect());

/// Type names that would shadow prelude items used by generated code.
static RESERVED_TYPE_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "Box", "Clone", "Copy", "Default", "Err", "From", "Into", "None", "Ok", "Option", "Result", "Self", "Send", "Sized",
    "Some", "String", "Sync", "ToString", "Vec",
  ]
  .into_iter()
  .collect()
});

/// Fragments are concatenated as is; word breaks come from the fragment text.
fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
  any_ascii(&fragments.iter().map(AsRef::<str>::as_ref).collect::<String>())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SnakeState {
  Start,
  InWord,
  AfterSeparator,
}

const fn is_word_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_'
}

/// Joins the fragments and converts them to `snake_case`.
///
/// Characters other than ASCII alphanumerics and `_` separate words. A lowercase
/// letter followed by an uppercase one starts a new word, while a run of
/// uppercase letters stays together (`goGETIT` becomes `go_getit`).
pub(crate) fn to_snake_case<S: AsRef<str>>(fragments: &[S]) -> String {
  let joined = join_fragments(fragments);

  let mut result = String::with_capacity(joined.len() + 4);
  let mut state = SnakeState::Start;
  let mut prev_lower = false;

  for c in joined.chars() {
    if !is_word_char(c) {
      if state != SnakeState::Start {
        state = SnakeState::AfterSeparator;
      }
      prev_lower = false;
      continue;
    }

    match state {
      SnakeState::Start => {}
      SnakeState::AfterSeparator => result.push('_'),
      SnakeState::InWord if prev_lower && c.is_ascii_uppercase() => result.push('_'),
      SnakeState::InWord => {}
    }
    result.push(c.to_ascii_lowercase());
    state = SnakeState::InWord;

    if c.is_ascii_alphabetic() || c == '_' {
      prev_lower = c.is_ascii_lowercase();
    }
  }

  result
}

/// Joins the fragments and converts them to `PascalCase`.
///
/// Every non-alphanumeric character, `_` and braces included, separates words.
/// Only the first letter of a word changes, so already-Pascal input is returned as is.
pub(crate) fn to_pascal_case<S: AsRef<str>>(fragments: &[S]) -> String {
  let joined = join_fragments(fragments);

  let mut result = String::with_capacity(joined.len());
  let mut after_separator = true;

  for c in joined.chars() {
    if !c.is_ascii_alphanumeric() {
      after_separator = true;
      continue;
    }

    if after_separator {
      result.push(c.to_ascii_uppercase());
      after_separator = false;
    } else {
      result.push(c);
    }
  }

  result
}

/// Converts a string into a valid Rust field, argument or method name.
///
/// Keywords become raw identifiers, `self`-like names get a trailing `_`, a
/// leading digit gets a `_` prefix and a leading `-` becomes `negative_`.
pub(crate) fn to_rust_field_name(name: &str) -> String {
  let (negative, name) = match name.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, name),
  };

  let mut ident = to_snake_case(&[name]);
  if ident.is_empty() || ident.chars().all(|c| c == '_') {
    return "unnamed".to_string();
  }

  if negative {
    ident.insert_str(0, "negative_");
  }

  if NON_RAW_IDENTIFIERS.contains(ident.as_str()) {
    ident.push('_');
    return ident;
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    return format!("r#{ident}");
  }

  prefix_if_digit_start(&mut ident, '_');
  ident
}

/// Converts a string into a valid Rust type or variant name.
pub(crate) fn to_rust_type_name(name: &str) -> String {
  let (negative, name) = match name.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, name),
  };

  let mut ident = to_pascal_case(&[name]);
  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if negative {
    ident.insert_str(0, "Negative");
  }

  if RESERVED_TYPE_NAMES.contains(ident.as_str()) {
    ident.push_str("Type");
    return ident;
  }

  prefix_if_digit_start(&mut ident, 'T');
  ident
}

/// `SCREAMING_SNAKE_CASE`, used for statics.
pub(crate) fn to_constant_name(name: &str) -> String {
  let mut ident = to_snake_case(&[name]).to_ascii_uppercase();
  if ident.is_empty() {
    return "UNNAMED".to_string();
  }
  prefix_if_digit_start(&mut ident, '_');
  ident
}

fn prefix_if_digit_start(ident: &mut String, prefix: char) {
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, prefix);
  }
}

/// Ensures a name is unique within a set of used names, appending a numeric suffix if needed.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}
