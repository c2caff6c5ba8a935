use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Prefix trie mapping path templates such as `/v1/items/{id}` to a value.
///
/// Generated servers build one router per HTTP method and store the path
/// identifier enum as the value. Placeholder names belong to the route, so
/// `/items/{id}` and `/items/{item_id}/tags` can share a trie node.
#[derive(Debug)]
pub struct Router<T> {
  root: Node<T>,
}

#[derive(Debug)]
struct Node<T> {
  static_children: HashMap<String, Node<T>>,
  param_child: Option<Box<Node<T>>>,
  route: Option<Route<T>>,
}

#[derive(Debug)]
struct Route<T> {
  param_names: Vec<String>,
  value: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
  Static(String),
  Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteInsertError {
  #[error("route `{template}` is already registered")]
  Duplicate { template: String },
  #[error("route `{template}` has a malformed segment `{segment}`")]
  MalformedSegment { template: String, segment: String },
}

/// Captured path parameters, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
  #[must_use]
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .0
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// A successful lookup.
#[derive(Debug)]
pub struct Match<'r, T> {
  pub value: &'r T,
  pub params: PathParams,
}

impl<T> Default for Node<T> {
  fn default() -> Self {
    Self {
      static_children: HashMap::new(),
      param_child: None,
      route: None,
    }
  }
}

impl<T> Default for Router<T> {
  fn default() -> Self {
    Self { root: Node::default() }
  }
}

impl<T> Router<T> {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `value` under a path template. Placeholders are written as `{name}`.
  pub fn insert(&mut self, template: &str, value: T) -> Result<(), RouteInsertError> {
    let segments = parse_template(template)?;

    let mut current = &mut self.root;
    let mut param_names = vec![];
    for segment in segments {
      current = match segment {
        Segment::Static(name) => current.static_children.entry(name).or_default(),
        Segment::Param(name) => {
          param_names.push(name);
          current.param_child.get_or_insert_with(Box::default).as_mut()
        }
      };
    }

    if current.route.is_some() {
      return Err(RouteInsertError::Duplicate {
        template: template.to_string(),
      });
    }
    current.route = Some(Route { param_names, value });
    Ok(())
  }

  /// Matches a concrete request path. Static segments take precedence over
  /// placeholders; captured segments are percent-decoded.
  pub fn at(&self, path: &str) -> Option<Match<'_, T>> {
    let normalized = normalize_path(path);
    let segments = normalized.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>();

    let mut captured = vec![];
    let route = Self::traverse_and_match(&self.root, &segments, &mut captured)?;
    let params = route.param_names.iter().cloned().zip(captured).collect();

    Some(Match {
      value: &route.value,
      params: PathParams(params),
    })
  }

  fn traverse_and_match<'a>(node: &'a Node<T>, segments: &[&str], captured: &mut Vec<String>) -> Option<&'a Route<T>> {
    let Some((segment, remaining)) = segments.split_first() else {
      return node.route.as_ref();
    };

    if let Some(child) = node.static_children.get(*segment)
      && let Some(found) = Self::traverse_and_match(child, remaining, captured)
    {
      return Some(found);
    }

    if let Some(param_child) = &node.param_child {
      let checkpoint = captured.len();
      captured.push(percent_decode_str(segment).decode_utf8_lossy().into_owned());

      if let Some(found) = Self::traverse_and_match(param_child, remaining, captured) {
        return Some(found);
      }

      captured.truncate(checkpoint);
    }

    None
  }
}

fn parse_template(template: &str) -> Result<Vec<Segment>, RouteInsertError> {
  let malformed = |segment: &str| RouteInsertError::MalformedSegment {
    template: template.to_string(),
    segment: segment.to_string(),
  };

  normalize_path(template)
    .split('/')
    .filter(|s| !s.is_empty())
    .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
      Some(name) if !name.is_empty() && !name.contains(['{', '}']) => Ok(Segment::Param(name.to_string())),
      Some(_) => Err(malformed(segment)),
      None if segment.contains(['{', '}']) => Err(malformed(segment)),
      None => Ok(Segment::Static(segment.to_string())),
    })
    .collect()
}

/// Collapses repeated slashes and strips a trailing slash, keeping `/` for the root.
#[must_use]
pub fn normalize_path(path: &str) -> String {
  let mut normalized = String::with_capacity(path.len() + 1);
  let mut prev_slash = false;

  if !path.starts_with('/') {
    normalized.push('/');
    prev_slash = true;
  }

  for ch in path.chars() {
    if ch == '/' {
      if !prev_slash {
        normalized.push('/');
      }
      prev_slash = true;
    } else {
      normalized.push(ch);
      prev_slash = false;
    }
  }

  if normalized.len() > 1 && normalized.ends_with('/') {
    normalized.pop();
  }

  normalized
}
