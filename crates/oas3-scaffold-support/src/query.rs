/// Decoded query string that keeps every occurrence of a key, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
  pairs: Vec<(String, String)>,
}

impl QueryParams {
  #[must_use]
  pub fn parse(query: Option<&str>) -> Self {
    let pairs = query
      .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
      .unwrap_or_default();
    Self { pairs }
  }

  #[must_use]
  pub fn first(&self, name: &str) -> Option<&str> {
    self
      .pairs
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    self
      .pairs
      .iter()
      .filter(move |(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.pairs.iter().any(|(key, _)| key == name)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }
}
