use std::{fmt::Display, str::FromStr};

use crate::{error::RequestError, query::QueryParams, router::PathParams};

/// How an array-typed query parameter is spread across the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayStyle {
  /// `?tag=a&tag=b`
  Repeated,
  /// `?tag=a,b`
  Delimited,
}

pub fn parse_param<T>(name: &str, raw: &str) -> Result<T, RequestError>
where
  T: FromStr,
  T::Err: Display,
{
  raw.parse::<T>().map_err(|error| RequestError::invalid_parameter(name, error))
}

pub fn path_param<T>(params: &PathParams, name: &str) -> Result<T, RequestError>
where
  T: FromStr,
  T::Err: Display,
{
  let raw = params
    .get(name)
    .ok_or_else(|| RequestError::invalid_parameter(name, "missing path segment"))?;
  parse_param(name, raw)
}

pub fn query_param<T>(query: &QueryParams, name: &str) -> Result<T, RequestError>
where
  T: FromStr,
  T::Err: Display,
{
  optional_query_param(query, name)?.ok_or_else(|| RequestError::invalid_parameter(name, "required but missing"))
}

pub fn optional_query_param<T>(query: &QueryParams, name: &str) -> Result<Option<T>, RequestError>
where
  T: FromStr,
  T::Err: Display,
{
  query.first(name).map(|raw| parse_param(name, raw)).transpose()
}

pub fn query_values<T>(query: &QueryParams, name: &str, style: ArrayStyle) -> Result<Vec<T>, RequestError>
where
  T: FromStr,
  T::Err: Display,
{
  optional_query_values(query, name, style)?
    .ok_or_else(|| RequestError::invalid_parameter(name, "required but missing"))
}

pub fn optional_query_values<T>(
  query: &QueryParams,
  name: &str,
  style: ArrayStyle,
) -> Result<Option<Vec<T>>, RequestError>
where
  T: FromStr,
  T::Err: Display,
{
  if !query.contains(name) {
    return Ok(None);
  }

  let values = match style {
    ArrayStyle::Repeated => query
      .all(name)
      .map(|raw| parse_param(name, raw))
      .collect::<Result<Vec<_>, _>>()?,
    ArrayStyle::Delimited => query
      .first(name)
      .unwrap_or_default()
      .split(',')
      .filter(|part| !part.is_empty())
      .map(|raw| parse_param(name, raw))
      .collect::<Result<Vec<_>, _>>()?,
  };

  Ok(Some(values))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::router::Router;

  #[test]
  fn coerces_path_parameter() {
    let mut router = Router::new();
    router.insert("/v1/items/{id}", ()).unwrap();

    let matched = router.at("/v1/items/42").unwrap();
    let id: i32 = path_param(&matched.params, "id").unwrap();
    assert_eq!(id, 42);

    let matched = router.at("/v1/items/abc").unwrap();
    let error = path_param::<i32>(&matched.params, "id").unwrap_err();
    assert!(matches!(&error, RequestError::InvalidParameter { name, .. } if name == "id"));
    assert_eq!(error.code(), "invalid_parameter");
  }

  #[test]
  fn required_and_optional_query_parameters() {
    let query = QueryParams::parse(Some("limit=10&verbose=true"));

    assert_eq!(query_param::<u32>(&query, "limit").unwrap(), 10);
    assert_eq!(optional_query_param::<bool>(&query, "verbose").unwrap(), Some(true));
    assert_eq!(optional_query_param::<bool>(&query, "missing").unwrap(), None);
    assert!(matches!(
      query_param::<u32>(&query, "offset"),
      Err(RequestError::InvalidParameter { name, .. }) if name == "offset"
    ));
  }

  #[test]
  fn array_styles() {
    let query = QueryParams::parse(Some("tag=1&tag=2&ids=3,4,5"));

    assert_eq!(
      query_values::<i64>(&query, "tag", ArrayStyle::Repeated).unwrap(),
      vec![1, 2]
    );
    assert_eq!(
      query_values::<i64>(&query, "ids", ArrayStyle::Delimited).unwrap(),
      vec![3, 4, 5]
    );
    assert_eq!(
      optional_query_values::<i64>(&query, "missing", ArrayStyle::Repeated).unwrap(),
      None
    );
    assert!(query_values::<i64>(&query, "missing", ArrayStyle::Delimited).is_err());
  }

  #[test]
  fn one_bad_element_fails_the_whole_array() {
    let query = QueryParams::parse(Some("tag=1&tag=x"));
    assert!(query_values::<i64>(&query, "tag", ArrayStyle::Repeated).is_err());
  }
}
