//! Request query string [`Params`].

use std::{collections::HashMap, str::FromStr};

use derive_more::{Display, Error};

/// Parameters of a request query string.
///
/// Every value of a repeated key is kept, in the order of appearance.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params(HashMap<String, Vec<String>>);

impl Params {
    /// Returns all the values supplied for the provided `key`, if any.
    #[must_use]
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Parses the list of values supplied for the provided `key`.
    ///
    /// Values may be supplied either as repeated keys (`ids=3&ids=1`) or
    /// comma-separated (`ids=3,1`). The resulting list is sorted in ascending
    /// order.
    ///
    /// # Errors
    ///
    /// With the first value failing to parse as `T`.
    pub fn list<T>(&self, key: &str) -> Result<Option<Vec<T>>, ParseError>
    where
        T: FromStr + Ord,
    {
        let Some(values) = self.values(key) else {
            return Ok(None);
        };

        let mut list = values
            .iter()
            .flat_map(|v| v.split(','))
            .map(|v| parse(key, v))
            .collect::<Result<Vec<T>, _>>()?;
        list.sort_unstable();

        Ok(Some(list))
    }

    /// Parses the single value supplied for the provided `key`.
    ///
    /// If the `key` is repeated, its first value is used.
    ///
    /// # Errors
    ///
    /// If the value fails to parse as `T`.
    pub fn single<T>(&self, key: &str) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
    {
        self.values(key)
            .and_then(<[_]>::first)
            .map(|v| parse(key, v))
            .transpose()
    }

    /// Returns the non-blank text value supplied for the provided `key`, if
    /// any.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values(key)
            .and_then(<[_]>::first)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = HashMap::<_, Vec<_>>::new();
        for (key, value) in iter {
            params.entry(key.into()).or_default().push(value.into());
        }
        Self(params)
    }
}

/// Parses the provided `value` of the request parameter named `key`.
///
/// # Errors
///
/// If the `value` fails to parse as `T`.
pub fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

/// Error of parsing a request parameter.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("invalid value `{value}` of `{key}` parameter")]
pub struct ParseError {
    /// Name of the malformed parameter.
    pub key: String,

    /// Malformed value as it was supplied.
    pub value: String,
}

/// Type constructible from request [`Params`].
pub trait FromParams: Sized {
    /// Constructs this type out of the provided [`Params`].
    ///
    /// # Errors
    ///
    /// With the first recognized parameter failing to parse.
    fn from_params(params: &Params) -> Result<Self, ParseError>;
}

#[cfg(test)]
mod spec {
    use super::{parse, ParseError, Params};

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().copied().collect()
    }

    #[test]
    fn list_is_absent_without_key() {
        assert_eq!(params(&[]).list::<i64>("ids"), Ok(None));
        assert_eq!(params(&[("year", "2020")]).list::<i64>("ids"), Ok(None));
    }

    #[test]
    fn list_is_sorted() {
        assert_eq!(
            params(&[("ids", "3"), ("ids", "1"), ("ids", "2")])
                .list::<i64>("ids"),
            Ok(Some(vec![1, 2, 3])),
        );
        assert_eq!(
            params(&[("ids", "3,1"), ("ids", "2")]).list::<i64>("ids"),
            Ok(Some(vec![1, 2, 3])),
        );
    }

    #[test]
    fn list_keeps_duplicates() {
        assert_eq!(
            params(&[("ids", "2,1,2")]).list::<i64>("ids"),
            Ok(Some(vec![1, 2, 2])),
        );
    }

    #[test]
    fn list_fails_on_first_malformed_value() {
        assert_eq!(
            params(&[("ids", "1"), ("ids", "x"), ("ids", "y")])
                .list::<i64>("ids"),
            Err(ParseError {
                key: "ids".into(),
                value: "x".into(),
            }),
        );
        assert!(params(&[("ids", "")]).list::<i64>("ids").is_err());
        assert!(params(&[("ids", "1,,2")]).list::<i64>("ids").is_err());
    }

    #[test]
    fn single_takes_first_value() {
        assert_eq!(
            params(&[("partyTypeId", "5"), ("partyTypeId", "6")])
                .single::<i64>("partyTypeId"),
            Ok(Some(5)),
        );
        assert_eq!(params(&[]).single::<i64>("partyTypeId"), Ok(None));
    }

    #[test]
    fn single_fails_on_malformed_value() {
        assert_eq!(
            params(&[("year", "twenty")]).single::<i32>("year"),
            Err(ParseError {
                key: "year".into(),
                value: "twenty".into(),
            }),
        );
    }

    #[test]
    fn text_skips_blank_values() {
        assert_eq!(params(&[("name", " Kenya ")]).text("name"), Some("Kenya"));
        assert_eq!(params(&[("name", "  ")]).text("name"), None);
        assert_eq!(params(&[]).text("name"), None);
    }

    #[test]
    fn parse_trims_value() {
        assert_eq!(parse::<i64>("id", " 7 "), Ok(7));
        assert_eq!(
            parse::<i64>("id", "7a").unwrap_err().to_string(),
            "invalid value `7a` of `id` parameter",
        );
    }
}
