//! [`WhereClause`] definition.

use std::fmt;

use itertools::Itertools as _;
use postgres_types::ToSql;

use super::FuzzPattern;

/// Builder of a SQL `WHERE` clause out of optional conditions.
///
/// Absent conditions are skipped, while the present ones are joined with
/// `AND` in the order they were added. Integers are rendered inline, and any
/// text is bound as a positional parameter, available via
/// [`WhereClause::params()`].
///
/// Renders as an empty string if no condition is present, so may always be
/// appended to a base statement.
#[derive(Clone, Debug, Default)]
pub struct WhereClause {
    /// Rendered predicates.
    predicates: Vec<String>,

    /// Values bound to the positional parameters of the predicates.
    bound: Vec<FuzzPattern>,
}

impl WhereClause {
    /// Requires the `column` to be one of the provided `values`.
    ///
    /// The `values` are rendered in ascending order. An empty list matches
    /// nothing.
    #[must_use]
    pub fn any_of<T>(mut self, column: &str, values: Option<&[T]>) -> Self
    where
        T: fmt::Display + Ord,
    {
        if let Some(values) = values {
            self.predicates.push(if values.is_empty() {
                "FALSE".into()
            } else {
                format!("{column} IN ({})", values.iter().sorted().format(","))
            });
        }
        self
    }

    /// Requires the `column` to be equal to the provided `value`.
    #[must_use]
    pub fn eq<T>(mut self, column: &str, value: Option<T>) -> Self
    where
        T: fmt::Display,
    {
        if let Some(value) = value {
            self.predicates.push(format!("{column} = {value}"));
        }
        self
    }

    /// Requires the `column` to contain any of the words of the provided
    /// `text`, case-insensitively.
    #[must_use]
    pub fn similar_to(mut self, column: &str, text: Option<&str>) -> Self {
        if let Some(text) = text {
            self.bound.push(FuzzPattern::new(text));
            self.predicates.push(format!(
                "LOWER({column}) SIMILAR TO LOWER(${}::VARCHAR)",
                self.bound.len(),
            ));
        }
        self
    }

    /// Indicates whether this [`WhereClause`] has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the values to be bound to the positional parameters of this
    /// [`WhereClause`].
    #[must_use]
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.bound
            .iter()
            .map(|p| -> &(dyn ToSql + Sync) { p })
            .collect()
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, " WHERE {}", self.predicates.iter().format(" AND "))
    }
}

#[cfg(test)]
mod spec {
    use super::WhereClause;

    #[test]
    fn empty_without_conditions() {
        let clause = WhereClause::default()
            .any_of::<i64>("id", None)
            .eq::<i64>("party_type_id", None)
            .similar_to("name", None);

        assert!(clause.is_empty());
        assert_eq!(clause.to_string(), "");
        assert!(clause.params().is_empty());
    }

    #[test]
    fn sorts_list_values() {
        let clause = WhereClause::default().any_of("id", Some(&[3, 1, 2][..]));

        assert_eq!(clause.to_string(), " WHERE id IN (1,2,3)");
    }

    #[test]
    fn empty_list_matches_nothing() {
        let clause = WhereClause::default().any_of::<i64>("id", Some(&[]));

        assert_eq!(clause.to_string(), " WHERE FALSE");
    }

    #[test]
    fn joins_in_order_of_addition() {
        let clause = WhereClause::default()
            .eq("accountability_type_id", Some(5))
            .eq::<i64>("parent_party_type_id", None)
            .eq("subsidiary_party_type_id", Some(2));

        assert_eq!(
            clause.to_string(),
            " WHERE accountability_type_id = 5 \
               AND subsidiary_party_type_id = 2",
        );
    }

    #[test]
    fn binds_text() {
        let clause = WhereClause::default()
            .similar_to("name", Some("Kenya"))
            .eq("party_type_id", Some(1))
            .similar_to("code", Some("KE"));

        assert_eq!(
            clause.to_string(),
            " WHERE LOWER(name) SIMILAR TO LOWER($1::VARCHAR) \
               AND party_type_id = 1 \
               AND LOWER(code) SIMILAR TO LOWER($2::VARCHAR)",
        );
        assert_eq!(clause.params().len(), 2);
    }
}
