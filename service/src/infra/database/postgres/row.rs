//! Result row mapping.
//!
//! Rows are read by column names only, so the mapping never depends on the
//! order of columns in a statement.

use derive_more::{Display, Error as StdError};
use postgres_types::FromSql;
use tokio_postgres::Row;

/// Accessor of named columns of a single result row.
///
/// Every accessor returns [`None`] both for a `NULL` value and for a column
/// missing in the row.
pub trait Columns {
    /// Reads the `INT8` column with the provided `name`.
    ///
    /// # Errors
    ///
    /// If the column is of another SQL type.
    fn long(&self, name: &str) -> Result<Option<i64>, Error>;

    /// Reads the `INT4` column with the provided `name`.
    ///
    /// # Errors
    ///
    /// If the column is of another SQL type.
    fn int(&self, name: &str) -> Result<Option<i32>, Error>;

    /// Reads the `FLOAT8` column with the provided `name`.
    ///
    /// # Errors
    ///
    /// If the column is of another SQL type.
    fn double(&self, name: &str) -> Result<Option<f64>, Error>;

    /// Reads the textual column with the provided `name`.
    ///
    /// # Errors
    ///
    /// If the column is of non-textual SQL type.
    fn string(&self, name: &str) -> Result<Option<String>, Error>;

    /// Reads the identity column with the provided `name`, which is required
    /// to be present.
    ///
    /// # Errors
    ///
    /// - If the column is missing or `NULL`.
    /// - If the column is not of `INT8` SQL type.
    fn identity(&self, name: &str) -> Result<i64, Error> {
        self.long(name)?
            .ok_or_else(|| Error::MissingIdentity(name.to_owned()))
    }
}

impl Columns for Row {
    fn long(&self, name: &str) -> Result<Option<i64>, Error> {
        column(self, name)
    }

    fn int(&self, name: &str) -> Result<Option<i32>, Error> {
        column(self, name)
    }

    fn double(&self, name: &str) -> Result<Option<f64>, Error> {
        column(self, name)
    }

    fn string(&self, name: &str) -> Result<Option<String>, Error> {
        column(self, name)
    }
}

/// Reads the nullable column with the provided `name` out of the given
/// [`Row`].
fn column<'r, T>(row: &'r Row, name: &str) -> Result<Option<T>, Error>
where
    T: FromSql<'r>,
{
    if !row.columns().iter().any(|c| c.name() == name) {
        return Ok(None);
    }
    row.try_get::<_, Option<T>>(name).map_err(|e| Error::Column {
        name: name.to_owned(),
        reason: e.to_string(),
    })
}

/// Type constructible out of a single result row.
pub trait FromColumns: Sized {
    /// Constructs this type out of the provided [`Columns`].
    ///
    /// # Errors
    ///
    /// If any of the [`Columns`] is missing while required, or is of an
    /// unexpected SQL type.
    fn from_columns(row: &impl Columns) -> Result<Self, Error>;
}

/// Reads the `id` column of a row returned by an `INSERT … RETURNING id`
/// statement.
///
/// # Errors
///
/// If no row has been returned, or it has no `id`.
pub fn returned_id<T>(row: Option<&impl Columns>) -> Result<T, Error>
where
    T: From<i64>,
{
    row.ok_or_else(|| Error::MissingIdentity("id".into()))?
        .identity("id")
        .map(T::from)
}

/// Error of mapping a result row.
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Required identity column is missing or `NULL`.
    #[display("identity column `{_0}` is missing")]
    MissingIdentity(#[error(not(source))] String),

    /// Column is of an unexpected SQL type.
    #[display("cannot read column `{name}`: {reason}")]
    Column {
        /// Name of the column.
        name: String,

        /// Description of the failure.
        reason: String,
    },
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory row double.

    use std::collections::HashMap;

    use super::{Columns, Error};

    /// Value of a [`Row`] column.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Value {
        Long(i64),
        Int(i32),
        Double(f64),
        String(String),
        Null,
    }

    /// In-memory row of named [`Value`]s.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct Row(HashMap<&'static str, Value>);

    impl Row {
        /// Sets the column with the provided `name` to the given `value`.
        pub(crate) fn with(mut self, name: &'static str, value: Value) -> Self {
            drop(self.0.insert(name, value));
            self
        }

        fn get<T>(
            &self,
            name: &str,
            read: impl FnOnce(&Value) -> Option<T>,
        ) -> Result<Option<T>, Error> {
            match self.0.get(name) {
                None | Some(Value::Null) => Ok(None),
                Some(v) => read(v).map(Some).ok_or_else(|| Error::Column {
                    name: name.to_owned(),
                    reason: format!("unexpected {v:?}"),
                }),
            }
        }
    }

    impl Columns for Row {
        fn long(&self, name: &str) -> Result<Option<i64>, Error> {
            self.get(name, |v| match v {
                Value::Long(v) => Some(*v),
                _ => None,
            })
        }

        fn int(&self, name: &str) -> Result<Option<i32>, Error> {
            self.get(name, |v| match v {
                Value::Int(v) => Some(*v),
                _ => None,
            })
        }

        fn double(&self, name: &str) -> Result<Option<f64>, Error> {
            self.get(name, |v| match v {
                Value::Double(v) => Some(*v),
                _ => None,
            })
        }

        fn string(&self, name: &str) -> Result<Option<String>, Error> {
            self.get(name, |v| match v {
                Value::String(v) => Some(v.clone()),
                _ => None,
            })
        }
    }
}
