//! Statement-level access to Postgres.

use std::future::Future;

use tokio_postgres::{types::ToSql, Row};
use tracerr::Traced;

use crate::infra::database;

pub use deadpool_postgres::{
    Client as Pooled, CreatePoolError as PoolCreationError, Pool, PoolError,
};
pub use tokio_postgres::Error;

/// Postgres connection the repositories run their SQL on.
///
/// Each call is a single statement with its `$n` placeholders bound to the
/// provided parameters in order.
pub trait Connection {
    /// Runs the `sql` statement and collects all the rows it returns.
    ///
    /// # Errors
    ///
    /// If the statement fails, or no connection is available.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Vec<Row>, Traced<database::Error>>>;

    /// Runs the `sql` statement returning at most one row.
    ///
    /// # Errors
    ///
    /// If the statement fails or returns several rows, or no connection is
    /// available.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Option<Row>, Traced<database::Error>>>;

    /// Runs the `sql` statement and returns the number of rows it affected.
    ///
    /// # Errors
    ///
    /// If the statement fails, or no connection is available.
    fn exec(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<u64, Traced<database::Error>>>;
}
