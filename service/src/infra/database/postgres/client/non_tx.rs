//! [`NonTx`] client definitions.

use tokio_postgres::{types::ToSql, Row};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Autocommit Postgres client.
///
/// Every statement borrows its own connection out of the pool and gives it
/// back right after, so concurrent requests only contend on the pool size.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// Shared pool of connections.
    pub(crate) pool: connection::Pool,
}

impl NonTx {
    /// Wraps the provided `pool` into a [`NonTx`] client.
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self { pool }
    }

    /// Borrows a connection out of the pool.
    ///
    /// # Errors
    ///
    /// If the pool is closed, timed out, or fails to connect.
    pub(crate) async fn pooled(
        &self,
    ) -> Result<connection::Pooled, Traced<database::Error>> {
        self.pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl Connection for NonTx {
    async fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>> {
        let conn = self.pooled().await.map_err(tracerr::wrap!())?;
        conn.query(sql, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>> {
        let conn = self.pooled().await.map_err(tracerr::wrap!())?;
        conn.query_opt(sql, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>> {
        let conn = self.pooled().await.map_err(tracerr::wrap!())?;
        conn.execute(sql, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}
