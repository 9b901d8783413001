//! [`Tx`] client definitions.

use std::{fmt, sync::Arc};

use futures::{FutureExt as _, TryFutureExt as _};
use ouroboros::self_referencing;
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

use super::NonTx;

/// Transactional Postgres client.
///
/// All its clones share one transaction. It's begun by the first statement
/// and rolled back on drop unless [`Tx::commit()`]ed.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Client to borrow the transaction connection from.
    non_tx: NonTx,

    /// Transaction, once begun.
    begun: Arc<RwLock<Option<Begun>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client borrowing its connection from the pool of
    /// the provided [`NonTx`] client.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            non_tx: client,
            begun: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the transaction of this [`Tx`], beginning it on the first
    /// call.
    async fn begun(
        &self,
    ) -> Result<RwLockReadGuard<'_, Begun>, Traced<database::Error>> {
        let read = self.begun.read().await;
        let guard = if read.is_some() {
            read
        } else {
            drop(read);

            let mut write = self.begun.write().await;
            if write.is_none() {
                let conn =
                    self.non_tx.pooled().await.map_err(tracerr::wrap!())?;
                *write =
                    Some(Begun::start(conn).await.map_err(tracerr::wrap!())?);
            }
            write.downgrade()
        };

        Ok(RwLockReadGuard::map(guard, |b| {
            b.as_ref().expect("set above and never taken while read")
        }))
    }

    /// Commits the transaction of this [`Tx`] client.
    ///
    /// Committing a transaction no statement has been run in does nothing.
    ///
    /// # Errors
    ///
    /// If Postgres fails to commit.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let begun = self.begun.write().await.take();
        match begun {
            Some(b) => b.commit().await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }
}

impl Connection for Tx {
    async fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>> {
        let begun = self.begun().await.map_err(tracerr::wrap!())?;
        begun
            .txn()
            .query(sql, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>> {
        let begun = self.begun().await.map_err(tracerr::wrap!())?;
        begun
            .txn()
            .query_opt(sql, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>> {
        let begun = self.begun().await.map_err(tracerr::wrap!())?;
        begun
            .txn()
            .execute(sql, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

/// Transaction holding the pooled connection it runs on.
///
/// The transaction is [`None`] only after being committed.
#[self_referencing]
struct Begun {
    /// Connection borrowed out of the pool.
    conn: connection::Pooled,

    /// Transaction on the `conn`.
    #[borrows(mut conn)]
    #[not_covariant]
    txn: Option<deadpool_postgres::Transaction<'this>>,
}

impl fmt::Debug for Begun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Begun").finish_non_exhaustive()
    }
}

impl Begun {
    /// Begins a transaction on the provided pooled `conn`ection.
    async fn start(
        conn: connection::Pooled,
    ) -> Result<Self, Traced<database::Error>> {
        Self::try_new_async_send(conn, |c| {
            c.transaction().map_ok(Some).boxed()
        })
        .await
        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
        .map_err(tracerr::map_from)
    }

    /// Returns the running transaction.
    fn txn(&self) -> &deadpool_postgres::Transaction<'_> {
        self.with_txn(|t| t.as_ref().expect("used after commit"))
    }

    /// Commits the transaction and returns its connection to the pool.
    async fn commit(mut self) -> Result<(), Traced<database::Error>> {
        #[expect(
            clippy::redundant_closure_for_method_calls,
            reason = "`Option::take` can't be passed due to variance"
        )]
        let txn = self.with_txn_mut(|t| t.take());
        match txn {
            Some(t) => t
                .commit()
                .await
                .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                .map_err(tracerr::map_from),
            None => Ok(()),
        }
    }
}
