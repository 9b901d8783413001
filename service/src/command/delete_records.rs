//! [`Command`] for deleting [`Entity`] records.

use common::operations::{By, Delete};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Entity;
use crate::{
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting `T` records by `B`, either an ID or a filter.
///
/// Returns the number of deleted records, which is zero if nothing matched.
#[derive(Clone, Copy, Debug)]
pub struct DeleteRecords<T>(T);

impl<T, B> DeleteRecords<By<T, B>> {
    /// Creates a new [`DeleteRecords`] [`Command`] deleting `T` records by
    /// the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, T, B> Command<DeleteRecords<By<T, B>>> for Service<Db>
where
    Db: Database<Delete<By<T, B>>, Ok = u64, Err = Traced<database::Error>>,
{
    type Ok = u64;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteRecords(by): DeleteRecords<By<T, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Delete(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteRecords`] [`Command`] execution.
pub type ExecutionError = database::Error;
