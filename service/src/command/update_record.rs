//! [`Command`] for updating an existing [`Entity`].

use std::{error::Error as StdError, fmt, marker::PhantomData};

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use tracerr::Traced;

use crate::{
    domain::{Entity, Revision, Version},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Entity`] with a [`Revision`].
///
/// The [`Revision`] applies only if the stored [`Entity`] is still of the
/// [`Version`] the [`Revision`] is based on. Returns the updated [`Entity`].
#[derive(Clone, Debug)]
pub struct UpdateRecord<T: Entity> {
    /// [`Revision`] to apply.
    pub revision: Revision<T::Id, T::Draft>,

    /// Type of the updated [`Entity`].
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> UpdateRecord<T> {
    /// Creates a new [`UpdateRecord`] [`Command`] applying the provided
    /// [`Revision`].
    #[must_use]
    pub fn new(revision: Revision<T::Id, T::Draft>) -> Self {
        Self {
            revision,
            _entity: PhantomData,
        }
    }
}

impl<Db, T> Command<UpdateRecord<T>> for Service<Db>
where
    T: Entity,
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<T>, T::Id>>,
            Ok = Option<T>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<T, T::Id>>,
            Ok = Option<Version>,
            Err = Traced<database::Error>,
        > + Database<
            Update<Revision<T::Id, T::Draft>>,
            Ok = u64,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = T;
    type Err = Traced<ExecutionError<T::Id>>;

    async fn execute(
        &self,
        cmd: UpdateRecord<T>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let id = cmd.revision.id;
        let expected = cmd.revision.version;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?;

        // Avoid concurrent updates of the same record.
        let actual = tx
            .execute(Lock(By::<T, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;
        if actual != expected {
            return Err(tracerr::new!(E::VersionMismatch {
                id,
                expected,
                actual,
            }));
        }

        let updated = tx
            .execute(Update(cmd.revision))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?;
        if updated == 0 {
            let actual = tx
                .execute(Lock(By::<T, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?
                .ok_or(E::NotExists(id))
                .map_err(tracerr::wrap!())?;
            return Err(tracerr::new!(E::VersionMismatch {
                id,
                expected,
                actual,
            }));
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?;

        self.database()
            .execute(Select(By::<Option<T>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateRecord`] [`Command`] execution.
#[derive(Debug)]
pub enum ExecutionError<Id> {
    /// [`Database`] error.
    Db(database::Error),

    /// [`Entity`] to be updated doesn't exist.
    NotExists(Id),

    /// [`Entity`] has been updated since the [`Version`] the [`Revision`] is
    /// based on.
    VersionMismatch {
        /// ID of the [`Entity`].
        id: Id,

        /// [`Version`] the [`Revision`] is based on.
        expected: Version,

        /// Actual [`Version`] of the stored [`Entity`].
        actual: Version,
    },
}

impl<Id: fmt::Display> fmt::Display for ExecutionError<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Db(e) => write!(f, "`Database` operation failed: {e}"),
            Self::NotExists(id) => write!(f, "Record(id: {id}) does not exist"),
            Self::VersionMismatch {
                id,
                expected,
                actual,
            } => write!(
                f,
                "Record(id: {id}) is of version {actual}, \
                 while version {expected} is expected",
            ),
        }
    }
}

impl<Id: fmt::Debug + fmt::Display> StdError for ExecutionError<Id> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Db(e) => Some(e),
            Self::NotExists(_) | Self::VersionMismatch { .. } => None,
        }
    }
}

impl<Id> From<database::Error> for ExecutionError<Id> {
    fn from(e: database::Error) -> Self {
        Self::Db(e)
    }
}
