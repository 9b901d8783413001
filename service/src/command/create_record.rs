//! [`Command`] for creating a new [`Entity`].

use std::{error::Error as StdError, fmt, marker::PhantomData};

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::Entity,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Entity`] out of its
/// [`Entity::Draft`].
///
/// Returns the created [`Entity`] as it has been stored.
#[derive(Clone, Debug)]
pub struct CreateRecord<T: Entity> {
    /// Attributes of the new [`Entity`].
    pub draft: T::Draft,

    /// Type of the created [`Entity`].
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> CreateRecord<T> {
    /// Creates a new [`CreateRecord`] [`Command`] out of the provided
    /// [`Entity::Draft`].
    #[must_use]
    pub fn new(draft: T::Draft) -> Self {
        Self {
            draft,
            _entity: PhantomData,
        }
    }
}

impl<Db, T> Command<CreateRecord<T>> for Service<Db>
where
    T: Entity,
    Db: Database<
            Insert<T::Draft>,
            Ok = T::Id,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<T>, T::Id>>,
            Ok = Option<T>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = T;
    type Err = Traced<ExecutionError<T::Id>>;

    async fn execute(
        &self,
        cmd: CreateRecord<T>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let id = self
            .database()
            .execute(Insert(cmd.draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?;

        self.database()
            .execute(Select(By::<Option<T>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?
            .ok_or(E::Vanished(id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CreateRecord`] [`Command`] execution.
#[derive(Debug)]
pub enum ExecutionError<Id> {
    /// [`Database`] error.
    Db(database::Error),

    /// Inserted [`Entity`] has disappeared before it could be read back.
    Vanished(Id),
}

impl<Id: fmt::Display> fmt::Display for ExecutionError<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Db(e) => write!(f, "`Database` operation failed: {e}"),
            Self::Vanished(id) => {
                write!(f, "Record(id: {id}) vanished right after insertion")
            }
        }
    }
}

impl<Id: fmt::Debug + fmt::Display> StdError for ExecutionError<Id> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Db(e) => Some(e),
            Self::Vanished(_) => None,
        }
    }
}

impl<Id> From<database::Error> for ExecutionError<Id> {
    fn from(e: database::Error) -> Self {
        Self::Db(e)
    }
}
