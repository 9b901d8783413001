//! [`Database`]-related implementations.

#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
///
/// Implemented by a database client for every operation it's able to run as
/// a single statement (or a transaction control one).
pub use common::Handler as Database;

/// [`Database`] error.
///
/// Any persistence failure: connectivity, constraint violation, malformed SQL
/// or an unreadable result row. Never retried by the [`Database`] itself.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),
}
