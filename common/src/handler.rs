//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Both the database layer and the service layer are expressed as
/// [`Handler`]s of operation values, so every use case is a single
/// `execute()` call parametrized by what it operates on.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
