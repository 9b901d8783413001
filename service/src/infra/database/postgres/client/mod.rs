//! Postgres database clients sharing a single [`connection::Pool`].
//!
//! [`connection::Pool`]: super::connection::Pool

pub mod non_tx;
pub mod tx;

pub use self::{non_tx::NonTx, tx::Tx};
