//! [`Query`] collection related to [`Party`] records.

use common::operations::By;

use crate::{
    domain::{party, Party},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Party`] by its [`party::Id`].
pub type ById = DatabaseQuery<By<Option<Party>, party::Id>>;

/// Queries a list of [`Party`]s matching a [`read::party::Filter`].
pub type List = DatabaseQuery<By<Vec<Party>, read::party::Filter>>;
