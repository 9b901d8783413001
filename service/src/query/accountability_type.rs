//! [`Query`] collection related to [`AccountabilityType`] records.

use common::operations::By;

use crate::{
    domain::{accountability_type, AccountabilityType},
    read::accountability_type::Filter,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`AccountabilityType`] by its [`accountability_type::Id`].
pub type ById =
    DatabaseQuery<By<Option<AccountabilityType>, accountability_type::Id>>;

/// Queries a list of [`AccountabilityType`]s matching a [`Filter`].
pub type List = DatabaseQuery<By<Vec<AccountabilityType>, Filter>>;
