//! [`Query`] collection related to [`AccountabilityRule`] records.

use common::operations::By;

use crate::{
    domain::{accountability_rule, AccountabilityRule},
    read::accountability_rule::Filter,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`AccountabilityRule`] by its [`accountability_rule::Id`].
pub type ById =
    DatabaseQuery<By<Option<AccountabilityRule>, accountability_rule::Id>>;

/// Queries a list of [`AccountabilityRule`]s matching a [`Filter`].
pub type List = DatabaseQuery<By<Vec<AccountabilityRule>, Filter>>;
