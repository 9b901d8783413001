//! [`Query`] collection related to [`CoverType`] records.

use common::operations::By;

use crate::{
    domain::{cover_type, CoverType},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`CoverType`] by its [`cover_type::Id`].
pub type ById = DatabaseQuery<By<Option<CoverType>, cover_type::Id>>;

/// Queries a list of [`CoverType`]s matching a [`read::cover_type::Filter`].
pub type List = DatabaseQuery<By<Vec<CoverType>, read::cover_type::Filter>>;
