//! [`Query`] collection related to [`QuantityObservation`] records.

use common::operations::By;

use crate::{
    domain::{quantity_observation, QuantityObservation},
    read::quantity_observation::Filter,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`QuantityObservation`] by its [`quantity_observation::Id`].
pub type ById =
    DatabaseQuery<By<Option<QuantityObservation>, quantity_observation::Id>>;

/// Queries a list of [`QuantityObservation`]s matching a [`Filter`].
pub type List = DatabaseQuery<By<Vec<QuantityObservation>, Filter>>;
