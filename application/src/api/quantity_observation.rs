//! [`QuantityObservation`]-related definitions.

use serde::{Deserialize, Serialize};
use service::{domain, read};

use crate::{define_error, Error};

use super::Dto;

/// JSON representation of a [`domain::QuantityObservation`].
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityObservation {
    /// ID of the observation.
    pub id: Option<i64>,

    /// ID of the task produced the observation.
    pub task_id: Option<i64>,

    /// ID of the party reported the observation.
    pub party_id: Option<i64>,

    /// ID of the database the observation is taken from.
    pub database_id: Option<i64>,

    /// ID of the reporting table the observation belongs to.
    pub reporting_table_id: Option<i64>,

    /// ID of the reporting variable observed.
    pub reporting_variable_id: Option<i64>,

    /// Year the observation is made in.
    pub year: Option<i32>,

    /// Observed amount.
    pub amount: Option<f64>,

    /// ID of the unit the amount is measured in.
    pub unit_id: Option<i64>,

    /// Version of the observation.
    pub version: Option<i32>,
}

impl From<domain::QuantityObservation> for QuantityObservation {
    fn from(o: domain::QuantityObservation) -> Self {
        Self {
            id: Some(o.id.into()),
            task_id: o.task_id.map(Into::into),
            party_id: o.party_id.map(Into::into),
            database_id: o.database_id.map(Into::into),
            reporting_table_id: o.reporting_table_id.map(Into::into),
            reporting_variable_id: o.reporting_variable_id.map(Into::into),
            year: o.year,
            amount: o.amount,
            unit_id: o.unit_id.map(Into::into),
            version: o.version.map(Into::into),
        }
    }
}

impl Dto for QuantityObservation {
    type Entity = domain::QuantityObservation;
    type Filter = read::quantity_observation::Filter;

    const NAME: &'static str = "quantity observation";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn version(&self) -> Option<i32> {
        self.version
    }

    fn into_draft(
        self,
    ) -> Result<domain::quantity_observation::Draft, Error> {
        if self.amount.is_some_and(|a| !a.is_finite()) {
            return Err(QuantityObservationError::Amount.into());
        }

        Ok(domain::quantity_observation::Draft {
            task_id: self.task_id.map(Into::into),
            party_id: self.party_id.map(Into::into),
            database_id: self.database_id.map(Into::into),
            reporting_table_id: self.reporting_table_id.map(Into::into),
            reporting_variable_id: self.reporting_variable_id.map(Into::into),
            year: self.year,
            amount: self.amount,
            unit_id: self.unit_id.map(Into::into),
        })
    }
}

define_error! {
    enum QuantityObservationError {
        #[code = "INVALID_AMOUNT"]
        #[status = BAD_REQUEST]
        #[message = "`amount` must be a finite number"]
        Amount,
    }
}
