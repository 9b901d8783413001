//! [`QuantityObservation`]-related read definitions.

use common::{FromParams, ParseError, Params};

use crate::domain::{party, quantity_observation as observation};
#[cfg(doc)]
use crate::domain::QuantityObservation;

/// Filter of [`QuantityObservation`] records.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// IDs the [`QuantityObservation`] should be one of.
    pub ids: Option<Vec<observation::Id>>,

    /// Task the [`QuantityObservation`] should be produced by.
    pub task_id: Option<observation::TaskId>,

    /// Party the [`QuantityObservation`] should be reported by.
    pub party_id: Option<party::Id>,

    /// Database the [`QuantityObservation`] should be taken from.
    pub database_id: Option<observation::DatabaseId>,

    /// Reporting table the [`QuantityObservation`] should belong to.
    pub reporting_table_id: Option<observation::ReportingTableId>,

    /// Reporting variable the [`QuantityObservation`] should be of.
    pub reporting_variable_id: Option<observation::ReportingVariableId>,

    /// Year the [`QuantityObservation`] should be made in.
    pub year: Option<observation::Year>,

    /// Unit the [`QuantityObservation`] should be measured in.
    pub unit_id: Option<observation::UnitId>,
}

impl FromParams for Filter {
    fn from_params(params: &Params) -> Result<Self, ParseError> {
        Ok(Self {
            ids: params.list("ids")?,
            task_id: params.single("taskId")?,
            party_id: params.single("partyId")?,
            database_id: params.single("databaseId")?,
            reporting_table_id: params.single("reportingTableId")?,
            reporting_variable_id: params.single("reportingVariableId")?,
            year: params.single("year")?,
            unit_id: params.single("unitId")?,
        })
    }
}
