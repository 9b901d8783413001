//! [`QuantityObservation`] definitions.

use common::define_id;

use super::{party, Entity, Version};

/// Quantity reported by a [`Party`] for a reporting variable in some year.
///
/// [`Party`]: super::Party
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantityObservation {
    /// ID of this [`QuantityObservation`].
    pub id: Id,

    /// ID of the task this [`QuantityObservation`] was produced by.
    pub task_id: Option<TaskId>,

    /// ID of the reporting party.
    pub party_id: Option<party::Id>,

    /// ID of the database this [`QuantityObservation`] was taken from.
    pub database_id: Option<DatabaseId>,

    /// ID of the reporting table.
    pub reporting_table_id: Option<ReportingTableId>,

    /// ID of the reporting variable.
    pub reporting_variable_id: Option<ReportingVariableId>,

    /// [`Year`] of this [`QuantityObservation`].
    pub year: Option<Year>,

    /// Observed [`Amount`].
    pub amount: Option<Amount>,

    /// ID of the unit the [`Amount`] is measured in.
    pub unit_id: Option<UnitId>,

    /// Current [`Version`] of this [`QuantityObservation`].
    pub version: Option<Version>,
}

impl Entity for QuantityObservation {
    type Id = Id;
    type Draft = Draft;

    fn id(&self) -> Id {
        self.id
    }
}

/// Caller-supplied attributes of a [`QuantityObservation`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Draft {
    /// ID of the task the [`QuantityObservation`] was produced by.
    pub task_id: Option<TaskId>,

    /// ID of the reporting party.
    pub party_id: Option<party::Id>,

    /// ID of the database the [`QuantityObservation`] was taken from.
    pub database_id: Option<DatabaseId>,

    /// ID of the reporting table.
    pub reporting_table_id: Option<ReportingTableId>,

    /// ID of the reporting variable.
    pub reporting_variable_id: Option<ReportingVariableId>,

    /// [`Year`] of the [`QuantityObservation`].
    pub year: Option<Year>,

    /// Observed [`Amount`].
    pub amount: Option<Amount>,

    /// ID of the unit the [`Amount`] is measured in.
    pub unit_id: Option<UnitId>,
}

define_id! {
    #[doc = "ID of a [`QuantityObservation`]."]
    struct Id;
}

define_id! {
    #[doc = "ID of a task producing [`QuantityObservation`]s."]
    struct TaskId;
}

define_id! {
    #[doc = "ID of a database [`QuantityObservation`]s are taken from."]
    struct DatabaseId;
}

define_id! {
    #[doc = "ID of a reporting table."]
    struct ReportingTableId;
}

define_id! {
    #[doc = "ID of a reporting variable."]
    struct ReportingVariableId;
}

define_id! {
    #[doc = "ID of a unit of measurement."]
    struct UnitId;
}

/// Year of a [`QuantityObservation`].
pub type Year = i32;

/// Amount of a [`QuantityObservation`].
pub type Amount = f64;
