//! Historic details of a reported location, one per step of its timeline.

use std::{cmp::Ordering, fmt};

use crate::domain::{cover_type, CoverType};

/// Step of a location timeline.
pub trait Timestep {
    /// Returns the number of this step in its timeline.
    fn item_number(&self) -> i64;

    /// Compares this step with the `other` one by their
    /// [`Timestep::item_number()`]s, regardless of any other detail.
    fn cmp_by_item_number(&self, other: &Self) -> Ordering
    where
        Self: Sized,
    {
        self.item_number().cmp(&other.item_number())
    }
}

/// [`CoverType`] of a location at a single [`Timestep`].
#[derive(Clone, Debug, PartialEq)]
pub struct CoverTypeHistory {
    /// Number of the [`Timestep`].
    pub item_number: i64,

    /// Year the [`Timestep`] falls on.
    pub year: Option<i32>,

    /// [`CoverType`] of the location.
    pub cover_type: Option<CoverType>,
}

impl Timestep for CoverTypeHistory {
    fn item_number(&self) -> i64 {
        self.item_number
    }
}

/// Land use category a location is classified into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandUseCategory {
    /// ID of this [`LandUseCategory`].
    pub id: Option<i64>,

    /// ID of the reporting framework defining this [`LandUseCategory`].
    pub reporting_framework_id: Option<i64>,

    /// ID of the parent [`LandUseCategory`], if this one is a subcategory.
    pub parent_land_use_category_id: Option<i64>,

    /// [`CoverType`] this [`LandUseCategory`] applies to.
    pub cover_type_id: Option<cover_type::Id>,

    /// Name of this [`LandUseCategory`].
    pub name: Option<String>,
}

/// Flux of some type between two pools, as reported for a [`Timestep`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FluxReportingResult {
    /// ID of the flux type.
    pub flux_type_id: Option<i64>,

    /// ID of the pool the flux leaves.
    pub source_pool_id: Option<i64>,

    /// ID of the pool the flux enters.
    pub sink_pool_id: Option<i64>,

    /// Amount of the flux.
    pub flux: Option<f64>,
}

/// [`LandUseCategory`] of a location at a single [`Timestep`], along with the
/// fluxes reported for it.
///
/// Displayed as its one-line summary, with the missing details shown as
/// `null`.
#[derive(Clone, Debug, PartialEq)]
pub struct LandUseFluxesHistory {
    /// Number of the [`Timestep`].
    pub item_number: i64,

    /// Year the [`Timestep`] falls on.
    pub year: Option<i32>,

    /// [`LandUseCategory`] of the location.
    pub land_use_category: Option<LandUseCategory>,

    /// Fluxes reported for the [`Timestep`].
    pub fluxes: Vec<FluxReportingResult>,
}

impl Timestep for LandUseFluxesHistory {
    fn item_number(&self) -> i64 {
        self.item_number
    }
}

impl fmt::Display for LandUseFluxesHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestep: {}, Year: ", self.item_number)?;
        match self.year {
            Some(year) => write!(f, "{year}")?,
            None => f.write_str("null")?,
        }
        f.write_str(", Land Use: ")?;
        match self.land_use_category.as_ref().and_then(|c| c.name.as_ref()) {
            Some(name) => f.write_str(name)?,
            None => f.write_str("null")?,
        }
        f.write_str(" Fluxes History")
    }
}
