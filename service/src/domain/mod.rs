//! Domain definitions.

pub mod accountability_rule;
pub mod accountability_type;
pub mod cover_type;
pub mod party;
pub mod quantity_observation;

use std::{cmp::Ordering, fmt, str::FromStr};

use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

pub use self::{
    accountability_rule::AccountabilityRule,
    accountability_type::AccountabilityType, cover_type::CoverType,
    party::Party, quantity_observation::QuantityObservation,
};

/// Record persisted in a store.
///
/// Records are ordered by their [`Entity::Id`] only, see
/// [`Entity::cmp_by_id()`].
pub trait Entity {
    /// Identifier of this [`Entity`] assigned by the store.
    type Id: Copy + fmt::Debug + Display + FromStr + Into<i64>;

    /// Caller-supplied attributes of this [`Entity`], without the ones
    /// assigned by the store.
    type Draft;

    /// Returns the [`Entity::Id`] of this [`Entity`].
    fn id(&self) -> Self::Id;

    /// Compares this [`Entity`] with the `other` one by their
    /// [`Entity::Id`]s, regardless of any other attribute.
    fn cmp_by_id(&self, other: &Self) -> Ordering
    where
        Self: Sized,
    {
        let (this, other): (i64, i64) = (self.id().into(), other.id().into());
        this.cmp(&other)
    }
}

/// Optimistic version of an [`Entity`].
///
/// Starts from `1` and is incremented by the store on every successful
/// update.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Version(i32);

/// Revision of an [`Entity`] replacing its [`Entity::Draft`] attributes.
///
/// Applies only if the stored [`Entity`] is still of the given [`Version`].
#[derive(Clone, Debug)]
pub struct Revision<Id, D> {
    /// ID of the [`Entity`] to be revised.
    pub id: Id,

    /// [`Version`] of the [`Entity`] the revision is based on.
    pub version: Version,

    /// New attributes of the [`Entity`].
    pub draft: D,
}
