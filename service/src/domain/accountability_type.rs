//! [`AccountabilityType`] definitions.

use common::define_id;
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use super::{Entity, Version};

/// Type of an accountability between two parties, like "reports to".
#[derive(Clone, Debug, PartialEq)]
pub struct AccountabilityType {
    /// ID of this [`AccountabilityType`].
    pub id: Id,

    /// [`Name`] of this [`AccountabilityType`].
    pub name: Option<Name>,

    /// Current [`Version`] of this [`AccountabilityType`].
    pub version: Option<Version>,
}

impl Entity for AccountabilityType {
    type Id = Id;
    type Draft = Draft;

    fn id(&self) -> Id {
        self.id
    }
}

/// Caller-supplied attributes of an [`AccountabilityType`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    /// [`Name`] of the [`AccountabilityType`].
    pub name: Option<Name>,
}

define_id! {
    #[doc = "ID of an [`AccountabilityType`]."]
    struct Id;
}

/// Name of an [`AccountabilityType`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}
