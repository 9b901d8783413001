//! [`Party`] definitions.

use common::define_id;
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use super::{Entity, Version};

/// Party participating in reporting, like a country or an organisation.
#[derive(Clone, Debug, PartialEq)]
pub struct Party {
    /// ID of this [`Party`].
    pub id: Id,

    /// [`TypeId`] of this [`Party`].
    pub type_id: Option<TypeId>,

    /// [`Name`] of this [`Party`].
    pub name: Option<Name>,

    /// Current [`Version`] of this [`Party`].
    pub version: Option<Version>,
}

impl Entity for Party {
    type Id = Id;
    type Draft = Draft;

    fn id(&self) -> Id {
        self.id
    }
}

/// Caller-supplied attributes of a [`Party`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    /// [`TypeId`] of the [`Party`].
    pub type_id: Option<TypeId>,

    /// [`Name`] of the [`Party`].
    pub name: Option<Name>,
}

define_id! {
    #[doc = "ID of a [`Party`]."]
    struct Id;
}

define_id! {
    #[doc = "ID of a type of a [`Party`]."]
    struct TypeId;
}

/// Name of a [`Party`].
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
