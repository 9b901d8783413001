//! [`CoverType`] definitions.

use common::define_id;
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use super::{Entity, Version};

/// Type of a land cover, like forest or grassland.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverType {
    /// ID of this [`CoverType`].
    pub id: Id,

    /// [`Code`] of this [`CoverType`].
    pub code: Option<Code>,

    /// [`Description`] of this [`CoverType`].
    pub description: Option<Description>,

    /// Current [`Version`] of this [`CoverType`].
    pub version: Option<Version>,
}

impl Entity for CoverType {
    type Id = Id;
    type Draft = Draft;

    fn id(&self) -> Id {
        self.id
    }
}

/// Caller-supplied attributes of a [`CoverType`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    /// [`Code`] of the [`CoverType`].
    pub code: Option<Code>,

    /// [`Description`] of the [`CoverType`].
    pub description: Option<Description>,
}

define_id! {
    #[doc = "ID of a [`CoverType`]."]
    struct Id;
}

/// Short code of a [`CoverType`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Code(String);

impl Code {
    /// Creates a new [`Code`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `code` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Creates a new [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Code`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        !code.is_empty()
            && code.len() <= 32
            && !code.contains(char::is_whitespace)
    }
}

/// Human-readable description of a [`CoverType`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        text.trim() == text && !text.is_empty() && text.len() <= 1024
    }
}

#[cfg(test)]
mod spec {
    use super::{Code, Description};

    #[test]
    fn code_has_no_whitespace() {
        assert!(Code::new("FL").is_some());
        assert!(Code::new("F L").is_none());
        assert!(Code::new("").is_none());
    }

    #[test]
    fn description_is_trimmed() {
        assert!(Description::new("Forest land").is_some());
        assert!(Description::new("Forest land ").is_none());
    }
}
