//! [`AccountabilityRule`] definitions.

use common::define_id;

#[cfg(doc)]
use super::Party;
use super::{accountability_type, party, Entity, Version};

/// Rule allowing an accountability of some type between a parent and a
/// subsidiary [`Party`] types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccountabilityRule {
    /// ID of this [`AccountabilityRule`].
    pub id: Id,

    /// Type of the accountability allowed by this [`AccountabilityRule`].
    pub accountability_type_id: Option<accountability_type::Id>,

    /// Type of the parent [`Party`].
    pub parent_party_type_id: Option<party::TypeId>,

    /// Type of the subsidiary [`Party`].
    pub subsidiary_party_type_id: Option<party::TypeId>,

    /// Current [`Version`] of this [`AccountabilityRule`].
    pub version: Option<Version>,
}

impl Entity for AccountabilityRule {
    type Id = Id;
    type Draft = Draft;

    fn id(&self) -> Id {
        self.id
    }
}

/// Caller-supplied attributes of an [`AccountabilityRule`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Draft {
    /// Type of the accountability allowed by the [`AccountabilityRule`].
    pub accountability_type_id: Option<accountability_type::Id>,

    /// Type of the parent [`Party`].
    pub parent_party_type_id: Option<party::TypeId>,

    /// Type of the subsidiary [`Party`].
    pub subsidiary_party_type_id: Option<party::TypeId>,
}

define_id! {
    #[doc = "ID of an [`AccountabilityRule`]."]
    struct Id;
}
