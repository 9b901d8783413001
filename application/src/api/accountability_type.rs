//! [`AccountabilityType`]-related definitions.

use serde::{Deserialize, Serialize};
use service::{domain, read};

use crate::{define_error, Error};

use super::Dto;

/// JSON representation of a [`domain::AccountabilityType`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountabilityType {
    /// ID of the accountability type.
    pub id: Option<i64>,

    /// Name of the accountability type.
    pub name: Option<String>,

    /// Version of the accountability type.
    pub version: Option<i32>,
}

impl From<domain::AccountabilityType> for AccountabilityType {
    fn from(ty: domain::AccountabilityType) -> Self {
        Self {
            id: Some(ty.id.into()),
            name: ty.name.map(|n| n.to_string()),
            version: ty.version.map(Into::into),
        }
    }
}

impl Dto for AccountabilityType {
    type Entity = domain::AccountabilityType;
    type Filter = read::accountability_type::Filter;

    const NAME: &'static str = "accountability type";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn version(&self) -> Option<i32> {
        self.version
    }

    fn into_draft(self) -> Result<domain::accountability_type::Draft, Error> {
        Ok(domain::accountability_type::Draft {
            name: self
                .name
                .map(|n| {
                    domain::accountability_type::Name::new(n.trim())
                        .ok_or(AccountabilityTypeError::Name)
                })
                .transpose()?,
        })
    }
}

define_error! {
    enum AccountabilityTypeError {
        #[code = "INVALID_ACCOUNTABILITY_TYPE_NAME"]
        #[status = BAD_REQUEST]
        #[message = "`name` must be non-empty and at most 255 characters long"]
        Name,
    }
}
