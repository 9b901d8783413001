//! [`Party`]-related definitions.

use serde::{Deserialize, Serialize};
use service::{domain, read};

use crate::{define_error, Error};

use super::Dto;

/// JSON representation of a [`domain::Party`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// ID of the party.
    pub id: Option<i64>,

    /// ID of the type of the party.
    pub party_type_id: Option<i64>,

    /// Name of the party.
    pub name: Option<String>,

    /// Version of the party.
    pub version: Option<i32>,
}

impl From<domain::Party> for Party {
    fn from(party: domain::Party) -> Self {
        Self {
            id: Some(party.id.into()),
            party_type_id: party.type_id.map(Into::into),
            name: party.name.map(|n| n.to_string()),
            version: party.version.map(Into::into),
        }
    }
}

impl Dto for Party {
    type Entity = domain::Party;
    type Filter = read::party::Filter;

    const NAME: &'static str = "party";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn version(&self) -> Option<i32> {
        self.version
    }

    fn into_draft(self) -> Result<domain::party::Draft, Error> {
        Ok(domain::party::Draft {
            type_id: self.party_type_id.map(Into::into),
            name: self
                .name
                .map(|n| {
                    domain::party::Name::new(n.trim()).ok_or(PartyError::Name)
                })
                .transpose()?,
        })
    }
}

define_error! {
    enum PartyError {
        #[code = "INVALID_PARTY_NAME"]
        #[status = BAD_REQUEST]
        #[message = "`name` must be non-empty and at most 255 characters long"]
        Name,
    }
}

#[cfg(test)]
mod spec {
    use service::domain;

    use super::{Dto as _, Party};

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(Party {
            id: Some(1),
            party_type_id: Some(2),
            name: Some("Kenya".into()),
            version: Some(1),
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "partyTypeId": 2,
                "name": "Kenya",
                "version": 1,
            }),
        );
    }

    #[test]
    fn accepts_missing_fields() {
        let party: Party = serde_json::from_str(r#"{"name":"Kenya"}"#).unwrap();

        assert_eq!(
            party,
            Party {
                name: Some("Kenya".into()),
                ..Party::default()
            },
        );
    }

    #[test]
    fn validates_name() {
        let draft = Party {
            name: Some(" Kenya ".into()),
            ..Party::default()
        }
        .into_draft()
        .unwrap();
        assert_eq!(draft.name, domain::party::Name::new("Kenya"));

        let err = Party {
            name: Some("  ".into()),
            ..Party::default()
        }
        .into_draft()
        .unwrap_err();
        assert_eq!(err.code, "INVALID_PARTY_NAME");
    }
}
