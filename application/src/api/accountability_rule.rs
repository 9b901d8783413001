//! [`AccountabilityRule`]-related definitions.

use serde::{Deserialize, Serialize};
use service::{domain, read};

use crate::Error;

use super::Dto;

/// JSON representation of a [`domain::AccountabilityRule`].
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountabilityRule {
    /// ID of the accountability rule.
    pub id: Option<i64>,

    /// ID of the accountability type allowed by the rule.
    pub accountability_type_id: Option<i64>,

    /// ID of the party type the rule applies to as a parent.
    pub parent_party_type_id: Option<i64>,

    /// ID of the party type the rule applies to as a subsidiary.
    pub subsidiary_party_type_id: Option<i64>,

    /// Version of the accountability rule.
    pub version: Option<i32>,
}

impl From<domain::AccountabilityRule> for AccountabilityRule {
    fn from(rule: domain::AccountabilityRule) -> Self {
        Self {
            id: Some(rule.id.into()),
            accountability_type_id: rule.accountability_type_id.map(Into::into),
            parent_party_type_id: rule.parent_party_type_id.map(Into::into),
            subsidiary_party_type_id: rule
                .subsidiary_party_type_id
                .map(Into::into),
            version: rule.version.map(Into::into),
        }
    }
}

impl Dto for AccountabilityRule {
    type Entity = domain::AccountabilityRule;
    type Filter = read::accountability_rule::Filter;

    const NAME: &'static str = "accountability rule";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn version(&self) -> Option<i32> {
        self.version
    }

    fn into_draft(self) -> Result<domain::accountability_rule::Draft, Error> {
        Ok(domain::accountability_rule::Draft {
            accountability_type_id: self.accountability_type_id.map(Into::into),
            parent_party_type_id: self.parent_party_type_id.map(Into::into),
            subsidiary_party_type_id: self
                .subsidiary_party_type_id
                .map(Into::into),
        })
    }
}
