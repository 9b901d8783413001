//! [`AccountabilityRule`]-related read definitions.

use common::{FromParams, ParseError, Params};

use crate::domain::{accountability_rule, accountability_type, party};
#[cfg(doc)]
use crate::domain::AccountabilityRule;

/// Filter of [`AccountabilityRule`] records.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// IDs the [`AccountabilityRule`] should be one of.
    pub ids: Option<Vec<accountability_rule::Id>>,

    /// Accountability type the [`AccountabilityRule`] should allow.
    pub accountability_type_id: Option<accountability_type::Id>,

    /// Parent party type the [`AccountabilityRule`] should apply to.
    pub parent_party_type_id: Option<party::TypeId>,

    /// Subsidiary party type the [`AccountabilityRule`] should apply to.
    pub subsidiary_party_type_id: Option<party::TypeId>,
}

impl FromParams for Filter {
    fn from_params(params: &Params) -> Result<Self, ParseError> {
        Ok(Self {
            ids: params.list("ids")?,
            accountability_type_id: params.single("accountabilityTypeId")?,
            parent_party_type_id: params.single("parentPartyTypeId")?,
            subsidiary_party_type_id: params.single("subsidiaryPartyTypeId")?,
        })
    }
}

#[cfg(test)]
mod spec {
    use common::{FromParams as _, Params};

    use super::Filter;

    #[test]
    fn first_malformed_param_aborts() {
        let params = [
            ("ids", "1"),
            ("accountabilityTypeId", "x"),
            ("subsidiaryPartyTypeId", "y"),
        ]
        .into_iter()
        .collect::<Params>();

        let err = Filter::from_params(&params).unwrap_err();
        assert_eq!(err.key, "accountabilityTypeId");
        assert_eq!(err.value, "x");
    }
}
