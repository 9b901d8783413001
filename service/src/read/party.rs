//! [`Party`]-related read definitions.

use common::{FromParams, ParseError, Params};

use crate::domain::party;
#[cfg(doc)]
use crate::domain::Party;

/// Filter of [`Party`] records.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// IDs the [`Party`] should be one of.
    pub ids: Option<Vec<party::Id>>,

    /// [`party::TypeId`] the [`Party`] should be of.
    pub type_id: Option<party::TypeId>,

    /// Words any of which the [`party::Name`] should contain.
    pub name: Option<String>,
}

impl FromParams for Filter {
    fn from_params(params: &Params) -> Result<Self, ParseError> {
        Ok(Self {
            ids: params.list("ids")?,
            type_id: params.single("partyTypeId")?,
            name: params.text("name").map(ToOwned::to_owned),
        })
    }
}

#[cfg(test)]
mod spec {
    use common::{FromParams as _, Params};

    use super::Filter;

    #[test]
    fn from_params() {
        let params = [("ids", "3,1"), ("partyTypeId", "2"), ("name", "Ken")]
            .into_iter()
            .collect::<Params>();

        assert_eq!(
            Filter::from_params(&params),
            Ok(Filter {
                ids: Some(vec![1.into(), 3.into()]),
                type_id: Some(2.into()),
                name: Some("Ken".into()),
            }),
        );
    }

    #[test]
    fn ignores_unknown_params() {
        let params = [("page", "2")].into_iter().collect::<Params>();

        assert_eq!(Filter::from_params(&params), Ok(Filter::default()));
    }

    #[test]
    fn fails_on_malformed_type_id() {
        let params = [("partyTypeId", "one")].into_iter().collect::<Params>();

        assert_eq!(
            Filter::from_params(&params).unwrap_err().key,
            "partyTypeId",
        );
    }
}
