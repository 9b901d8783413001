//! [`AccountabilityType`]-related read definitions.

use common::{FromParams, ParseError, Params};

use crate::domain::accountability_type;
#[cfg(doc)]
use crate::domain::AccountabilityType;

/// Filter of [`AccountabilityType`] records.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// IDs the [`AccountabilityType`] should be one of.
    pub ids: Option<Vec<accountability_type::Id>>,

    /// Words any of which the [`accountability_type::Name`] should contain.
    pub name: Option<String>,
}

impl FromParams for Filter {
    fn from_params(params: &Params) -> Result<Self, ParseError> {
        Ok(Self {
            ids: params.list("ids")?,
            name: params.text("name").map(ToOwned::to_owned),
        })
    }
}
