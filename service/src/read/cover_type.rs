//! [`CoverType`]-related read definitions.

use common::{FromParams, ParseError, Params};

use crate::domain::cover_type;
#[cfg(doc)]
use crate::domain::CoverType;

/// Filter of [`CoverType`] records.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// IDs the [`CoverType`] should be one of.
    pub ids: Option<Vec<cover_type::Id>>,

    /// Words any of which the [`cover_type::Description`] should contain.
    pub description: Option<String>,
}

impl FromParams for Filter {
    fn from_params(params: &Params) -> Result<Self, ParseError> {
        Ok(Self {
            ids: params.list("ids")?,
            description: params.text("description").map(ToOwned::to_owned),
        })
    }
}
