//! [`CoverType`]-related definitions.

use serde::{Deserialize, Serialize};
use service::{domain, read};

use crate::{define_error, Error};

use super::Dto;

/// JSON representation of a [`domain::CoverType`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverType {
    /// ID of the cover type.
    pub id: Option<i64>,

    /// Short code of the cover type.
    pub code: Option<String>,

    /// Description of the cover type.
    pub description: Option<String>,

    /// Version of the cover type.
    pub version: Option<i32>,
}

impl From<domain::CoverType> for CoverType {
    fn from(ty: domain::CoverType) -> Self {
        Self {
            id: Some(ty.id.into()),
            code: ty.code.map(|c| c.to_string()),
            description: ty.description.map(|d| d.to_string()),
            version: ty.version.map(Into::into),
        }
    }
}

impl Dto for CoverType {
    type Entity = domain::CoverType;
    type Filter = read::cover_type::Filter;

    const NAME: &'static str = "cover type";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn version(&self) -> Option<i32> {
        self.version
    }

    fn into_draft(self) -> Result<domain::cover_type::Draft, Error> {
        use domain::cover_type::{Code, Description, Draft};

        Ok(Draft {
            code: self
                .code
                .map(|c| Code::new(c).ok_or(CoverTypeError::Code))
                .transpose()?,
            description: self
                .description
                .map(|d| {
                    Description::new(d.trim())
                        .ok_or(CoverTypeError::Description)
                })
                .transpose()?,
        })
    }
}

define_error! {
    enum CoverTypeError {
        #[code = "INVALID_COVER_TYPE_CODE"]
        #[status = BAD_REQUEST]
        #[message = "`code` must be non-empty, at most 32 characters long \
                     and contain no whitespace"]
        Code,

        #[code = "INVALID_COVER_TYPE_DESCRIPTION"]
        #[status = BAD_REQUEST]
        #[message = "`description` must be non-empty and at most 1024 \
                     characters long"]
        Description,
    }
}

#[cfg(test)]
mod spec {
    use super::{CoverType, Dto as _};

    #[test]
    fn rejects_code_with_whitespace() {
        let err = CoverType {
            code: Some("F L".into()),
            ..CoverType::default()
        }
        .into_draft()
        .unwrap_err();

        assert_eq!(err.code, "INVALID_COVER_TYPE_CODE");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }
}
