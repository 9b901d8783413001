//! REST API definitions.

pub mod accountability_rule;
pub mod accountability_type;
pub mod cover_type;
pub mod handler;
pub mod party;
pub mod quantity_observation;

use axum::{routing::get, Extension, Router};
use common::FromParams;
use serde::{de::DeserializeOwned, Serialize};
use service::domain::Entity;

use crate::{define_error, Error, Service};

pub use self::{
    accountability_rule::AccountabilityRule,
    accountability_type::AccountabilityType, cover_type::CoverType,
    party::Party, quantity_observation::QuantityObservation,
};

/// JSON representation of an [`Entity`] record.
///
/// Every field is optional in the representation, so the same shape is both
/// accepted and returned by the API.
pub trait Dto: Serialize + DeserializeOwned + From<Self::Entity> {
    /// Represented [`Entity`].
    type Entity: Entity;

    /// Filter the represented [`Entity`] records are selected by.
    type Filter: FromParams;

    /// Name of the represented [`Entity`] records.
    const NAME: &'static str;

    /// Returns the ID of the represented record, if any.
    fn id(&self) -> Option<i64>;

    /// Returns the version of the represented record, if any.
    fn version(&self) -> Option<i32>;

    /// Validates this [`Dto`] and converts it into an [`Entity::Draft`].
    ///
    /// # Errors
    ///
    /// If any of the attributes is malformed.
    fn into_draft(self) -> Result<<Self::Entity as Entity>::Draft, Error>;
}

define_error! {
    enum RecordError {
        #[code = "NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Record does not exist"]
        NotExists,

        #[code = "VERSION_MISMATCH"]
        #[status = CONFLICT]
        #[message = "Record has been modified since the provided `version`"]
        VersionMismatch,

        #[code = "VERSION_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "`version` is required to update a record"]
        VersionRequired,

        #[code = "ID_MISMATCH"]
        #[status = BAD_REQUEST]
        #[message = "`id` of the body differs from the requested one"]
        IdMismatch,
    }
}

/// Builds a [`Router`] serving CRUD routes of the provided [`Dto`].
macro_rules! resource {
    ($dto:ty) => {
        Router::new()
            .route(
                "/",
                get(handler::list::<$dto>)
                    .post(handler::create::<$dto>)
                    .delete(handler::delete_filtered::<$dto>),
            )
            .route(
                "/ids/:id",
                get(handler::get::<$dto>)
                    .put(handler::update::<$dto>)
                    .delete(handler::delete::<$dto>),
            )
    };
}

/// Builds a [`Router`] of the whole REST API backed by the provided
/// [`Service`].
pub fn router(service: Service) -> Router {
    Router::new()
        .nest("/api/v1/accountability_types", resource!(AccountabilityType))
        .nest("/api/v1/accountability_rules", resource!(AccountabilityRule))
        .nest("/api/v1/parties", resource!(Party))
        .nest("/api/v1/cover_types", resource!(CoverType))
        .nest(
            "/api/v1/quantity_observations",
            resource!(QuantityObservation),
        )
        .layer(Extension(service))
}
