//! Read entities definitions.
//!
//! Each [`Filter`] here is the set of optional conditions its records may be
//! selected or deleted by. An absent condition doesn't constrain anything,
//! while the present ones are all required to hold. The [`history`] details
//! are read-only views of a location timeline.
//!
//! [`Filter`]: party::Filter

pub mod accountability_rule;
pub mod accountability_type;
pub mod cover_type;
pub mod history;
pub mod party;
pub mod quantity_observation;
