//! Format-agnostic object marshalling: a field traversal protocol entities
//! implement once, map-backed and codec-backed sources and sinks that drive
//! it, a reflective hydrator over derive-generated field tables, and the
//! identity/tenant/audit/deletion mixins entities compose.

extern crate self as marshal_core;

// public exports are one module level down
pub mod config;
pub mod entity;
pub mod error;
pub mod hydrate;
pub mod mapping;
pub mod protocol;
pub mod registry;
pub mod serialize;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

// derive
pub use marshal_derive::Hydrate;

///
/// Prelude
///
/// Vocabulary an entity module needs to declare and hydrate types.
///

pub mod prelude {
    pub use crate::{
        Hydrate,
        entity::{
            DeletionInfo, IdentityInfo, Multitenant, SoftDeletable, Storable, StorableConfig,
            TenantInfo, Track, Trackable, TrackingInfo,
        },
        error::MarshalError,
        hydrate::{FieldTarget, Hydrate, Hydrator},
        protocol::{FieldSink, FieldSource, Serializable},
        registry::{Object, Registered, TypeRegistry},
        serialize::Codec,
        traits::{FieldValue, FieldValues},
        types::{Blob, Timestamp},
        value::{Value, ValueMap},
    };
}
