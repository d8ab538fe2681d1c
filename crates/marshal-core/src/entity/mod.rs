//! Entity metadata and the composable mixins entities embed.
//!
//! Each mixin owns a disjoint set of property names. An entity delegates to
//! its mixins in a fixed order (identity, tenant, tracking, deletion) before
//! handling its own fields; for the hydrator the mixins are flattened.

mod deletion;
mod identity;
mod tenant;
mod tracking;


use crate::{error::MarshalError, traits::FieldValues};
use std::collections::BTreeMap;

// re-exports
pub use deletion::{DeletionInfo, SoftDeletable};
pub use identity::IdentityInfo;
pub use tenant::{Multitenant, TenantInfo};
pub use tracking::{Track, Trackable, TrackingInfo, track, track_at};

///
/// StorableConfig
///
/// Declarative metadata a storage layer reads without knowing the concrete
/// entity type.
///

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StorableConfig {
    pub object_type: &'static str,
    pub collection: &'static str,
    pub id_field: &'static str,
    pub label_field: Option<&'static str>,
    pub soft_delete_field: Option<&'static str>,
    pub partial_load_fields: &'static [&'static str],
    pub full_load_fields: &'static [&'static str],

    pub pre_save: bool,
    pub post_save: bool,
    pub post_update: bool,
    pub post_load: bool,
    pub trackable: bool,
    pub multitenant: bool,
    pub cacheable: bool,
    pub ref_ops: bool,
    pub notify_new: bool,
    pub notify_updates: bool,
}

impl StorableConfig {
    /// Config for `object_type`, stored in a collection of the same name
    /// and identified by `Id`.
    #[must_use]
    pub const fn new(object_type: &'static str) -> Self {
        Self {
            object_type,
            collection: object_type,
            id_field: IdentityInfo::ID,
            label_field: None,
            soft_delete_field: None,
            partial_load_fields: &[],
            full_load_fields: &[],
            pre_save: false,
            post_save: false,
            post_update: false,
            post_load: false,
            trackable: false,
            multitenant: false,
            cacheable: false,
            ref_ops: false,
            notify_new: false,
            notify_updates: false,
        }
    }

    #[must_use]
    pub const fn with_collection(mut self, collection: &'static str) -> Self {
        self.collection = collection;
        self
    }

    #[must_use]
    pub const fn with_label_field(mut self, field: &'static str) -> Self {
        self.label_field = Some(field);
        self
    }

    #[must_use]
    pub const fn with_soft_delete_field(mut self, field: &'static str) -> Self {
        self.soft_delete_field = Some(field);
        self
    }

    #[must_use]
    pub const fn trackable(mut self) -> Self {
        self.trackable = true;
        self
    }

    #[must_use]
    pub const fn multitenant(mut self) -> Self {
        self.multitenant = true;
        self
    }

    #[must_use]
    pub const fn cacheable(mut self) -> Self {
        self.cacheable = true;
        self
    }
}

///
/// Storable
///
/// An entity a data-access layer can persist. Lifecycle hooks default to
/// no-ops; capability queries default to "not supported".
///

pub trait Storable: FieldValues {
    fn config(&self) -> StorableConfig;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Display label, read from `config().label_field`.
    fn label(&self) -> Option<String> {
        let field = self.config().label_field?;

        self.get_value(field)
            .and_then(|value| value.as_text().map(ToString::to_string))
    }

    fn pre_save(&mut self) -> Result<(), MarshalError> {
        Ok(())
    }

    fn post_save(&mut self) -> Result<(), MarshalError> {
        Ok(())
    }

    fn post_load(&mut self) -> Result<(), MarshalError> {
        Ok(())
    }

    fn as_trackable(&self) -> Option<&dyn Trackable> {
        None
    }

    fn as_multitenant(&self) -> Option<&dyn Multitenant> {
        None
    }

    fn as_soft_deletable(&self) -> Option<&dyn SoftDeletable> {
        None
    }

    fn is_deleted(&self) -> bool {
        self.as_soft_deletable()
            .is_some_and(SoftDeletable::is_deleted)
    }
}

/// Items that are not soft-deleted, with their ids in the same order.
#[must_use]
pub fn live_storables<T: Storable>(items: &[T]) -> (Vec<&dyn Storable>, Vec<String>) {
    items
        .iter()
        .filter(|item| !item.is_deleted())
        .map(|item| (item as &dyn Storable, item.id().to_string()))
        .unzip()
}

/// Items that are not soft-deleted, keyed by id. Later duplicates win.
#[must_use]
pub fn storables_by_id<T: Storable>(items: &[T]) -> BTreeMap<String, &dyn Storable> {
    items
        .iter()
        .filter(|item| !item.is_deleted())
        .map(|item| (item.id().to_string(), item as &dyn Storable))
        .collect()
}
