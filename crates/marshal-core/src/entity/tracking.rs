use crate::{
    Hydrate,
    error::MarshalError,
    protocol::{FieldSink, FieldSource, Serializable},
    serialize::Codec,
    types::Timestamp,
    value::ValueMap,
};
use tracing::info;

///
/// Trackable
///
/// Audit stamps. An item is new exactly when no creator has been recorded.
///

pub trait Trackable {
    fn is_new(&self) -> bool {
        self.created_by().is_empty()
    }

    fn created_by(&self) -> &str;

    fn updated_by(&self) -> &str;

    fn created_at(&self) -> Timestamp;

    fn updated_at(&self) -> Timestamp;

    fn set_created(&mut self, user: &str, at: Timestamp);

    fn set_updated(&mut self, user: &str, at: Timestamp);
}

///
/// Track
///
/// Capability queries used by `track`: either the item carries audit
/// fields, or it is an update mapping that should receive them as keys.
///

pub trait Track {
    fn as_trackable_mut(&mut self) -> Option<&mut dyn Trackable> {
        None
    }

    fn as_update_map(&mut self) -> Option<&mut ValueMap> {
        None
    }
}

///
/// TrackingInfo
///
/// Owns `CreatedBy`, `UpdatedBy`, `CreatedAt` and `UpdatedAt`.
///

#[derive(Clone, Debug, Default, Eq, Hydrate, PartialEq)]
#[marshal(name = "TrackingInfo", serializable)]
pub struct TrackingInfo {
    created_by: String,
    updated_by: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TrackingInfo {
    pub const CREATED_BY: &'static str = "CreatedBy";
    pub const UPDATED_BY: &'static str = "UpdatedBy";
    pub const CREATED_AT: &'static str = "CreatedAt";
    pub const UPDATED_AT: &'static str = "UpdatedAt";
}

impl Trackable for TrackingInfo {
    fn created_by(&self) -> &str {
        &self.created_by
    }

    fn updated_by(&self) -> &str {
        &self.updated_by
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn set_created(&mut self, user: &str, at: Timestamp) {
        user.clone_into(&mut self.created_by);
        self.created_at = at;
    }

    fn set_updated(&mut self, user: &str, at: Timestamp) {
        user.clone_into(&mut self.updated_by);
        self.updated_at = at;
    }
}

impl Track for TrackingInfo {
    fn as_trackable_mut(&mut self) -> Option<&mut dyn Trackable> {
        Some(self)
    }
}

impl Track for ValueMap {
    fn as_update_map(&mut self) -> Option<&mut Self> {
        Some(self)
    }
}

impl Serializable for TrackingInfo {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        source.read_string(codec, Self::CREATED_BY, &mut self.created_by)?;
        source.read_string(codec, Self::UPDATED_BY, &mut self.updated_by)?;
        source.read_timestamp(codec, Self::CREATED_AT, &mut self.created_at)?;
        source.read_timestamp(codec, Self::UPDATED_AT, &mut self.updated_at)
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        sink.write_string(codec, Self::CREATED_BY, &self.created_by)?;
        sink.write_string(codec, Self::UPDATED_BY, &self.updated_by)?;
        sink.write_timestamp(codec, Self::CREATED_AT, self.created_at)?;
        sink.write_timestamp(codec, Self::UPDATED_AT, self.updated_at)
    }
}

/// Stamp audit fields on `item` for `user` at the current time.
pub fn track(item: &mut dyn Track, user: Option<&str>) {
    track_at(item, user, Timestamp::now());
}

/// Stamp audit fields at an explicit time.
///
/// A new trackable item gets creator and updater stamps; an existing one
/// only the updater. An update map receives `UpdatedBy`/`UpdatedAt` keys.
/// Without a user nothing is stamped.
pub fn track_at(item: &mut dyn Track, user: Option<&str>, now: Timestamp) {
    if let Some(trackable) = item.as_trackable_mut() {
        let Some(user) = user else {
            info!("could not audit entity: no user");
            return;
        };

        if trackable.is_new() {
            trackable.set_created(user, now);
        }
        trackable.set_updated(user, now);
    } else if let Some(map) = item.as_update_map() {
        let Some(user) = user else {
            info!("could not audit update map: no user");
            return;
        };

        map.insert(TrackingInfo::UPDATED_BY, user);
        map.insert(TrackingInfo::UPDATED_AT, now);
    }
}
