//! Shared fixture entities for unit tests.

use crate::{
    Hydrate,
    entity::{
        DeletionInfo, IdentityInfo, Multitenant, SoftDeletable, Storable, StorableConfig,
        TenantInfo, Track, Trackable, TrackingInfo,
    },
    error::MarshalError,
    protocol::{FieldSink, FieldSource, Serializable},
    registry::{TypeRegistry, TypeRegistryBuilder},
    serialize::Codec,
    types::{Blob, Timestamp},
};
use std::collections::BTreeMap;

///
/// Address
///

#[derive(Clone, Debug, Default, Hydrate, PartialEq)]
#[marshal(name = "test::Address", serializable)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl Serializable for Address {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        source.read_string(codec, "Street", &mut self.street)?;
        source.read_string(codec, "City", &mut self.city)
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        sink.write_string(codec, "Street", &self.street)?;
        sink.write_string(codec, "City", &self.city)
    }
}

///
/// Profile
///
/// Composite entity carrying every mixin and one field of each kind.
///

#[derive(Clone, Debug, Default, Hydrate, PartialEq)]
#[marshal(name = "test::Profile", serializable, storable)]
pub struct Profile {
    #[marshal(flatten)]
    pub identity: IdentityInfo,
    #[marshal(flatten)]
    pub tenant: TenantInfo,
    #[marshal(flatten)]
    pub tracking: TrackingInfo,
    #[marshal(flatten)]
    pub deletion: DeletionInfo,

    pub name: String,
    pub age: i32,
    pub visits: i64,
    pub ratio: f32,
    pub score: f64,
    pub active: bool,
    pub avatar: Vec<u8>,
    pub thumbnail: Blob,
    pub joined: Timestamp,
    pub tags: Vec<String>,
    pub home: Address,
    pub work: Box<Address>,

    #[marshal(skip)]
    pub counters: BTreeMap<String, i64>,
}

impl Profile {
    pub const CONFIG: StorableConfig = StorableConfig::new("test::Profile")
        .with_collection("profiles")
        .with_label_field("Name")
        .with_soft_delete_field(DeletionInfo::DELETED)
        .trackable()
        .multitenant();
}

impl Serializable for Profile {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        self.identity.read_all(codec, source)?;
        self.tenant.read_all(codec, source)?;
        self.tracking.read_all(codec, source)?;
        self.deletion.read_all(codec, source)?;

        source.read_string(codec, "Name", &mut self.name)?;
        source.read_i32(codec, "Age", &mut self.age)?;
        source.read_i64(codec, "Visits", &mut self.visits)?;
        source.read_f32(codec, "Ratio", &mut self.ratio)?;
        source.read_f64(codec, "Score", &mut self.score)?;
        source.read_bool(codec, "Active", &mut self.active)?;
        source.read_bytes(codec, "Avatar", &mut self.avatar)?;

        let mut thumbnail = self.thumbnail.as_bytes().to_vec();
        source.read_bytes(codec, "Thumbnail", &mut thumbnail)?;
        self.thumbnail = Blob::from(thumbnail);

        source.read_timestamp(codec, "Joined", &mut self.joined)?;
        source.read_array(codec, "Tags", &mut self.tags)?;
        source.read_object(codec, "Home", &mut self.home)?;
        source.read_object(codec, "Work", self.work.as_mut())?;
        source.read_map(codec, "Counters", &mut self.counters)
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        self.identity.write_all(codec, sink)?;
        self.tenant.write_all(codec, sink)?;
        self.tracking.write_all(codec, sink)?;
        self.deletion.write_all(codec, sink)?;

        sink.write_string(codec, "Name", &self.name)?;
        sink.write_i32(codec, "Age", self.age)?;
        sink.write_i64(codec, "Visits", self.visits)?;
        sink.write_f32(codec, "Ratio", self.ratio)?;
        sink.write_f64(codec, "Score", self.score)?;
        sink.write_bool(codec, "Active", self.active)?;
        sink.write_bytes(codec, "Avatar", &self.avatar)?;
        sink.write_bytes(codec, "Thumbnail", self.thumbnail.as_bytes())?;
        sink.write_timestamp(codec, "Joined", self.joined)?;
        sink.write_array(codec, "Tags", &self.tags)?;
        sink.write_object(codec, "Home", &self.home)?;
        sink.write_object(codec, "Work", self.work.as_ref())?;
        sink.write_map(codec, "Counters", &self.counters)
    }
}

impl Storable for Profile {
    fn config(&self) -> StorableConfig {
        Self::CONFIG
    }

    fn id(&self) -> &str {
        self.identity.id()
    }

    fn set_id(&mut self, id: String) {
        self.identity.set_id(id);
    }

    fn as_trackable(&self) -> Option<&dyn Trackable> {
        Some(&self.tracking)
    }

    fn as_multitenant(&self) -> Option<&dyn Multitenant> {
        Some(&self.tenant)
    }

    fn as_soft_deletable(&self) -> Option<&dyn SoftDeletable> {
        Some(&self.deletion)
    }
}

impl Track for Profile {
    fn as_trackable_mut(&mut self) -> Option<&mut dyn Trackable> {
        Some(&mut self.tracking)
    }
}

///
/// NestedObject
///

#[derive(Clone, Debug, Default, Hydrate, PartialEq)]
#[marshal(name = "test::NestedObject", serializable)]
pub struct NestedObject {
    pub new_child: String,
    pub new_child2: String,
}

impl Serializable for NestedObject {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        source.read_string(codec, "NewChild", &mut self.new_child)?;
        source.read_string(codec, "NewChild2", &mut self.new_child2)
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        sink.write_string(codec, "NewChild", &self.new_child)?;
        sink.write_string(codec, "NewChild2", &self.new_child2)
    }
}

///
/// TestObject
///
/// Reads its nested objects under the post-transformation names.
///

#[derive(Clone, Debug, Default, Hydrate, PartialEq)]
#[marshal(name = "test::TestObject", serializable)]
pub struct TestObject {
    pub name: String,
    pub age: i32,
    #[marshal(rename = "DiffProp")]
    pub other: String,
    #[marshal(rename = "SourceSub")]
    pub sub: Box<NestedObject>,
    #[marshal(rename = "RenamedSub")]
    pub sub2: Box<NestedObject>,
}

impl Serializable for TestObject {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        source.read_string(codec, "Name", &mut self.name)?;
        source.read_i32(codec, "Age", &mut self.age)?;
        source.read_string(codec, "DiffProp", &mut self.other)?;
        source.read_object(codec, "SourceSub", self.sub.as_mut())?;
        source.read_object(codec, "RenamedSub", self.sub2.as_mut())
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        sink.write_string(codec, "Name", &self.name)?;
        sink.write_i32(codec, "Age", self.age)?;
        sink.write_string(codec, "DiffProp", &self.other)?;
        sink.write_object(codec, "SourceSub", self.sub.as_ref())?;
        sink.write_object(codec, "RenamedSub", self.sub2.as_ref())
    }
}

///
/// Opaque
///
/// Registered but neither serializable nor nested anywhere.
///

#[derive(Clone, Debug, Default, Hydrate, PartialEq)]
#[marshal(name = "test::Opaque")]
pub struct Opaque {
    pub note: String,
}

/// Registry holding every fixture type.
pub fn fixture_registry() -> TypeRegistry {
    let mut builder = TypeRegistryBuilder::new();
    builder
        .register::<Address>()
        .and_then(|b| b.register_with_collection::<Profile>())
        .and_then(|b| b.register::<NestedObject>())
        .and_then(|b| b.register::<TestObject>())
        .and_then(|b| b.register::<Opaque>())
        .expect("fixture types register once");

    builder.build()
}
