use crate::{
    Hydrate,
    error::MarshalError,
    protocol::{FieldSink, FieldSource, Serializable},
    serialize::Codec,
};

///
/// SoftDeletable
///

pub trait SoftDeletable {
    fn is_deleted(&self) -> bool;

    fn set_deleted(&mut self, deleted: bool);
}

///
/// DeletionInfo
///
/// Owns the `Deleted` flag.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hydrate, PartialEq)]
#[marshal(name = "DeletionInfo", serializable)]
pub struct DeletionInfo {
    deleted: bool,
}

impl DeletionInfo {
    pub const DELETED: &'static str = "Deleted";
}

impl SoftDeletable for DeletionInfo {
    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }
}

impl Serializable for DeletionInfo {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        source.read_bool(codec, Self::DELETED, &mut self.deleted)
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        sink.write_bool(codec, Self::DELETED, self.deleted)
    }
}
