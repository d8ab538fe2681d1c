use crate::{
    Hydrate,
    error::MarshalError,
    protocol::{FieldSink, FieldSource, Serializable},
    serialize::Codec,
};

///
/// Multitenant
///

pub trait Multitenant {
    fn tenant_id(&self) -> &str;

    fn tenant_name(&self) -> &str;

    fn set_tenant(&mut self, tenant_id: &str, tenant_name: &str);
}

///
/// TenantInfo
///
/// Owns `TenantId` and `TenantName`.
///

#[derive(Clone, Debug, Default, Eq, Hydrate, PartialEq)]
#[marshal(name = "TenantInfo", serializable)]
pub struct TenantInfo {
    tenant_id: String,
    tenant_name: String,
}

impl TenantInfo {
    pub const TENANT_ID: &'static str = "TenantId";
    pub const TENANT_NAME: &'static str = "TenantName";

    #[must_use]
    pub fn new(tenant_id: impl Into<String>, tenant_name: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            tenant_name: tenant_name.into(),
        }
    }
}

impl Multitenant for TenantInfo {
    fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    fn tenant_name(&self) -> &str {
        &self.tenant_name
    }

    fn set_tenant(&mut self, tenant_id: &str, tenant_name: &str) {
        tenant_id.clone_into(&mut self.tenant_id);
        tenant_name.clone_into(&mut self.tenant_name);
    }
}

impl Serializable for TenantInfo {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        source.read_string(codec, Self::TENANT_ID, &mut self.tenant_id)?;
        source.read_string(codec, Self::TENANT_NAME, &mut self.tenant_name)
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        sink.write_string(codec, Self::TENANT_ID, &self.tenant_id)?;
        sink.write_string(codec, Self::TENANT_NAME, &self.tenant_name)
    }
}
