//! Explicit type registry.
//!
//! Types are registered on a `TypeRegistryBuilder` during startup; `build`
//! freezes the table into a `TypeRegistry` that is only ever read, so it can
//! be shared by reference or `Arc` without locking.


use crate::{
    entity::Storable, error::MarshalError, hydrate::Hydrate, protocol::Serializable,
};
use std::{any::Any, collections::BTreeMap};
use tracing::debug;

///
/// Registered
///
/// Canonical registry name of a type.
///

pub trait Registered {
    const TYPE_NAME: &'static str;
}

/// Canonical name of `T`.
#[must_use]
pub const fn registered_name<T: Registered>() -> &'static str {
    T::TYPE_NAME
}

///
/// Object
///
/// Object-safe view of a registered type. Capability queries return `None`
/// when the type does not take part in that protocol.
///

pub trait Object: Any {
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn as_hydrate_mut(&mut self) -> Option<&mut dyn Hydrate> {
        None
    }

    fn as_serializable_mut(&mut self) -> Option<&mut dyn Serializable> {
        None
    }

    fn as_storable(&self) -> Option<&dyn Storable> {
        None
    }
}

impl dyn Object {
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    #[must_use]
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

/// Move a registry-built object into its concrete type.
pub fn downcast_object<T: Registered + 'static>(
    property: &str,
    object: Box<dyn Object>,
) -> Result<Box<T>, MarshalError> {
    let found = object.type_name();

    object
        .into_any()
        .downcast::<T>()
        .map_err(|_| MarshalError::type_mismatch(property, T::TYPE_NAME, found))
}

///
/// ObjectFactory
///

#[derive(Clone, Copy, Debug)]
pub struct ObjectFactory {
    create: fn() -> Box<dyn Object>,
    create_collection: Option<fn(usize) -> Box<dyn Any + Send>>,
}

impl ObjectFactory {
    #[must_use]
    pub fn create(&self) -> Box<dyn Object> {
        (self.create)()
    }
}

fn create_boxed<T: Object + Default>() -> Box<dyn Object> {
    Box::new(T::default())
}

fn create_collection<T: Default + Send + 'static>(len: usize) -> Box<dyn Any + Send> {
    let items: Vec<T> = std::iter::repeat_with(T::default).take(len).collect();

    Box::new(items)
}

///
/// TypeRegistryBuilder
///

#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    factories: BTreeMap<&'static str, ObjectFactory>,
}

impl TypeRegistryBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register `T` under its canonical name.
    pub fn register<T>(&mut self) -> Result<&mut Self, MarshalError>
    where
        T: Registered + Object + Default,
    {
        self.insert(
            T::TYPE_NAME,
            ObjectFactory {
                create: create_boxed::<T>,
                create_collection: None,
            },
        )
    }

    /// Register `T` together with a `Vec<T>` collection constructor.
    pub fn register_with_collection<T>(&mut self) -> Result<&mut Self, MarshalError>
    where
        T: Registered + Object + Default + Send,
    {
        self.insert(
            T::TYPE_NAME,
            ObjectFactory {
                create: create_boxed::<T>,
                create_collection: Some(create_collection::<T>),
            },
        )
    }

    fn insert(
        &mut self,
        name: &'static str,
        factory: ObjectFactory,
    ) -> Result<&mut Self, MarshalError> {
        if self.factories.contains_key(name) {
            return Err(MarshalError::bad_argument(format!(
                "type '{name}' is already registered"
            )));
        }
        self.factories.insert(name, factory);

        Ok(self)
    }

    /// Freeze the table.
    #[must_use]
    pub fn build(self) -> TypeRegistry {
        debug!(types = self.factories.len(), "type registry built");

        TypeRegistry {
            factories: self.factories,
        }
    }
}

///
/// TypeRegistry
///
/// Frozen name → factory table.
///

#[derive(Debug, Default)]
pub struct TypeRegistry {
    factories: BTreeMap<&'static str, ObjectFactory>,
}

impl TypeRegistry {
    #[must_use]
    pub const fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    fn factory(&self, name: &str) -> Result<&ObjectFactory, MarshalError> {
        self.factories
            .get(name)
            .ok_or_else(|| MarshalError::missing_type(name))
    }

    /// Construct a default instance of `name`.
    pub fn create_object(&self, name: &str) -> Result<Box<dyn Object>, MarshalError> {
        Ok(self.factory(name)?.create())
    }

    /// Construct a `Vec` of `len` default instances of `name`, boxed as
    /// `Any` for the caller to downcast.
    pub fn create_collection(
        &self,
        name: &str,
        len: usize,
    ) -> Result<Box<dyn Any + Send>, MarshalError> {
        let create = self.factory(name)?.create_collection.ok_or_else(|| {
            MarshalError::bad_argument(format!("type '{name}' has no collection constructor"))
        })?;

        Ok(create(len))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
