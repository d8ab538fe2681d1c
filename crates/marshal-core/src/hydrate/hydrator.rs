use crate::{
    config::HydrateConfig,
    error::MarshalError,
    hydrate::{FieldSlot, FieldTarget, Hydrate},
    mapping::Transformations,
    registry::{Object, TypeRegistry},
    traits::FieldValues,
    value::{Value, ValueMap},
};
use std::{borrow::Cow, collections::BTreeMap};
use tracing::{debug, trace};

///
/// FieldProcessor
///
/// Converts or validates a value before it is assigned to the named field.
///

pub type FieldProcessor =
    Box<dyn Fn(&str, &Value) -> Result<Value, MarshalError> + Send + Sync + 'static>;

///
/// Hydrator
///
/// Sets entity fields by name from an untyped mapping.
///
/// Order of operations for each `(key, value)`:
/// 1. transformations rename the key (applied once to the whole input)
/// 2. a processor registered for the target name rewrites the value
/// 3. nulls are skipped, never clearing a field
/// 4. unknown names are ignored (or rejected, see `HydrateConfig`)
/// 5. the field's slot decides how the value is assigned
///

pub struct Hydrator<'r> {
    registry: &'r TypeRegistry,
    transformations: Transformations,
    processors: BTreeMap<String, FieldProcessor>,
    config: HydrateConfig,
}

impl<'r> Hydrator<'r> {
    #[must_use]
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            transformations: Transformations::new(),
            processors: BTreeMap::new(),
            config: HydrateConfig::default(),
        }
    }

    #[must_use]
    pub fn with_transformations(mut self, transformations: Transformations) -> Self {
        self.transformations = transformations;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: HydrateConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a processor for every field named `field`, at any depth.
    #[must_use]
    pub fn with_processor<F>(mut self, field: impl Into<String>, processor: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Value, MarshalError> + Send + Sync + 'static,
    {
        self.processors.insert(field.into(), Box::new(processor));
        self
    }

    #[must_use]
    pub const fn config(&self) -> &HydrateConfig {
        &self.config
    }

    /// Hydrate `object` from `values`, all or nothing.
    ///
    /// The work happens on a clone that replaces `object` only once every
    /// field has been assigned; on error `object` is untouched.
    pub fn set_object_fields<T>(&self, object: &mut T, values: &ValueMap) -> Result<(), MarshalError>
    where
        T: Hydrate + Clone,
    {
        let mut staged = object.clone();
        self.hydrate(&mut staged, values)?;
        *object = staged;

        Ok(())
    }

    /// `set_object_fields` after dropping the protected identity and audit
    /// keys, for applying caller-supplied updates to a stored entity.
    pub fn set_values<T>(&self, object: &mut T, values: &ValueMap) -> Result<(), MarshalError>
    where
        T: Hydrate + Clone,
    {
        let mut values = values.clone();
        for key in &self.config.protected_fields {
            if values.remove(key).is_some() {
                trace!(field = %key, "dropping protected field");
            }
        }

        self.set_object_fields(object, &values)
    }

    /// Hydrate in place. A failure leaves `object` partially populated.
    pub fn hydrate(&self, object: &mut dyn Hydrate, values: &ValueMap) -> Result<(), MarshalError> {
        let values = self.transform(values);

        self.assign_fields(object, &values, 0)
    }

    /// Construct `type_name` through the registry and hydrate it.
    pub fn create_object(
        &self,
        type_name: &str,
        values: &ValueMap,
    ) -> Result<Box<dyn Object>, MarshalError> {
        let values = self.transform(values);

        self.build_object(type_name, &values, 0)
    }

    fn transform<'v>(&self, values: &'v ValueMap) -> Cow<'v, ValueMap> {
        if self.transformations.is_empty() {
            Cow::Borrowed(values)
        } else {
            Cow::Owned(self.transformations.apply(values))
        }
    }

    fn build_object(
        &self,
        type_name: &str,
        values: &ValueMap,
        depth: usize,
    ) -> Result<Box<dyn Object>, MarshalError> {
        let mut object = self.registry.create_object(type_name)?;

        let target = object.as_hydrate_mut().ok_or_else(|| {
            MarshalError::bad_argument(format!("type '{type_name}' does not support hydration"))
        })?;
        self.assign_fields(target, values, depth)?;

        Ok(object)
    }

    fn assign_fields(
        &self,
        object: &mut dyn Hydrate,
        values: &ValueMap,
        depth: usize,
    ) -> Result<(), MarshalError> {
        if depth > self.config.max_depth {
            return Err(MarshalError::bad_argument(format!(
                "nesting exceeds the maximum depth of {}",
                self.config.max_depth
            )));
        }

        for (key, raw) in values {
            let processed;
            let value = match self.processors.get(key) {
                Some(processor) => {
                    processed = processor(key, raw)?;
                    &processed
                }
                None => raw,
            };

            if value.is_null() {
                continue;
            }

            let Some(target) = object.field_target(key) else {
                if self.config.ignore_unknown {
                    trace!(field = %key, "skipping unknown field");
                    continue;
                }

                return Err(MarshalError::bad_argument(format!("unknown field '{key}'")));
            };

            self.assign(target, key, value, depth)?;
        }

        Ok(())
    }

    fn assign(
        &self,
        target: &mut dyn FieldTarget,
        key: &str,
        value: &Value,
        depth: usize,
    ) -> Result<(), MarshalError> {
        match target.slot() {
            FieldSlot::Scalar(scalar) => scalar.assign(key, value),

            FieldSlot::TextList(list) => {
                *list = text_list(key, value)?;
                Ok(())
            }

            FieldSlot::MapList(list) => {
                *list = map_list(key, value)?;
                Ok(())
            }

            FieldSlot::Entity(entity) => {
                let (type_name, by_reference) = entity.registered_name();
                let Value::Map(sub) = value else {
                    return Err(MarshalError::type_mismatch(key, "map", value.type_name()));
                };

                debug!(field = key, type_name, by_reference, "constructing nested object");
                let object = self
                    .build_object(type_name, sub, depth + 1)
                    .map_err(|err| err.with_field(key))?;

                entity.assign_object(key, object)
            }
        }
    }
}

fn list_items<'v>(key: &str, value: &'v Value) -> Result<&'v [Value], MarshalError> {
    value
        .as_list()
        .ok_or_else(|| MarshalError::type_mismatch(key, "list", value.type_name()))
}

fn text_list(key: &str, value: &Value) -> Result<Vec<String>, MarshalError> {
    list_items(key, value)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.coerce_text().ok_or_else(|| {
                MarshalError::type_mismatch(format!("{key}[{index}]"), "text", item.type_name())
            })
        })
        .collect()
}

fn map_list(key: &str, value: &Value) -> Result<Vec<ValueMap>, MarshalError> {
    list_items(key, value)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_map().cloned().ok_or_else(|| {
                MarshalError::type_mismatch(format!("{key}[{index}]"), "map", item.type_name())
            })
        })
        .collect()
}

/// Read the named fields back out of an entity. Names the entity does not
/// have are left out of the result.
#[must_use]
pub fn get_object_fields<T>(object: &T, fields: &[&str]) -> ValueMap
where
    T: FieldValues + ?Sized,
{
    fields
        .iter()
        .filter_map(|field| object.get_value(field).map(|value| (*field, value)))
        .collect()
}
