use crate::value::Value;
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, btree_map};

///
/// ValueMap
///
/// String-keyed mapping source. Keys are kept sorted so iteration (and
/// therefore encoding) is deterministic.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueMap(BTreeMap<String, Value>);

impl ValueMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_text)
    }

    #[must_use]
    pub fn get_map(&self, key: &str) -> Option<&Self> {
        self.0.get(key).and_then(Value::as_map)
    }

    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.0.get(key).and_then(Value::as_list)
    }

    /// Insert at a dot-separated path, creating intermediate maps.
    ///
    /// A path segment that already holds a non-map value is replaced by a map.
    pub fn insert_path(&mut self, path: &str, value: impl Into<Value>) {
        let parts: Vec<&str> = path.split('.').collect();
        insert_parts(self, &parts, value.into());
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

fn insert_parts(map: &mut ValueMap, parts: &[&str], value: Value) {
    match parts {
        [] => {}
        [last] => {
            map.0.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let slot = map.0.entry((*head).to_string()).or_insert(Value::Null);
            if let Value::Map(next) = slot {
                insert_parts(next, rest, value);
            } else {
                let mut next = ValueMap::new();
                insert_parts(&mut next, rest, value);
                *slot = Value::Map(next);
            }
        }
    }
}

impl From<BTreeMap<String, Value>> for ValueMap {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
