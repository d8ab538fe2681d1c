use crate::{
    error::MarshalError,
    value::{Value, ValueMap},
};
use std::collections::BTreeMap;

/// Reserved key inside a nested rule that renames the container itself.
pub const CONTAINER_KEY: &str = "__key";

///
/// Rule
///
/// What happens to one source key: an optional rename (a dotted target
/// moves the value deeper) and rules for the keys inside its mapping.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rule {
    pub rename: Option<String>,
    pub nested: Transformations,
}

///
/// Transformations
///
/// External key → internal name. Keys written with dots
/// (`"Parent.Child"`) are unflattened into nested rules, so they only
/// rewrite the value at that path and leave its siblings alone.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transformations {
    rules: BTreeMap<String, Rule>,
}

impl Transformations {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Add a rename rule; `from` may be a dotted path.
    #[must_use]
    pub fn rename(mut self, from: &str, to: impl Into<String>) -> Self {
        self.insert_rename(from, to.into());
        self
    }

    /// Add a nested rule set for the mapping under `from`.
    #[must_use]
    pub fn nested(mut self, from: impl Into<String>, key: Option<&str>, rules: Self) -> Self {
        self.rules.insert(
            from.into(),
            Rule {
                rename: key.map(ToString::to_string),
                nested: rules,
            },
        );
        self
    }

    /// Parse a transformation document: text values rename, map values
    /// nest (with an optional `__key`).
    pub fn from_map(map: &ValueMap) -> Result<Self, MarshalError> {
        let mut out = Self::new();

        for (from, rule) in map {
            match rule {
                Value::Text(to) => out.insert_rename(from, to.clone()),
                Value::Map(sub) => {
                    let key = match sub.get(CONTAINER_KEY) {
                        None => None,
                        Some(Value::Text(key)) => Some(key.clone()),
                        Some(other) => {
                            return Err(MarshalError::bad_argument(format!(
                                "transformation '{from}': '{CONTAINER_KEY}' must be text, found {}",
                                other.type_name()
                            )));
                        }
                    };

                    let mut inner = sub.clone();
                    inner.remove(CONTAINER_KEY);
                    let rules = Self::from_map(&inner)?;

                    out.insert_nested(from, key, rules);
                }
                other => {
                    return Err(MarshalError::bad_argument(format!(
                        "transformation '{from}' must be text or a map, found {}",
                        other.type_name()
                    )));
                }
            }
        }

        Ok(out)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.get(key)
    }

    /// Rewrite `data`, returning a new mapping.
    ///
    /// Keys without a rule keep their name. Nested rules apply to map
    /// values only; a nested rule over a scalar still renames its key.
    #[must_use]
    pub fn apply(&self, data: &ValueMap) -> ValueMap {
        let mut out = ValueMap::new();

        for (key, value) in data {
            let Some(rule) = self.rules.get(key) else {
                out.insert_path(key, value.clone());
                continue;
            };

            let target = rule.rename.as_deref().unwrap_or(key.as_str());
            let value = match value {
                Value::Map(sub) if !rule.nested.is_empty() => Value::Map(rule.nested.apply(sub)),
                _ => value.clone(),
            };

            out.insert_path(target, value);
        }

        out
    }

    fn insert_rename(&mut self, from: &str, to: String) {
        match from.split_once('.') {
            None => self.rule_mut(from).rename = Some(to),
            Some((head, rest)) => self.rule_mut(head).nested.insert_rename(rest, to),
        }
    }

    fn insert_nested(&mut self, from: &str, key: Option<String>, rules: Self) {
        match from.split_once('.') {
            None => {
                let rule = self.rule_mut(from);
                rule.nested.rules.extend(rules.rules);
                if key.is_some() {
                    rule.rename = key;
                }
            }
            Some((head, rest)) => self.rule_mut(head).nested.insert_nested(rest, key, rules),
        }
    }

    fn rule_mut(&mut self, key: &str) -> &mut Rule {
        self.rules.entry(key.to_string()).or_default()
    }
}

impl TryFrom<&ValueMap> for Transformations {
    type Error = MarshalError;

    fn try_from(map: &ValueMap) -> Result<Self, Self::Error> {
        Self::from_map(map)
    }
}
