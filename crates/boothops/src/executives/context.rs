use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::DecisionError;

/// Read-only view over a caller-supplied context object.
///
/// Missing keys and explicit nulls resolve to defaults; values of the wrong shape are errors.
#[derive(Debug, Clone)]
pub(crate) struct DecisionContext<'a> {
    fields: Option<&'a Map<String, Value>>,
    /// Dotted path from the context root, empty at the root.
    path: String,
}

impl<'a> DecisionContext<'a> {
    pub(crate) fn new(value: &'a Value) -> Result<Self, DecisionError> {
        match value {
            Value::Object(fields) => Ok(Self {
                fields: Some(fields),
                path: String::new(),
            }),
            Value::Null => Ok(Self {
                fields: None,
                path: String::new(),
            }),
            _ => Err(DecisionError::ContextNotObject),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields
            .and_then(|fields| fields.get(key))
            .filter(|value| !value.is_null())
    }

    fn field_name(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    pub(crate) fn number_or(&self, key: &str, default: f64) -> Result<f64, DecisionError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.as_f64().ok_or_else(|| DecisionError::InvalidField {
                field: self.field_name(key),
                expected: "a number",
            }),
        }
    }

    pub(crate) fn number(&self, key: &str) -> Result<f64, DecisionError> {
        self.number_or(key, 0.0)
    }

    /// Nested object; an absent key yields an empty section.
    pub(crate) fn section(&self, key: &str) -> Result<DecisionContext<'a>, DecisionError> {
        match self.get(key) {
            None => Ok(Self {
                fields: None,
                path: self.field_name(key),
            }),
            Some(Value::Object(fields)) => Ok(Self {
                fields: Some(fields),
                path: self.field_name(key),
            }),
            Some(_) => Err(DecisionError::InvalidField {
                field: self.field_name(key),
                expected: "an object",
            }),
        }
    }

    /// Deserialize every element of a list; an absent key yields an empty list.
    pub(crate) fn records<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, DecisionError> {
        let items = match self.get(key) {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(DecisionError::InvalidField {
                    field: self.field_name(key),
                    expected: "a list",
                })
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item.clone()).map_err(|source| DecisionError::Malformed {
                    field: format!("{}[{}]", self.field_name(key), index),
                    source,
                })
            })
            .collect()
    }

    /// First present key wins, so callers can accept legacy aliases.
    pub(crate) fn records_from<T: DeserializeOwned>(
        &self,
        keys: &[&str],
    ) -> Result<Vec<T>, DecisionError> {
        match keys.iter().find(|key| self.get(key).is_some()) {
            Some(key) => self.records(key),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn record<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, DecisionError> {
        match self.get(key) {
            None => Ok(T::default()),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|source| DecisionError::Malformed {
                    field: self.field_name(key),
                    source,
                })
            }
        }
    }

    pub(crate) fn strings(&self, key: &str) -> Result<Vec<String>, DecisionError> {
        self.records(key)
    }

    /// Key/value pairs of the section in input order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.fields.into_iter().flat_map(|fields| fields.iter())
    }
}
