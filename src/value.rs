//! Loosely-typed option values.
//!
//! `ConfigValue` follows the shape of JSON option objects with two additions
//! that the merge rules depend on:
//! - `Undefined` marks an absent value, distinct from an explicit `Null`.
//! - Arrays and objects are reference-counted. Assigning one into another value
//!   shares it instead of copying, and mutation is copy-on-write, so a target
//!   that shares containers with a source never changes that source.

use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

/// Insertion-ordered mapping used for object values.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A caller-defined option value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConfigValue {
    /// Absent. Never overwrites anything during a merge.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Arc<Vec<ConfigValue>>),
    Object(Arc<ConfigMap>),
}

impl ConfigValue {
    /// A fresh, unshared empty object.
    pub fn object() -> Self {
        ConfigValue::Object(Arc::new(ConfigMap::new()))
    }

    /// A fresh, unshared empty array.
    pub fn array() -> Self {
        ConfigValue::Array(Arc::new(Vec::new()))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ConfigValue::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ConfigValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ConfigValue::Array(_))
    }

    /// Objects and arrays are containers; everything else is a primitive.
    pub fn is_container(&self) -> bool {
        self.is_object() || self.is_array()
    }

    pub fn as_object(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Look up a key. Arrays accept decimal index keys.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Object(map) => map.get(key),
            ConfigValue::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&ConfigValue> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Number of entries in a container, zero for primitives.
    pub fn len(&self) -> usize {
        match self {
            ConfigValue::Object(map) => map.len(),
            ConfigValue::Array(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a key into an object, turning a non-object into an empty object first.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        if !self.is_object() {
            *self = ConfigValue::object();
        }
        self.object_mut()
            .and_then(|map| map.insert(key.into(), value))
    }

    /// Append to an array, turning a non-array into an empty array first.
    pub fn push(&mut self, value: ConfigValue) {
        if !self.is_array() {
            *self = ConfigValue::array();
        }
        if let Some(items) = self.array_mut() {
            items.push(value);
        }
    }

    /// Whether both values are the same container allocation.
    ///
    /// Primitives are never identical, even when equal.
    pub fn ptr_eq(&self, other: &ConfigValue) -> bool {
        match (self.container_ptr(), other.container_ptr()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn container_ptr(&self) -> Option<*const ()> {
        match self {
            ConfigValue::Object(map) => Some(Arc::as_ptr(map) as *const ()),
            ConfigValue::Array(items) => Some(Arc::as_ptr(items) as *const ()),
            _ => None,
        }
    }

    /// Mutable access to an object's entries, unsharing it if needed.
    pub(crate) fn object_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigValue::Object(map) => Some(Arc::make_mut(map)),
            _ => None,
        }
    }

    /// Mutable access to an array's items, unsharing it if needed.
    pub(crate) fn array_mut(&mut self) -> Option<&mut Vec<ConfigValue>> {
        match self {
            ConfigValue::Array(items) => Some(Arc::make_mut(items)),
            _ => None,
        }
    }

    /// Convert to a plain JSON value.
    ///
    /// `Undefined` entries are dropped from objects and become `null` in arrays.
    pub fn to_json(&self) -> Value {
        match self {
            ConfigValue::Undefined | ConfigValue::Null => Value::Null,
            ConfigValue::Bool(b) => Value::Bool(*b),
            ConfigValue::Number(n) => Value::Number(n.clone()),
            ConfigValue::String(s) => Value::String(s.clone()),
            ConfigValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ConfigValue::Object(map) => Value::Object(
                map.iter()
                    .filter(|(_, v)| !v.is_undefined())
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Deserialize this value into a typed structure.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }

    /// Build a value from anything serializable.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(ConfigValue::from)
    }
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => ConfigValue::Number(n),
            Value::String(s) => ConfigValue::String(s),
            Value::Array(items) => {
                ConfigValue::Array(Arc::new(items.into_iter().map(ConfigValue::from).collect()))
            }
            Value::Object(map) => ConfigValue::Object(Arc::new(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            )),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Number(Number::from(n))
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Number(Number::from(n))
    }
}

impl From<u64> for ConfigValue {
    fn from(n: u64) -> Self {
        ConfigValue::Number(Number::from(n))
    }
}

impl From<f64> for ConfigValue {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(ConfigValue::Number)
            .unwrap_or(ConfigValue::Null)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Array(Arc::new(items))
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Object(Arc::new(map))
    }
}

impl<K: Into<String>> FromIterator<(K, ConfigValue)> for ConfigValue {
    fn from_iter<I: IntoIterator<Item = (K, ConfigValue)>>(iter: I) -> Self {
        ConfigValue::Object(Arc::new(
            iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }
}

impl FromIterator<ConfigValue> for ConfigValue {
    fn from_iter<I: IntoIterator<Item = ConfigValue>>(iter: I) -> Self {
        ConfigValue::Array(Arc::new(iter.into_iter().collect()))
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Undefined | ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Number(n) => n.serialize(serializer),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Array(items) => serializer.collect_seq(items.iter()),
            ConfigValue::Object(map) => {
                serializer.collect_map(map.iter().filter(|(_, v)| !v.is_undefined()))
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ConfigValueVisitor)
    }
}

/// Builds values straight from the input so object keys keep document order.
struct ConfigValueVisitor;

impl<'de> Visitor<'de> for ConfigValueVisitor {
    type Value = ConfigValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-compatible value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ConfigValue, E> {
        Ok(ConfigValue::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ConfigValue, E> {
        Ok(ConfigValue::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ConfigValue, E> {
        Ok(ConfigValue::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ConfigValue, E> {
        Ok(ConfigValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ConfigValue, E> {
        Ok(ConfigValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ConfigValue, D::Error> {
        ConfigValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ConfigValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<ConfigValue>()? {
            items.push(item);
        }
        Ok(ConfigValue::from(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ConfigValue, A::Error> {
        let mut entries = ConfigMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, ConfigValue>()? {
            entries.insert(key, value);
        }
        Ok(ConfigValue::from(entries))
    }
}
