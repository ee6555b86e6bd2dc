use std::fmt::Display;

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single metadata value attached to an identification record.
///
/// Numeric attributes are carried as parsed, strings verbatim, and
/// flag-like keys use [`MetaValue::Empty`] to mark presence.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetaValue {
    String(String),
    Int(i64),
    Float(f64),
    #[default]
    Empty,
}

impl MetaValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats, everything else is `None`
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl Display for MetaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Empty => Ok(()),
        }
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Insertion-ordered key-value metadata
pub type MetaInfo = IndexMap<String, MetaValue>;

pub trait MetaDescribed {
    fn meta(&self) -> &MetaInfo;
    fn meta_mut(&mut self) -> &mut MetaInfo;

    /// Set `key` to `value`, replacing any previous value for that key
    fn set_meta_value<K: Into<String>, V: Into<MetaValue>>(&mut self, key: K, value: V) {
        self.meta_mut().insert(key.into(), value.into());
    }

    fn get_meta_value(&self, key: &str) -> Option<&MetaValue> {
        self.meta().get(key)
    }

    fn meta_value_exists(&self, key: &str) -> bool {
        self.meta().contains_key(key)
    }

    fn remove_meta_value(&mut self, key: &str) -> Option<MetaValue> {
        self.meta_mut().shift_remove(key)
    }

    /// Copy every entry of `source` into this object's metadata
    fn extend_meta(&mut self, source: &MetaInfo) {
        let meta = self.meta_mut();
        for (k, v) in source.iter() {
            meta.insert(k.clone(), v.clone());
        }
    }

    fn clear_meta_info(&mut self) {
        self.meta_mut().clear();
    }
}

#[macro_export]
macro_rules! impl_meta_described {
    ($($t:ty), +) => {$(

        impl $crate::params::MetaDescribed for $t {
            fn meta(&self) -> &$crate::params::MetaInfo {
                return &self.meta
            }

            fn meta_mut(&mut self) -> &mut $crate::params::MetaInfo {
                return &mut self.meta
            }
        }
    )+};
}
