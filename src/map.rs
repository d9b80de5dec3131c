//! Ordered map type for decoded records.
//!
//! [`ParamMap`] wraps an [`IndexMap`] so that fields keep the order in which
//! they appeared in the parameter string. Encoding a record writes fields back
//! in that order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_param_style::{ParamMap, ParamValue};
//!
//! let mut map = ParamMap::new();
//! map.insert("role".to_string(), ParamValue::from("admin"));
//! map.insert("firstName".to_string(), ParamValue::from("Alex"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["role", "firstName"]);
//! ```

use crate::ParamValue;
use indexmap::IndexMap;

/// An insertion-ordered map of field names to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamMap(IndexMap<String, ParamValue>);

impl ParamMap {
    #[must_use]
    pub fn new() -> Self {
        ParamMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ParamMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field. An existing field keeps its position and gets the new value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_param_style::{ParamMap, ParamValue};
    ///
    /// let mut map = ParamMap::new();
    /// assert!(map.insert("id".to_string(), ParamValue::from(1)).is_none());
    /// assert_eq!(map.insert("id".to_string(), ParamValue::from(2)), Some(ParamValue::from(1)));
    /// ```
    pub fn insert(&mut self, key: String, value: ParamValue) -> Option<ParamValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, ParamValue> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }
}

impl IntoIterator for ParamMap {
    type Item = (String, ParamValue);
    type IntoIter = indexmap::map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParamMap {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, ParamValue)> for ParamMap {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        ParamMap(IndexMap::from_iter(iter))
    }
}
