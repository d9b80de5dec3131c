//! Dynamic value representation for bound parameters.
//!
//! [`ParamValue`] is what [`bind`](crate::bind) produces when the destination
//! shape is chosen at runtime through a [`Shape`](crate::Shape) rather than a
//! Rust type. It is deliberately flat: a scalar, an array of scalars, or a
//! record of scalars.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use serde_param_style::{bind, ParamOptions, ParamValue, PrimitiveKind, Shape, Style};
//!
//! let options = ParamOptions::new("id").with_style(Style::Label).with_explode(true);
//! let value = bind(&options, ".3.4.5", &Shape::Array(PrimitiveKind::Integer)).unwrap();
//!
//! assert!(value.is_array());
//! let ids: Vec<i64> = value
//!     .as_array()
//!     .unwrap()
//!     .iter()
//!     .filter_map(ParamValue::as_i64)
//!     .collect();
//! assert_eq!(ids, vec![3, 4, 5]);
//! ```

use crate::{Error, ParamMap, ParamOptions};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A decoded parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<ParamValue>),
    Record(ParamMap),
}

impl ParamValue {
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, ParamValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, ParamValue::Integer(_) | ParamValue::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, ParamValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, ParamValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, ParamValue::Record(_))
    }

    /// Returns `true` for booleans, numbers and strings.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, ParamValue::Array(_) | ParamValue::Record(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `f64` for both integers and floats.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<ParamValue>> {
        match self {
            ParamValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Encodes this value as a parameter string in the style of `options`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_param_style::{ParamOptions, ParamValue, Style};
    ///
    /// let value = ParamValue::Array(vec![ParamValue::from(3), ParamValue::from(4)]);
    /// let options = ParamOptions::new("id").with_style(Style::Matrix).with_explode(true);
    /// assert_eq!(value.to_styled(&options).unwrap(), ";id=3;id=4");
    /// ```
    ///
    /// # Errors
    ///
    /// Fails for empty or nested collections and for atoms containing the
    /// style's delimiter.
    pub fn to_styled(&self, options: &ParamOptions) -> crate::Result<String> {
        crate::ser::write_value(options, self)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Float(fl) => write!(f, "{}", fl),
            ParamValue::String(s) => f.write_str(s),
            ParamValue::Array(arr) => {
                f.write_str("[")?;
                for (i, elem) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                f.write_str("]")
            }
            ParamValue::Record(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Integer(i) => serializer.serialize_i64(*i),
            ParamValue::Float(f) => serializer.serialize_f64(*f),
            ParamValue::String(s) => serializer.serialize_str(s),
            ParamValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for elem in arr {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            }
            ParamValue::Record(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    m.serialize_entry(key, value)?;
                }
                m.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ParamValueVisitor;

        impl<'de> serde::de::Visitor<'de> for ParamValueVisitor {
            type Value = ParamValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a flat parameter value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(ParamValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ParamValue::Integer(value))
            }

            // Out-of-range integers keep their exact digits, as the serializer does
            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(i64::try_from(value)
                    .map_or_else(|_| ParamValue::String(value.to_string()), ParamValue::Integer))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(i64::try_from(value)
                    .map_or_else(|_| ParamValue::String(value.to_string()), ParamValue::Integer))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(i64::try_from(value)
                    .map_or_else(|_| ParamValue::String(value.to_string()), ParamValue::Integer))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(ParamValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ParamValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(ParamValue::String(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(ParamValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut record = ParamMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry()? {
                    record.insert(key, value);
                }
                Ok(ParamValue::Record(record))
            }
        }

        deserializer.deserialize_any(ParamValueVisitor)
    }
}

impl TryFrom<ParamValue> for i64 {
    type Error = Error;

    fn try_from(value: ParamValue) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| Error::custom(format!("expected integer, found {}", value)))
    }
}

impl TryFrom<ParamValue> for f64 {
    type Error = Error;

    fn try_from(value: ParamValue) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| Error::custom(format!("expected number, found {}", value)))
    }
}

impl TryFrom<ParamValue> for bool {
    type Error = Error;

    fn try_from(value: ParamValue) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::custom(format!("expected boolean, found {}", value)))
    }
}

impl TryFrom<ParamValue> for String {
    type Error = Error;

    fn try_from(value: ParamValue) -> crate::Result<Self> {
        match value {
            ParamValue::String(s) => Ok(s),
            other => Err(Error::custom(format!("expected string, found {}", other))),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(value: Vec<ParamValue>) -> Self {
        ParamValue::Array(value)
    }
}

impl From<ParamMap> for ParamValue {
    fn from(value: ParamMap) -> Self {
        ParamValue::Record(value)
    }
}
