//! Styled parameter deserialization.
//!
//! This module provides the [`Deserializer`] that binds a raw parameter
//! string to any type implementing `Deserialize`.
//!
//! ## Overview
//!
//! The destination type picks the shape through the hint it gives serde:
//!
//! - `deserialize_seq`, `deserialize_tuple` → **array**: the string is
//!   tokenized and every token is decoded as one element
//! - `deserialize_map`, `deserialize_struct` → **record**: tokens are paired
//!   into a [`CanonicalRecord`](crate::CanonicalRecord) and fed to the
//!   type's own `MapAccess` visitor
//! - everything else → **scalar**: the single token is parsed with the
//!   primitive's `FromStr`
//!
//! ## Usage
//!
//! Most users should use the high-level function in the crate root:
//!
//! ```rust
//! use serde_param_style::{from_str, ParamOptions, Style};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! #[serde(rename_all = "camelCase")]
//! struct User { role: String, first_name: String }
//!
//! let options = ParamOptions::new("user").with_style(Style::Matrix).with_explode(true);
//! let user: User = from_str(&options, ";role=admin;firstName=Alex").unwrap();
//! assert_eq!(user, User { role: "admin".into(), first_name: "Alex".into() });
//!
//! let ids: Vec<u32> = from_str(&options.clone().with_explode(false), ";user=3,4,5").unwrap();
//! assert_eq!(ids, vec![3, 4, 5]);
//! ```

use crate::record::assemble_record;
use crate::scalar::{parse_bool, parse_token, PrimitiveKind};
use crate::tokenize::{scalar_token, tokenize};
use crate::{Error, ParamOptions, Result};
use serde::de::value::BorrowedStrDeserializer;
use serde::de;

/// The styled parameter deserializer.
///
/// Holds the options and the raw string; it has no other state, so one
/// instance drives exactly one `Deserialize` call.
pub struct Deserializer<'o, 'de> {
    options: &'o ParamOptions,
    input: &'de str,
}

impl<'o, 'de> Deserializer<'o, 'de> {
    pub fn new(options: &'o ParamOptions, input: &'de str) -> Self {
        Deserializer { options, input }
    }

    /// An empty raw value never binds, whatever the destination.
    fn non_empty(&self) -> Result<()> {
        if self.input.is_empty() {
            Err(Error::empty(&self.options.name))
        } else {
            Ok(())
        }
    }

    fn scalar(&self) -> Result<&'de str> {
        scalar_token(
            self.options.style,
            self.options.explode,
            &self.options.name,
            self.input,
        )
    }

    fn tokens(&self, keyed: bool) -> Result<Vec<&'de str>> {
        tokenize(
            self.options.style,
            self.options.explode,
            keyed,
            &self.options.name,
            self.input,
        )
    }

    fn visit_array<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let tokens = self.tokens(false)?;
        let total = tokens.len();
        let mut seq = TokenSeq::new(tokens);
        let value = visitor.visit_seq(&mut seq)?;

        let remaining = seq.iter.len();
        if remaining == 0 {
            Ok(value)
        } else {
            let expected = format!("{} elements", total - remaining);
            Err(de::Error::invalid_length(total, &expected.as_str()))
        }
    }

    fn visit_record<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let tokens = self.tokens(true)?;
        let record = assemble_record(
            &tokens,
            self.options.explode,
            self.options.style,
            &self.options.name,
        )?;
        visitor
            .visit_map(RecordAccess::new(record.into_iter()))
            .map_err(|e| Error::record(&self.options.name, e))
    }
}

macro_rules! forward_to_scalar {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(TokenDeserializer::new(self.scalar()?), visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer<'_, 'de> {
    type Error = Error;

    /// Without a type hint the parameter is bound as a string scalar.
    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.scalar()?)
    }

    forward_to_scalar! {
        deserialize_bool
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64 deserialize_i128
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_u128
        deserialize_f32 deserialize_f64
        deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf
        deserialize_identifier
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.non_empty()?;
        Err(Error::unsupported("unit destination"))
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_unit(self, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_array(visitor)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_array(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_array(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_record(visitor)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_record(visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let token = TokenDeserializer::new(self.scalar()?);
        de::Deserializer::deserialize_enum(token, name, variants, visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.non_empty()?;
        visitor.visit_unit()
    }
}

/// Deserializes one token: an array element, a record key or a record value.
struct TokenDeserializer<'de> {
    token: &'de str,
}

impl<'de> TokenDeserializer<'de> {
    fn new(token: &'de str) -> Self {
        TokenDeserializer { token }
    }

    fn nested(&self) -> Error {
        Error::unsupported("nested arrays and records inside a parameter")
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty, $kind:expr),)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(parse_token::<$ty>(self.token, $kind)?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for TokenDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.token)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(parse_bool(self.token)?)
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8(i8, PrimitiveKind::Integer),
        deserialize_i16 => visit_i16(i16, PrimitiveKind::Integer),
        deserialize_i32 => visit_i32(i32, PrimitiveKind::Integer),
        deserialize_i64 => visit_i64(i64, PrimitiveKind::Integer),
        deserialize_i128 => visit_i128(i128, PrimitiveKind::Integer),
        deserialize_u8 => visit_u8(u8, PrimitiveKind::Integer),
        deserialize_u16 => visit_u16(u16, PrimitiveKind::Integer),
        deserialize_u32 => visit_u32(u32, PrimitiveKind::Integer),
        deserialize_u64 => visit_u64(u64, PrimitiveKind::Integer),
        deserialize_u128 => visit_u128(u128, PrimitiveKind::Integer),
        deserialize_f32 => visit_f32(f32, PrimitiveKind::Number),
        deserialize_f64 => visit_f64(f64, PrimitiveKind::Number),
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut chars = self.token.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(Error::custom(format!(
                "expected a single character, found '{}'",
                self.token
            ))),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.token)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.token)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.token.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.token.as_bytes())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported("unit value"))
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_unit(self, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested())
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested())
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested())
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested())
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested())
    }

    /// Unit variants only, named by the token.
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::<Error>::new(self.token))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.token)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct TokenSeq<'de> {
    iter: std::vec::IntoIter<&'de str>,
    index: usize,
}

impl<'de> TokenSeq<'de> {
    fn new(tokens: Vec<&'de str>) -> Self {
        TokenSeq {
            iter: tokens.into_iter(),
            index: 0,
        }
    }
}

impl<'de> de::SeqAccess<'de> for TokenSeq<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(token) => {
                let index = self.index;
                self.index += 1;
                seed.deserialize(TokenDeserializer::new(token))
                    .map(Some)
                    .map_err(|e| Error::element(index, e))
            }
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct RecordAccess<'de> {
    iter: indexmap::map::IntoIter<&'de str, &'de str>,
    value: Option<&'de str>,
}

impl<'de> RecordAccess<'de> {
    fn new(iter: indexmap::map::IntoIter<&'de str, &'de str>) -> Self {
        RecordAccess { iter, value: None }
    }
}

impl<'de> de::MapAccess<'de> for RecordAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(TokenDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(TokenDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}
