//! Styled parameter serialization.
//!
//! Encoding runs in two steps: the value is first serialized into a
//! [`ParamValue`], then written out following the style grammar. This keeps
//! the grammar in one place ([`write_value`]) for both typed values and
//! dynamic ones.
//!
//! ## Usage
//!
//! ```rust
//! use serde_param_style::{to_string, ParamOptions, Style};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct User { role: String, first_name: String }
//!
//! let user = User { role: "admin".into(), first_name: "Alex".into() };
//! let options = ParamOptions::new("user").with_style(Style::Label).with_explode(true);
//! assert_eq!(to_string(&options, &user).unwrap(), ".role=admin.firstName=Alex");
//!
//! let options = ParamOptions::new("id").with_style(Style::Form).with_explode(true);
//! assert_eq!(to_string(&options, &vec![3, 4, 5]).unwrap(), "id=3&id=4&id=5");
//! ```
//!
//! The output is not percent-encoded. Values that contain the active
//! delimiter are rejected rather than written ambiguously.

use crate::tokenize::Rule;
use crate::{Error, ParamMap, ParamOptions, ParamValue, Result, Style};
use serde::{ser, Serialize};
use tracing::trace;

/// Serializes Rust values into [`ParamValue`]s.
///
/// `None` and unit produce no value: they are skipped as record fields and
/// rejected everywhere else.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<ParamValue>,
}

pub struct SerializeRecord {
    map: ParamMap,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<ParamValue>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Option<ParamValue>, Error>;
    type SerializeMap = SerializeRecord;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = ser::Impossible<Option<ParamValue>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(Some(ParamValue::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        Ok(Some(ParamValue::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        Ok(Some(match i64::try_from(v) {
            Ok(i) => ParamValue::Integer(i),
            Err(_) => ParamValue::String(v.to_string()),
        }))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    // Out-of-range integers keep their exact digits as text
    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        Ok(Some(match i64::try_from(v) {
            Ok(i) => ParamValue::Integer(i),
            Err(_) => ParamValue::String(v.to_string()),
        }))
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        Ok(Some(match i64::try_from(v) {
            Ok(i) => ParamValue::Integer(i),
            Err(_) => ParamValue::String(v.to_string()),
        }))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Ok(Some(ParamValue::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Some(ParamValue::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Some(ParamValue::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        let s = std::str::from_utf8(v).map_err(Error::custom)?;
        self.serialize_str(s)
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported(&format!("enum variant '{}' with data", variant)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported(&format!("enum variant '{}' with data", variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeRecord> {
        Ok(SerializeRecord {
            map: ParamMap::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeRecord> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported(&format!("enum variant '{}' with data", variant)))
    }
}

impl SerializeVec {
    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let element = value
            .serialize(ValueSerializer)?
            .ok_or_else(|| Error::unsupported("missing array element"))?;
        self.vec.push(element);
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Option<ParamValue>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(ParamValue::Array(self.vec)))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Option<ParamValue>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(ParamValue::Array(self.vec)))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<ParamValue>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(ParamValue::Array(self.vec)))
    }
}

impl SerializeRecord {
    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.map.insert(key, value);
        }
        Ok(())
    }
}

impl ser::SerializeMap for SerializeRecord {
    type Ok = Option<ParamValue>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Some(key) if key.is_scalar() => {
                self.current_key = Some(key.to_string());
                Ok(())
            }
            _ => Err(Error::unsupported("record keys must be scalars")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(ParamValue::Record(self.map)))
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Option<ParamValue>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(ParamValue::Record(self.map)))
    }
}

pub(crate) fn to_param_value<T: Serialize + ?Sized>(value: &T) -> Result<ParamValue> {
    value
        .serialize(ValueSerializer)?
        .ok_or_else(|| Error::unsupported("missing value"))
}

/// Writes `value` as a parameter string following the style of `options`.
pub(crate) fn write_value(options: &ParamOptions, value: &ParamValue) -> Result<String> {
    let name = options.name.as_str();
    let output = match value {
        ParamValue::Array(items) => {
            if items.is_empty() {
                return Err(Error::empty(name));
            }
            let atoms = items
                .iter()
                .map(|item| atom(options, item))
                .collect::<Result<Vec<_>>>()?;
            write_list(options, &atoms)
        }
        ParamValue::Record(map) => {
            if map.is_empty() {
                return Err(Error::empty(name));
            }
            write_record(options, map)?
        }
        scalar => {
            let text = scalar.to_string();
            match options.style {
                Style::Simple => text,
                Style::Label => format!(".{}", text),
                Style::Matrix => format!(";{}={}", name, text),
                Style::Form => format!("{}={}", name, text),
            }
        }
    };

    if output.is_empty() {
        return Err(Error::empty(name));
    }

    trace!(
        style = %options.style,
        explode = options.explode,
        param = name,
        len = output.len(),
        "Parameter encoded"
    );
    Ok(output)
}

/// Renders one list item, refusing text the decoder would split apart.
fn atom(options: &ParamOptions, value: &ParamValue) -> Result<String> {
    if !value.is_scalar() {
        return Err(Error::unsupported("nested arrays and records inside a parameter"));
    }
    let text = value.to_string();
    let delimiter = Rule::for_style(options.style, options.explode).delimiter;
    if text.contains(delimiter) {
        return Err(Error::format(
            options.style,
            &options.name,
            &format!("values without '{}', found '{}'", delimiter, text),
        ));
    }
    Ok(text)
}

/// Joins atoms as an array; non-exploded records share this layout.
fn write_list(options: &ParamOptions, atoms: &[String]) -> String {
    let name = options.name.as_str();
    match (options.style, options.explode) {
        (Style::Simple, _) => atoms.join(","),
        (Style::Label, false) => format!(".{}", atoms.join(",")),
        (Style::Label, true) => format!(".{}", atoms.join(".")),
        (Style::Matrix, false) => format!(";{}={}", name, atoms.join(",")),
        (Style::Matrix, true) => atoms.iter().map(|a| format!(";{}={}", name, a)).collect(),
        (Style::Form, false) => format!("{}={}", name, atoms.join(",")),
        (Style::Form, true) => atoms
            .iter()
            .map(|a| format!("{}={}", name, a))
            .collect::<Vec<_>>()
            .join("&"),
    }
}

fn write_record(options: &ParamOptions, map: &ParamMap) -> Result<String> {
    let mut atoms = Vec::with_capacity(map.len() * 2);
    for (key, value) in map {
        let key = atom(options, &ParamValue::String(key.clone()))?;
        let value = atom(options, value)?;
        if options.explode && (key.contains('=') || value.contains('=')) {
            return Err(Error::format(
                options.style,
                &options.name,
                &format!("properties without '=', found '{}={}'", key, value),
            ));
        }
        atoms.push(key);
        atoms.push(value);
    }

    if !options.explode {
        return Ok(write_list(options, &atoms));
    }

    let properties: Vec<String> = atoms
        .chunks_exact(2)
        .map(|pair| format!("{}={}", pair[0], pair[1]))
        .collect();
    Ok(match options.style {
        Style::Simple => properties.join(","),
        Style::Label => format!(".{}", properties.join(".")),
        Style::Matrix => properties.iter().map(|p| format!(";{}", p)).collect(),
        Style::Form => properties.join("&"),
    })
}
