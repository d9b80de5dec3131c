//! # serde_param_style
//!
//! Serde support for OpenAPI styled parameters: the text encodings used for
//! path, query, header and cookie parameters.
//!
//! ## What are styled parameters?
//!
//! OpenAPI describes how a parameter value is written into a request by a
//! *style* (`simple`, `label`, `matrix`, `form`) and an *explode* flag. The same
//! array `[3, 4, 5]` named `id` can arrive as any of:
//!
//! | style  | explode | text              |
//! |--------|---------|-------------------|
//! | simple | any     | `3,4,5`           |
//! | label  | false   | `.3,4,5`          |
//! | label  | true    | `.3.4.5`          |
//! | matrix | false   | `;id=3,4,5`       |
//! | matrix | true    | `;id=3;id=4;id=5` |
//! | form   | false   | `id=3,4,5`        |
//! | form   | true    | `id=3&id=4&id=5`  |
//!
//! This crate binds such strings into Rust values and writes Rust values back
//! out.
//!
//! ## Key Features
//!
//! - **Serde Compatible**: decode straight into `#[derive(Deserialize)]` types
//! - **Shape from the type**: the destination type picks scalar, array or record
//!   tokenization; the raw string is never sniffed
//! - **Dynamic binding**: [`bind`] decodes against a runtime [`Shape`]
//! - **Zero-copy tokens**: `&str` fields borrow from the raw parameter
//! - **Contextual errors**: every failure names the parameter and its style
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_param_style::{from_str, ParamOptions, Style};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! #[serde(rename_all = "camelCase")]
//! struct User {
//!     role: String,
//!     first_name: String,
//! }
//!
//! let options = ParamOptions::new("user").with_style(Style::Matrix).with_explode(true);
//! let user: User = from_str(&options, ";role=admin;firstName=Alex").unwrap();
//! assert_eq!(user.first_name, "Alex");
//!
//! let options = ParamOptions::new("id").with_style(Style::Label);
//! let ids: Vec<u32> = from_str(&options, ".3,4,5").unwrap();
//! assert_eq!(ids, vec![3, 4, 5]);
//! ```
//!
//! ### Encoding
//!
//! ```rust
//! use serde_param_style::{to_string, ParamOptions, Style};
//!
//! let options = ParamOptions::new("id").with_style(Style::Matrix).with_explode(true);
//! assert_eq!(to_string(&options, &[3, 4, 5]).unwrap(), ";id=3;id=4;id=5");
//! ```
//!
//! ## Scope
//!
//! Percent-decoding is the caller's job: values are handed over exactly as
//! they appear in the path, query or header, after any URL decoding the HTTP
//! layer performs. Only flat data is supported; arrays and records never
//! contain other arrays or records.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `trace` for every tokenized or encoded
//! parameter and `debug` for binding failures. Install any subscriber to see
//! them.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`path_params.rs`** - binding typed path and query parameters
//! - **`dynamic_shapes.rs`** - runtime shapes with [`field_spec!`]
//!
//! Run one with: `cargo run --example <name>`

pub mod array;
pub mod bind;
pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod record;
pub mod scalar;
pub mod ser;
pub mod tokenize;
pub mod value;

pub use array::assemble_array;
pub use bind::{bind, Shape};
pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::ParamMap;
pub use options::{Location, ParamOptions, Style};
pub use record::{assemble_record, CanonicalRecord, FieldSpec};
pub use scalar::{decode_scalar, PrimitiveKind};
pub use ser::ValueSerializer;
pub use tokenize::{scalar_token, tokenize};
pub use value::ParamValue;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Write any `T: Serialize` as a styled parameter string.
///
/// Scalars, sequences and structs/maps of scalars are supported. `None`
/// fields of a struct are left out.
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{to_string, ParamOptions, Style};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let options = ParamOptions::new("point").with_style(Style::Form);
/// assert_eq!(to_string(&options, &Point { x: 1, y: 2 }).unwrap(), "point=x,1,y,2");
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyValue`] for `None`, unit and empty collections, and
/// an error for nested collections or atoms that contain the delimiter of the
/// chosen style.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(options: &ParamOptions, value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    value
        .serialize(ValueSerializer)
        .and_then(|value| value.ok_or_else(|| Error::empty(&options.name)))
        .and_then(|value| ser::write_value(options, &value))
        .map_err(|err| err.with_param(&options.name, options.style))
}

/// Convert any `T: Serialize` to a [`ParamValue`].
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{to_value, ParamValue};
///
/// let value = to_value(&vec!["a", "b"]).unwrap();
/// assert_eq!(value, ParamValue::Array(vec!["a".into(), "b".into()]));
/// ```
///
/// # Errors
///
/// Returns an error if the value is missing (`None` or unit) or is an enum
/// variant carrying data.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<ParamValue>
where
    T: ?Sized + Serialize,
{
    ser::to_param_value(value)
}

/// Bind a styled parameter string to an instance of type `T`.
///
/// The shape of `T` selects the tokenizer: sequences and tuples bind as
/// arrays, structs and maps as records, everything else as a scalar.
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{from_str, ParamOptions, Style};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let options = ParamOptions::new("point").with_style(Style::Form).with_explode(true);
/// let point: Point = from_str(&options, "x=1&y=2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the string does not follow the style grammar or a
/// token cannot be decoded into its destination. Errors always name the
/// parameter.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'de, T>(options: &ParamOptions, raw: &'de str) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(Deserializer::new(options, raw)).map_err(|err| {
        let err = err.with_param(&options.name, options.style);
        debug!(
            param = %options.name,
            style = %options.style,
            explode = options.explode,
            error = %err,
            "Parameter binding failed"
        );
        err
    })
}

/// Bind a styled parameter from raw bytes, such as a header value.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or if [`from_str`] fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'de, T>(options: &ParamOptions, raw: &'de [u8]) -> Result<T>
where
    T: Deserialize<'de>,
{
    let s = std::str::from_utf8(raw)
        .map_err(|e| Error::custom(e).with_param(&options.name, options.style))?;
    from_str(options, s)
}
