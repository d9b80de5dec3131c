//! Binding a parameter to a runtime-chosen shape.
//!
//! [`bind`] is the dynamic counterpart of [`from_str`](crate::from_str): the
//! caller states the destination [`Shape`] explicitly instead of letting a
//! Rust type imply it. The shape alone decides the tokenizer mode; the raw
//! string is never inspected to guess it.

use crate::array::assemble_array;
use crate::record::{assemble_record, FieldSpec};
use crate::scalar::{decode_scalar, PrimitiveKind};
use crate::tokenize::{scalar_token, tokenize};
use crate::{Error, ParamOptions, ParamValue, Result};
use tracing::debug;

/// The shape of a destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// A single primitive
    Scalar(PrimitiveKind),
    /// An ordered list of primitives of one kind
    Array(PrimitiveKind),
    /// A keyed record described by a schema
    Record(FieldSpec),
}

impl Shape {
    /// Returns `true` when the shape uses record tokenization.
    #[must_use]
    pub const fn is_keyed(&self) -> bool {
        matches!(self, Shape::Record(_))
    }
}

/// Decodes `raw` into a [`ParamValue`] of the given shape.
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{bind, FieldSpec, ParamOptions, PrimitiveKind, Shape, Style};
///
/// let options = ParamOptions::new("user").with_style(Style::Label).with_explode(true);
/// let shape = Shape::Record(
///     FieldSpec::new()
///         .field("role", PrimitiveKind::String)
///         .field("firstName", PrimitiveKind::String),
/// );
///
/// let value = bind(&options, ".role=admin.firstName=Alex", &shape).unwrap();
/// let record = value.as_record().unwrap();
/// assert_eq!(record.get("firstName").and_then(|v| v.as_str()), Some("Alex"));
/// ```
///
/// # Errors
///
/// Any tokenizer, pairing or decode error. Errors that do not already name
/// the parameter are wrapped in [`Error::Param`].
pub fn bind(options: &ParamOptions, raw: &str, shape: &Shape) -> Result<ParamValue> {
    let name = options.name.as_str();
    let result = match shape {
        Shape::Scalar(kind) => scalar_token(options.style, options.explode, name, raw)
            .and_then(|token| decode_scalar(token, *kind)),
        Shape::Array(kind) => tokenize(options.style, options.explode, false, name, raw)
            .and_then(|tokens| assemble_array(&tokens, *kind))
            .map(ParamValue::Array),
        Shape::Record(spec) => tokenize(options.style, options.explode, true, name, raw)
            .and_then(|tokens| assemble_record(&tokens, options.explode, options.style, name))
            .and_then(|record| spec.populate(&record).map_err(|e| Error::record(name, e)))
            .map(ParamValue::Record),
    };

    result.map_err(|err| {
        let err = err.with_param(name, options.style);
        debug!(
            param = name,
            style = %options.style,
            explode = options.explode,
            error = %err,
            "Parameter binding failed"
        );
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Style;

    #[test]
    fn test_simple_scalar() {
        let options = ParamOptions::new("id");
        let value = bind(&options, "5", &Shape::Scalar(PrimitiveKind::Integer)).unwrap();
        assert_eq!(value, ParamValue::Integer(5));
    }

    #[test]
    fn test_scalar_keeps_commas() {
        let options = ParamOptions::new("q").with_style(Style::Form).with_explode(true);
        let value = bind(&options, "q=a,b", &Shape::Scalar(PrimitiveKind::String)).unwrap();
        assert_eq!(value, ParamValue::from("a,b"));
    }

    #[test]
    fn test_array_parse_error_is_wrapped_with_param() {
        let options = ParamOptions::new("id").with_style(Style::Matrix).with_explode(true);
        let err = bind(&options, ";id=3;id=x", &Shape::Array(PrimitiveKind::Integer)).unwrap_err();
        assert!(matches!(err, Error::Param { .. }));
        assert!(err.is_parse());
        assert!(err.to_string().starts_with("parameter 'id' (matrix)"));
    }

    #[test]
    fn test_record_errors_are_record_stage() {
        let options = ParamOptions::new("user");
        let shape = Shape::Record(FieldSpec::new().field("role", PrimitiveKind::String));
        let err = bind(&options, "role,admin,age,30", &shape).unwrap_err();
        assert!(matches!(err, Error::Record { .. }));

        let err = bind(&options, "role,admin,age", &shape).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_shape_never_sniffed_from_input() {
        // A record-looking string bound as an array is just three string tokens
        let options = ParamOptions::new("p").with_explode(true);
        let value = bind(&options, "a=1,b=2,c=3", &Shape::Array(PrimitiveKind::String)).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert!(Shape::Record(FieldSpec::new()).is_keyed());
    }
}
