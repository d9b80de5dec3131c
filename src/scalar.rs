//! Decoding a single token into a primitive.

use crate::{Error, ParamValue, Result};
use std::fmt;
use std::str::FromStr;

/// Primitive kinds a token can be decoded into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Base-10 signed integer
    Integer,
    /// IEEE-754 double
    Number,
    /// Exactly `true` or `false`
    Boolean,
    /// Raw token text
    String,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::String => "string",
        })
    }
}

/// Decodes `token` as a value of `kind`.
///
/// There is no coercion between kinds: `"abc"` is never an integer and `"1"`
/// is never a boolean.
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{decode_scalar, ParamValue, PrimitiveKind};
///
/// assert_eq!(decode_scalar("42", PrimitiveKind::Integer).unwrap(), ParamValue::Integer(42));
/// assert_eq!(decode_scalar("true", PrimitiveKind::Boolean).unwrap(), ParamValue::Bool(true));
/// assert!(decode_scalar("abc", PrimitiveKind::Integer).is_err());
/// ```
pub fn decode_scalar(token: &str, kind: PrimitiveKind) -> Result<ParamValue> {
    match kind {
        PrimitiveKind::Integer => parse_token(token, kind).map(ParamValue::Integer),
        PrimitiveKind::Number => parse_token(token, kind).map(ParamValue::Float),
        PrimitiveKind::Boolean => parse_bool(token).map(ParamValue::Bool),
        PrimitiveKind::String => Ok(ParamValue::String(token.to_string())),
    }
}

/// Parses `token` with `T`'s `FromStr`, reporting failures as `kind`.
pub(crate) fn parse_token<T: FromStr>(token: &str, kind: PrimitiveKind) -> Result<T> {
    token.parse::<T>().map_err(|_| Error::parse(token, kind))
}

pub(crate) fn parse_bool(token: &str) -> Result<bool> {
    match token {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::parse(token, PrimitiveKind::Boolean)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_tokens() {
        assert_eq!(decode_scalar("-17", PrimitiveKind::Integer).unwrap(), ParamValue::Integer(-17));
        assert_eq!(
            decode_scalar("3.5", PrimitiveKind::Integer).unwrap_err(),
            Error::parse("3.5", PrimitiveKind::Integer)
        );
        assert!(decode_scalar("", PrimitiveKind::Integer).is_err());
        assert!(decode_scalar("99999999999999999999", PrimitiveKind::Integer).is_err());
    }

    #[test]
    fn test_number_tokens() {
        assert_eq!(decode_scalar("2.5", PrimitiveKind::Number).unwrap(), ParamValue::Float(2.5));
        assert_eq!(decode_scalar("7", PrimitiveKind::Number).unwrap(), ParamValue::Float(7.0));
        assert!(decode_scalar("seven", PrimitiveKind::Number).is_err());
    }

    #[test]
    fn test_boolean_tokens_are_strict() {
        assert_eq!(decode_scalar("false", PrimitiveKind::Boolean).unwrap(), ParamValue::Bool(false));
        for token in ["1", "0", "TRUE", "yes", ""] {
            assert!(decode_scalar(token, PrimitiveKind::Boolean).is_err(), "{}", token);
        }
    }

    #[test]
    fn test_string_tokens_are_kept_verbatim() {
        assert_eq!(
            decode_scalar("a \"quoted\" \\ value", PrimitiveKind::String).unwrap(),
            ParamValue::String("a \"quoted\" \\ value".to_string())
        );
        assert_eq!(decode_scalar("", PrimitiveKind::String).unwrap(), ParamValue::String(String::new()));
    }

    #[test]
    fn test_parse_token_reports_kind() {
        let err = parse_token::<u8>("300", PrimitiveKind::Integer).unwrap_err();
        assert_eq!(err.to_string(), "cannot parse '300' as integer");
    }
}
