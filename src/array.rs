//! Assembling tokens into an array of primitives.

use crate::scalar::{decode_scalar, PrimitiveKind};
use crate::{Error, ParamValue, Result};

/// Decodes every token as `kind`, in order.
///
/// The result always has exactly `tokens.len()` elements. The first failing
/// token aborts assembly and is reported with its index.
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{assemble_array, ParamValue, PrimitiveKind};
///
/// let values = assemble_array(&["3", "4", "5"], PrimitiveKind::Integer).unwrap();
/// assert_eq!(values, vec![ParamValue::Integer(3), ParamValue::Integer(4), ParamValue::Integer(5)]);
///
/// let err = assemble_array(&["3", "four"], PrimitiveKind::Integer).unwrap_err();
/// assert!(err.to_string().starts_with("error setting array element 1"));
/// ```
pub fn assemble_array(tokens: &[&str], kind: PrimitiveKind) -> Result<Vec<ParamValue>> {
    let mut values = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let value = decode_scalar(token, kind).map_err(|e| Error::element(index, e))?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_matches_tokens() {
        let tokens = ["a", "", "c"];
        let values = assemble_array(&tokens, PrimitiveKind::String).unwrap();
        assert_eq!(values.len(), tokens.len());
        assert_eq!(values[1], ParamValue::String(String::new()));
    }

    #[test]
    fn test_first_error_aborts() {
        let err = assemble_array(&["1", "x", "y"], PrimitiveKind::Number).unwrap_err();
        match err {
            Error::Element { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(*source, Error::parse("x", PrimitiveKind::Number));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
