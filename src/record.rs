//! Pairing tokens into keyed records.
//!
//! [`assemble_record`] turns a token sequence into a [`CanonicalRecord`]: an
//! ordered set of `key -> value` string pairs. The record is then handed to a
//! structured decoder, either serde (see [`from_str`](crate::from_str)) or a
//! dynamic [`FieldSpec`].
//!
//! Pairing depends on explode:
//!
//! - **not exploded**: tokens alternate key, value, key, value (`role,admin,firstName,Alex`)
//! - **exploded**: each token is a single `key=value` (`role=admin`)
//!
//! A key that appears twice keeps its first position and takes the last value.

use crate::scalar::{decode_scalar, PrimitiveKind};
use crate::{Error, ParamMap, Result, Style};
use indexmap::IndexMap;

/// Ordered key/value pairs extracted from a record parameter.
///
/// Keys and values borrow from the raw parameter string.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CanonicalRecord<'a> {
    entries: IndexMap<&'a str, &'a str>,
}

impl<'a> CanonicalRecord<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair; a repeated key is overwritten in place.
    pub fn insert(&mut self, key: &'a str, value: &'a str) -> Option<&'a str> {
        self.entries.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

impl<'a> IntoIterator for CanonicalRecord<'a> {
    type Item = (&'a str, &'a str);
    type IntoIter = indexmap::map::IntoIter<&'a str, &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Pairs `tokens` into a [`CanonicalRecord`].
///
/// `style` and `name` only feed error messages.
///
/// # Errors
///
/// [`Error::Format`] when a non-exploded sequence has odd length, or when an
/// exploded token does not contain exactly one `=`.
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{assemble_record, Style};
///
/// let record = assemble_record(&["role", "admin", "firstName", "Alex"], false, Style::Simple, "user").unwrap();
/// assert_eq!(record.get("firstName"), Some("Alex"));
///
/// let record = assemble_record(&["role=admin", "firstName=Alex"], true, Style::Label, "user").unwrap();
/// assert_eq!(record.get("role"), Some("admin"));
///
/// assert!(assemble_record(&["role", "admin", "firstName"], false, Style::Simple, "user").is_err());
/// ```
pub fn assemble_record<'a>(
    tokens: &[&'a str],
    explode: bool,
    style: Style,
    name: &str,
) -> Result<CanonicalRecord<'a>> {
    let mut record = CanonicalRecord {
        entries: IndexMap::with_capacity(if explode { tokens.len() } else { tokens.len() / 2 }),
    };

    if explode {
        for token in tokens {
            match token.split_once('=') {
                Some((key, value)) if !value.contains('=') => {
                    record.insert(key, value);
                }
                _ => {
                    return Err(Error::format(
                        style,
                        name,
                        &format!("exploded 'key=value' properties, found '{}'", token),
                    ))
                }
            }
        }
    } else {
        if tokens.len() % 2 != 0 {
            return Err(Error::format(
                style,
                name,
                "key,value pairs, found an odd number of tokens",
            ));
        }
        for pair in tokens.chunks_exact(2) {
            record.insert(pair[0], pair[1]);
        }
    }

    Ok(record)
}

/// A runtime record schema: field names and the primitive kind of each.
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{assemble_record, FieldSpec, PrimitiveKind, Style};
///
/// let spec = FieldSpec::new()
///     .field("role", PrimitiveKind::String)
///     .field("age", PrimitiveKind::Integer);
///
/// let record = assemble_record(&["role=admin", "age=30"], true, Style::Form, "user").unwrap();
/// let map = spec.populate(&record).unwrap();
/// assert_eq!(map.get("age").and_then(|v| v.as_i64()), Some(30));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FieldSpec {
    fields: IndexMap<String, PrimitiveKind>,
    allow_unknown: bool,
}

impl FieldSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    /// Accept undeclared keys as strings instead of failing.
    #[must_use]
    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    #[must_use]
    pub fn kind_of(&self, field: &str) -> Option<PrimitiveKind> {
        self.fields.get(field).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decodes every pair of `record` against this schema.
    ///
    /// Fields absent from the record are absent from the result.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`] for undeclared keys (unless allowed), or the
    /// scalar decode error of a mistyped value.
    pub fn populate(&self, record: &CanonicalRecord<'_>) -> Result<ParamMap> {
        let mut map = ParamMap::with_capacity(record.len());
        for (key, value) in record.iter() {
            let kind = match self.kind_of(key) {
                Some(kind) => kind,
                None if self.allow_unknown => PrimitiveKind::String,
                None => {
                    return Err(Error::UnknownField {
                        field: key.to_string(),
                    })
                }
            };
            map.insert(key.to_string(), decode_scalar(value, kind)?);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamValue;

    #[test]
    fn test_exploded_token_needs_exactly_one_equals() {
        for bad in ["role", "role=admin=root"] {
            let err = assemble_record(&[bad], true, Style::Matrix, "user").unwrap_err();
            assert!(matches!(err, Error::Format { style: Style::Matrix, .. }), "{}", bad);
        }
    }

    #[test]
    fn test_empty_key_and_value_are_allowed() {
        let record = assemble_record(&["=", "a="], true, Style::Simple, "p").unwrap();
        assert_eq!(record.get(""), Some(""));
        assert_eq!(record.get("a"), Some(""));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let record =
            assemble_record(&["role", "user", "name", "Alex", "role", "admin"], false, Style::Simple, "u")
                .unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("role"), Some("admin"));
        let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["role", "name"]);
    }

    #[test]
    fn test_odd_pairs_message() {
        let err = assemble_record(&["a"], false, Style::Form, "filter").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid format for form parameter 'filter': expected key,value pairs, found an odd number of tokens"
        );
    }

    #[test]
    fn test_field_spec_rejects_unknown() {
        let spec = FieldSpec::new().field("role", PrimitiveKind::String);
        let record = assemble_record(&["role=admin", "x=1"], true, Style::Simple, "u").unwrap();
        assert_eq!(
            spec.populate(&record).unwrap_err(),
            Error::UnknownField {
                field: "x".to_string()
            }
        );

        let map = spec.allow_unknown(true).populate(&record).unwrap();
        assert_eq!(map.get("x"), Some(&ParamValue::from("1")));
    }

    #[test]
    fn test_field_spec_type_mismatch() {
        let spec = FieldSpec::new().field("age", PrimitiveKind::Integer);
        let record = assemble_record(&["age", "old"], false, Style::Simple, "u").unwrap();
        assert!(spec.populate(&record).unwrap_err().is_parse());
    }
}
