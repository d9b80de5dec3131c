//! Error types for styled parameter decoding and encoding.
//!
//! Every layer of the codec returns [`Result`]; nothing panics on bad input.
//!
//! ## Error Categories
//!
//! - **Empty values**: the raw parameter string was empty
//! - **Format errors**: the string violates the style grammar (missing prefix,
//!   unpaired record tokens, malformed `key=value`)
//! - **Parse errors**: a token does not lex as the requested primitive
//! - **Unsupported styles**: a style name outside `simple`, `label`, `matrix`, `form`
//!
//! Failures further down (an array element, a record field) are wrapped with
//! the enclosing context, so the outermost message is fully qualified. Use
//! [`Error::root_cause`] to get at the original failure.
//!
//! ## Examples
//!
//! ```rust
//! use serde_param_style::{from_str, ParamOptions, Style};
//!
//! let options = ParamOptions::new("id").with_style(Style::Matrix);
//! let err = from_str::<Vec<i32>>(&options, "3,4,5").unwrap_err();
//! assert!(err.is_format());
//! assert!(err.to_string().contains("'id'"));
//! ```

use crate::options::Style;
use crate::scalar::PrimitiveKind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while binding or encoding a parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The raw value was empty
    #[error("parameter '{name}' is empty, can't bind its value")]
    EmptyValue { name: String },

    /// The raw value does not follow the style grammar
    #[error("invalid format for {style} parameter '{name}': expected {expected}")]
    Format {
        style: Style,
        name: String,
        expected: String,
    },

    /// A token could not be parsed as the requested primitive
    #[error("cannot parse '{token}' as {kind}")]
    Parse { token: String, kind: PrimitiveKind },

    /// Unknown style identifier
    #[error("unhandled parameter style: {0}")]
    UnsupportedStyle(String),

    /// An array element failed to decode
    #[error("error setting array element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// The structured decode of a record rejected the key/value pairs
    #[error("error binding parameter {name} fields: {source}")]
    Record {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// A dynamic record schema does not declare this field
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// Parameter context added by the dispatcher
    #[error("parameter '{name}' ({style}): {source}")]
    Param {
        name: String,
        style: Style,
        #[source]
        source: Box<Error>,
    },

    /// The destination or value shape has no representation in the grammar
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Custom error raised through serde
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an empty-value error for `name`.
    pub fn empty(name: &str) -> Self {
        Error::EmptyValue {
            name: name.to_string(),
        }
    }

    /// Creates a grammar error naming the parameter and the expected pattern.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_param_style::{Error, Style};
    ///
    /// let err = Error::format(Style::Label, "id", "'.'");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid format for label parameter 'id': expected '.'"
    /// );
    /// ```
    pub fn format(style: Style, name: &str, expected: &str) -> Self {
        Error::Format {
            style,
            name: name.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates a parse error for a token that does not match `kind`.
    pub fn parse(token: &str, kind: PrimitiveKind) -> Self {
        Error::Parse {
            token: token.to_string(),
            kind,
        }
    }

    pub fn unsupported(msg: &str) -> Self {
        Error::Unsupported(msg.to_string())
    }

    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    pub(crate) fn element(index: usize, source: Error) -> Self {
        Error::Element {
            index,
            source: Box::new(source),
        }
    }

    pub(crate) fn record(name: &str, source: Error) -> Self {
        Error::Record {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    /// Wraps the error with parameter context unless it already names the parameter.
    pub(crate) fn with_param(self, name: &str, style: Style) -> Self {
        match self {
            Error::EmptyValue { .. }
            | Error::Format { .. }
            | Error::UnsupportedStyle(_)
            | Error::Record { .. }
            | Error::Param { .. } => self,
            other => Error::Param {
                name: name.to_string(),
                style,
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, skipping element, record and parameter wrappers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_param_style::{from_str, Error, ParamOptions};
    ///
    /// let err = from_str::<Vec<u8>>(&ParamOptions::new("id"), "1,x").unwrap_err();
    /// assert!(matches!(err.root_cause(), Error::Parse { .. }));
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Element { source, .. }
            | Error::Record { source, .. }
            | Error::Param { source, .. } => source.root_cause(),
            other => other,
        }
    }

    #[must_use]
    pub fn is_empty_value(&self) -> bool {
        matches!(self.root_cause(), Error::EmptyValue { .. })
    }

    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self.root_cause(), Error::Format { .. })
    }

    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self.root_cause(), Error::Parse { .. })
    }

    #[must_use]
    pub fn is_unsupported_style(&self) -> bool {
        matches!(self.root_cause(), Error::UnsupportedStyle(_))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_nested_context() {
        let err = Error::element(2, Error::parse("x", PrimitiveKind::Integer))
            .with_param("id", Style::Simple);
        assert!(matches!(err, Error::Param { .. }));
        assert!(err.is_parse());
        assert_eq!(
            err.to_string(),
            "parameter 'id' (simple): error setting array element 2: cannot parse 'x' as integer"
        );
    }

    #[test]
    fn test_with_param_keeps_named_errors() {
        let err = Error::empty("id").with_param("id", Style::Form);
        assert_eq!(err, Error::empty("id"));

        let err = Error::format(Style::Matrix, "id", "';id='").with_param("id", Style::Matrix);
        assert!(matches!(err, Error::Format { .. }));
    }
}
