//! Configuration for binding a single styled parameter.
//!
//! - [`Style`]: the delimiter/prefix convention (simple, label, matrix, form)
//! - [`Location`]: where the parameter lives, used to pick OpenAPI defaults
//! - [`ParamOptions`]: style, explode flag and parameter name
//!
//! ## Examples
//!
//! ```rust
//! use serde_param_style::{Location, ParamOptions, Style};
//!
//! // Explicit configuration
//! let options = ParamOptions::new("id")
//!     .with_style(Style::Matrix)
//!     .with_explode(true);
//!
//! // OpenAPI defaults for a query parameter: form, exploded
//! let options = ParamOptions::for_location(Location::Query, "id");
//! assert_eq!(options.style, Style::Form);
//! assert!(options.explode);
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Serialization style of a URI parameter.
///
/// | style | scalar | array | record (explode) |
/// |-------|--------|-------|------------------|
/// | `simple` | `5` | `3,4,5` | `role=admin,firstName=Alex` |
/// | `label` | `.5` | `.3,4,5` | `.role=admin.firstName=Alex` |
/// | `matrix` | `;id=5` | `;id=3,4,5` | `;role=admin;firstName=Alex` |
/// | `form` | `id=5` | `id=3,4,5` | `role=admin&firstName=Alex` |
///
/// # Examples
///
/// ```rust
/// use serde_param_style::Style;
///
/// let style: Style = "label".parse().unwrap();
/// assert_eq!(style, Style::Label);
/// assert!("deepObject".parse::<Style>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Style {
    #[default]
    Simple,
    Label,
    Matrix,
    Form,
}

impl Style {
    /// Returns the OpenAPI name of this style.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Style::Simple => "simple",
            Style::Label => "label",
            Style::Matrix => "matrix",
            Style::Form => "form",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "simple" => Ok(Style::Simple),
            "label" => Ok(Style::Label),
            "matrix" => Ok(Style::Matrix),
            "form" => Ok(Style::Form),
            other => Err(Error::UnsupportedStyle(other.to_string())),
        }
    }
}

impl TryFrom<String> for Style {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Where a parameter is carried in the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
    Header,
    Cookie,
}

impl Location {
    /// The OpenAPI default style for this location.
    #[must_use]
    pub const fn default_style(&self) -> Style {
        match self {
            Location::Path | Location::Header => Style::Simple,
            Location::Query | Location::Cookie => Style::Form,
        }
    }

    /// The OpenAPI default explode flag: `true` exactly when the default style is `form`.
    #[must_use]
    pub const fn default_explode(&self) -> bool {
        matches!(self.default_style(), Style::Form)
    }
}

/// Options describing how one parameter is serialized.
///
/// Deserializable, so options can be loaded straight from a parameter
/// description:
///
/// ```rust
/// use serde_param_style::{ParamOptions, Style};
///
/// let options: ParamOptions =
///     serde_json::from_str(r#"{"name":"id","style":"matrix","explode":true}"#).unwrap();
/// assert_eq!(options.style, Style::Matrix);
/// assert!(options.explode);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ParamOptions {
    pub name: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub explode: bool,
}

impl ParamOptions {
    /// Creates options for `name` with the `simple` style and no explode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_param_style::{ParamOptions, Style};
    ///
    /// let options = ParamOptions::new("id");
    /// assert_eq!(options.style, Style::Simple);
    /// assert!(!options.explode);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        ParamOptions {
            name: name.into(),
            style: Style::default(),
            explode: false,
        }
    }

    /// Creates options using the OpenAPI defaults for `location`.
    #[must_use]
    pub fn for_location(location: Location, name: impl Into<String>) -> Self {
        ParamOptions {
            name: name.into(),
            style: location.default_style(),
            explode: location.default_explode(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_explode(mut self, explode: bool) -> Self {
        self.explode = explode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_round_trips_through_name() {
        for style in [Style::Simple, Style::Label, Style::Matrix, Style::Form] {
            assert_eq!(style.as_str().parse::<Style>().unwrap(), style);
        }
    }

    #[test]
    fn test_unknown_style_is_unsupported() {
        let err = "deepObject".parse::<Style>().unwrap_err();
        assert_eq!(err, Error::UnsupportedStyle("deepObject".to_string()));
        // Names are case-sensitive, like in OpenAPI documents
        assert!("Simple".parse::<Style>().is_err());
    }

    #[test]
    fn test_location_defaults() {
        let path = ParamOptions::for_location(Location::Path, "id");
        assert_eq!((path.style, path.explode), (Style::Simple, false));

        let query = ParamOptions::for_location(Location::Query, "id");
        assert_eq!((query.style, query.explode), (Style::Form, true));

        let header = ParamOptions::for_location(Location::Header, "X-Ids");
        assert_eq!((header.style, header.explode), (Style::Simple, false));

        let cookie = ParamOptions::for_location(Location::Cookie, "session");
        assert_eq!((cookie.style, cookie.explode), (Style::Form, true));
    }
}
