//! Splitting a raw parameter string into tokens.
//!
//! Each (style, explode) pair maps to one rule: a required lead, a delimiter
//! and whether `name=` is stripped from every token. The table below is the
//! whole grammar; `Rule::for_style` is its code form and the encoder reads the
//! same table.
//!
//! | style | explode | lead | delimiter | strip `name=` |
//! |-------|---------|------|-----------|---------------|
//! | simple | any | none | `,` | never |
//! | label | false | `.` | `,` | never |
//! | label | true | `.` | `.` | never |
//! | matrix | false | `;name=` | `,` | never |
//! | matrix | true | `;` | `;` | arrays only |
//! | form | false | none | `,` | always |
//! | form | true | none | `&` | arrays only |
//!
//! Exploded matrix and form arrays repeat the parameter name on every token
//! (`;id=3;id=4`), while exploded records carry each field's own name
//! (`;role=admin;firstName=Alex`). Record tokens keep their `key=value` form
//! and are paired later by [`assemble_record`](crate::record::assemble_record).
//!
//! ```rust
//! use serde_param_style::{tokenize, Style};
//!
//! let tokens = tokenize(Style::Matrix, true, false, "id", ";id=3;id=4;id=5").unwrap();
//! assert_eq!(tokens, vec!["3", "4", "5"]);
//!
//! let tokens = tokenize(Style::Matrix, true, true, "id", ";role=admin;firstName=Alex").unwrap();
//! assert_eq!(tokens, vec!["role=admin", "firstName=Alex"]);
//! ```

use crate::{Error, Result, Style};
use tracing::trace;

/// Leading text a style requires before the first token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lead {
    None,
    Dot,
    Semicolon,
    /// `;` followed by the parameter name and `=`
    SemicolonName,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameStrip {
    Never,
    Always,
    ArraysOnly,
}

/// One row of the grammar table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rule {
    pub(crate) lead: Lead,
    pub(crate) delimiter: char,
    pub(crate) name_strip: NameStrip,
}

impl Rule {
    pub(crate) const fn for_style(style: Style, explode: bool) -> Rule {
        let (lead, delimiter, name_strip) = match (style, explode) {
            (Style::Simple, _) => (Lead::None, ',', NameStrip::Never),
            (Style::Label, false) => (Lead::Dot, ',', NameStrip::Never),
            (Style::Label, true) => (Lead::Dot, '.', NameStrip::Never),
            (Style::Matrix, false) => (Lead::SemicolonName, ',', NameStrip::Never),
            (Style::Matrix, true) => (Lead::Semicolon, ';', NameStrip::ArraysOnly),
            (Style::Form, false) => (Lead::None, ',', NameStrip::Always),
            (Style::Form, true) => (Lead::None, '&', NameStrip::ArraysOnly),
        };
        Rule {
            lead,
            delimiter,
            name_strip,
        }
    }

    pub(crate) const fn strips_name(&self, keyed: bool) -> bool {
        match self.name_strip {
            NameStrip::Never => false,
            NameStrip::Always => true,
            NameStrip::ArraysOnly => !keyed,
        }
    }

    fn strip_lead<'a>(&self, style: Style, name: &str, raw: &'a str) -> Result<&'a str> {
        match self.lead {
            Lead::None => Ok(raw),
            Lead::Dot => raw
                .strip_prefix('.')
                .ok_or_else(|| Error::format(style, name, "a leading '.'")),
            Lead::Semicolon => raw
                .strip_prefix(';')
                .ok_or_else(|| Error::format(style, name, "a leading ';'")),
            Lead::SemicolonName => {
                let prefix = format!(";{}=", name);
                raw.strip_prefix(prefix.as_str())
                    .ok_or_else(|| Error::format(style, name, &format!("a leading '{}'", prefix)))
            }
        }
    }
}

/// Splits `raw` into tokens following the grammar of `style` and `explode`.
///
/// `keyed` selects the record extraction rules; it only matters for exploded
/// matrix and form, where array tokens lose their `name=` prefix and record
/// tokens do not.
///
/// # Errors
///
/// - [`Error::EmptyValue`] when `raw` is empty
/// - [`Error::Format`] when the required lead (`.`, `;` or `;name=`) is missing
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{tokenize, Style};
///
/// // Simple style splits the same way whether exploded or not
/// assert_eq!(tokenize(Style::Simple, false, false, "id", "3,4,5").unwrap(), vec!["3", "4", "5"]);
/// assert_eq!(tokenize(Style::Simple, true, false, "id", "3,4,5").unwrap(), vec!["3", "4", "5"]);
///
/// assert!(tokenize(Style::Label, false, false, "id", "").unwrap_err().is_empty_value());
/// ```
pub fn tokenize<'a>(
    style: Style,
    explode: bool,
    keyed: bool,
    name: &str,
    raw: &'a str,
) -> Result<Vec<&'a str>> {
    if raw.is_empty() {
        return Err(Error::empty(name));
    }

    let rule = Rule::for_style(style, explode);
    let body = rule.strip_lead(style, name, raw)?;

    let tokens: Vec<&'a str> = if rule.strips_name(keyed) {
        let prefix = format!("{}=", name);
        body.split(rule.delimiter)
            .map(|token| token.strip_prefix(prefix.as_str()).unwrap_or(token))
            .collect()
    } else {
        body.split(rule.delimiter).collect()
    };

    trace!(
        style = %style,
        explode,
        keyed,
        param = name,
        tokens = tokens.len(),
        "Parameter tokenized"
    );
    Ok(tokens)
}

/// Extracts the single token of a scalar parameter.
///
/// Applies the same lead and `name=` rules as an array, but never splits, so
/// delimiter characters inside a scalar are kept.
///
/// ```rust
/// use serde_param_style::{scalar_token, Style};
///
/// assert_eq!(scalar_token(Style::Label, false, "id", ".5").unwrap(), "5");
/// assert_eq!(scalar_token(Style::Matrix, true, "id", ";id=5").unwrap(), "5");
/// assert_eq!(scalar_token(Style::Form, true, "q", "q=a,b").unwrap(), "a,b");
/// ```
pub fn scalar_token<'a>(style: Style, explode: bool, name: &str, raw: &'a str) -> Result<&'a str> {
    if raw.is_empty() {
        return Err(Error::empty(name));
    }

    let rule = Rule::for_style(style, explode);
    let body = rule.strip_lead(style, name, raw)?;
    let token = if rule.strips_name(false) {
        let prefix = format!("{}=", name);
        body.strip_prefix(prefix.as_str()).unwrap_or(body)
    } else {
        body
    };

    trace!(style = %style, explode, param = name, "Scalar parameter extracted");
    Ok(token)
}
