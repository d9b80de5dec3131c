/// Builds a [`FieldSpec`](crate::FieldSpec) from `"name" => Kind` pairs.
///
/// `Kind` is any [`PrimitiveKind`](crate::PrimitiveKind) variant name. A
/// leading `..` accepts undeclared keys as strings.
///
/// # Examples
///
/// ```rust
/// use serde_param_style::{field_spec, PrimitiveKind};
///
/// let spec = field_spec! {
///     "role" => String,
///     "age" => Integer,
/// };
/// assert_eq!(spec.kind_of("age"), Some(PrimitiveKind::Integer));
///
/// let open = field_spec! { .., "role" => String };
/// assert_eq!(open.len(), 1);
/// ```
#[macro_export]
macro_rules! field_spec {
    () => {
        $crate::FieldSpec::new()
    };

    (.. $(, $name:literal => $kind:ident)* $(,)?) => {
        $crate::field_spec!($($name => $kind),*).allow_unknown(true)
    };

    ($($name:literal => $kind:ident),+ $(,)?) => {
        $crate::FieldSpec::new()
            $(.field($name, $crate::PrimitiveKind::$kind))+
    };
}

#[cfg(test)]
mod tests {
    use crate::{assemble_record, FieldSpec, PrimitiveKind, Style};

    #[test]
    fn test_field_spec_macro_matches_builder() {
        let built = FieldSpec::new()
            .field("min", PrimitiveKind::Number)
            .field("strict", PrimitiveKind::Boolean);
        assert_eq!(field_spec! { "min" => Number, "strict" => Boolean }, built);
        assert!(field_spec!().is_empty());
    }

    #[test]
    fn test_field_spec_macro_open_record() {
        let spec = field_spec! { .., "id" => Integer };
        let record = assemble_record(&["id=1", "tag=x"], true, Style::Form, "p").unwrap();
        let map = spec.populate(&record).unwrap();
        assert_eq!(map.get("tag").and_then(|v| v.as_str()), Some("x"));

        assert!(field_spec! { .. }.populate(&record).is_ok());
    }
}
