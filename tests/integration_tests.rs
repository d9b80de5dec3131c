use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_param_style::{
    bind, field_spec, from_str, to_string, to_value, Error, Location, ParamOptions, ParamValue,
    PrimitiveKind, Shape, Style,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct User {
    role: String,
    first_name: String,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Window {
    from: DateTime<Utc>,
    limit: Option<u32>,
}

fn alex() -> User {
    User {
        role: "admin".to_string(),
        first_name: "Alex".to_string(),
    }
}

fn options(name: &str, style: Style, explode: bool) -> ParamOptions {
    ParamOptions::new(name).with_style(style).with_explode(explode)
}

#[test]
fn test_worked_example_arrays() {
    let cases = [
        (Style::Simple, false, "3,4,5"),
        (Style::Simple, true, "3,4,5"),
        (Style::Label, true, ".3.4.5"),
        (Style::Label, false, ".3,4,5"),
        (Style::Matrix, true, ";id=3;id=4;id=5"),
        (Style::Matrix, false, ";id=3,4,5"),
        (Style::Form, true, "id=3&id=4&id=5"),
    ];

    for (style, explode, raw) in cases {
        let ids: Vec<i32> = from_str(&options("id", style, explode), raw).unwrap();
        assert_eq!(ids, vec![3, 4, 5], "{} explode={}", style, explode);
    }
}

#[test]
fn test_worked_example_records() {
    let cases = [
        (Style::Label, true, ".role=admin.firstName=Alex"),
        (Style::Label, false, ".role,admin,firstName,Alex"),
        (Style::Matrix, true, ";role=admin;firstName=Alex"),
    ];

    for (style, explode, raw) in cases {
        let user: User = from_str(&options("user", style, explode), raw).unwrap();
        assert_eq!(user, alex(), "{} explode={}", style, explode);
    }
}

#[test]
fn test_simple_scalar_int() {
    let id: i64 = from_str(&ParamOptions::new("id"), "5").unwrap();
    assert_eq!(id, 5);
}

#[test]
fn test_unsupported_style_name() {
    let err = "deepObject".parse::<Style>().unwrap_err();
    assert!(err.is_unsupported_style());
    assert_eq!(err.to_string(), "unhandled parameter style: deepObject");
}

#[test]
fn test_matrix_without_prefix_names_param() {
    let err = from_str::<Vec<i32>>(&options("id", Style::Matrix, false), "3,4,5").unwrap_err();
    assert!(matches!(err, Error::Format { ref name, .. } if name == "id"));
}

#[test]
fn test_deny_unknown_fields_is_record_error() {
    #[derive(Deserialize, Debug)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct Strict {
        role: String,
    }

    let err = from_str::<Strict>(
        &options("user", Style::Form, true),
        "role=admin&firstName=Alex",
    )
    .unwrap_err();
    match err {
        Error::Record { name, source } => {
            assert_eq!(name, "user");
            assert!(source.to_string().contains("firstName"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_duplicate_keys_last_wins() {
    let user: User = from_str(
        &options("user", Style::Simple, true),
        "role=user,firstName=Alex,role=admin",
    )
    .unwrap();
    assert_eq!(user, alex());
}

#[test]
fn test_missing_optional_field() {
    let window: Window = from_str(
        &options("window", Style::Form, true),
        "from=2024-05-01T12:00:00Z",
    )
    .unwrap();
    assert_eq!(window.from, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    assert_eq!(window.limit, None);

    let window: Window = from_str(
        &options("window", Style::Matrix, true),
        ";from=2024-05-01T12:00:00Z;limit=10",
    )
    .unwrap();
    assert_eq!(window.limit, Some(10));
}

#[test]
fn test_borrowed_tokens() {
    #[derive(Deserialize)]
    struct Tags<'a> {
        #[serde(borrow)]
        primary: &'a str,
    }

    let raw = String::from("primary=rust&secondary=serde");
    let tags: Tags<'_> = from_str(&options("tags", Style::Form, true), &raw).unwrap();
    assert_eq!(tags.primary, "rust");
}

#[test]
fn test_options_from_json() {
    let options: ParamOptions =
        serde_json::from_str(r#"{"name":"id","style":"label","explode":true}"#).unwrap();
    let ids: Vec<u8> = from_str(&options, ".1.2").unwrap();
    assert_eq!(ids, vec![1, 2]);

    let defaults: ParamOptions = serde_json::from_str(r#"{"name":"id"}"#).unwrap();
    assert_eq!(defaults, ParamOptions::new("id"));

    assert!(serde_json::from_str::<ParamOptions>(r#"{"name":"id","style":"deepObject"}"#).is_err());
}

#[test]
fn test_location_defaults() {
    let query = ParamOptions::for_location(Location::Query, "id");
    assert_eq!((query.style, query.explode), (Style::Form, true));
    let ids: Vec<u32> = from_str(&query, "id=1&id=2").unwrap();
    assert_eq!(ids, vec![1, 2]);

    let path = ParamOptions::for_location(Location::Path, "id");
    assert_eq!((path.style, path.explode), (Style::Simple, false));

    let header = ParamOptions::for_location(Location::Header, "X-Id");
    assert_eq!((header.style, header.explode), (Style::Simple, false));

    let cookie = ParamOptions::for_location(Location::Cookie, "session");
    assert_eq!((cookie.style, cookie.explode), (Style::Form, true));
}

#[test]
fn test_dynamic_bind_matches_typed_decode() {
    let opts = options("user", Style::Label, true);
    let raw = ".role=admin.firstName=Alex";

    let shape = Shape::Record(field_spec! { "role" => String, "firstName" => String });
    let dynamic = bind(&opts, raw, &shape).unwrap();
    let typed: User = from_str(&opts, raw).unwrap();

    assert_eq!(dynamic, to_value(&typed).unwrap());
}

#[test]
fn test_dynamic_bind_errors() {
    let opts = options("id", Style::Form, true);
    let err = bind(&opts, "id=1&id=two", &Shape::Array(PrimitiveKind::Integer)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter 'id' (form): error setting array element 1: cannot parse 'two' as integer"
    );

    let shape = Shape::Record(field_spec! { "min" => Number });
    let err = bind(&options("f", Style::Form, true), "min=1&max=2", &shape).unwrap_err();
    assert!(matches!(err.root_cause(), Error::UnknownField { field } if field == "max"));
}

#[test]
fn test_encode_worked_examples() {
    let cases = [
        (Style::Simple, false, "role,admin,firstName,Alex"),
        (Style::Simple, true, "role=admin,firstName=Alex"),
        (Style::Label, false, ".role,admin,firstName,Alex"),
        (Style::Label, true, ".role=admin.firstName=Alex"),
        (Style::Matrix, false, ";user=role,admin,firstName,Alex"),
        (Style::Matrix, true, ";role=admin;firstName=Alex"),
        (Style::Form, false, "user=role,admin,firstName,Alex"),
        (Style::Form, true, "role=admin&firstName=Alex"),
    ];

    for (style, explode, expected) in cases {
        let text = to_string(&options("user", style, explode), &alex()).unwrap();
        assert_eq!(text, expected);
    }
}

#[test]
fn test_dynamic_value_to_styled() {
    let value = ParamValue::Array(vec![true.into(), false.into()]);
    assert_eq!(
        value.to_styled(&options("flags", Style::Form, false)).unwrap(),
        "flags=true,false"
    );

    let nested = ParamValue::Array(vec![ParamValue::Array(vec![1.into()])]);
    assert!(nested.to_styled(&ParamOptions::new("n")).is_err());
}
