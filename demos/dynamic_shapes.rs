//! Binding parameters whose shape is only known at runtime.
//!
//! Run with: cargo run --example dynamic_shapes

use serde_param_style::{bind, field_spec, ParamOptions, PrimitiveKind, Shape};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Parameter definitions as they might be loaded from an API description
    let definitions = [
        (
            r#"{"name":"filter","style":"form","explode":true}"#,
            Shape::Record(field_spec! {
                "min" => Number,
                "max" => Number,
                "inStock" => Boolean,
            }),
            "min=1.5&max=20&inStock=true",
        ),
        (
            r#"{"name":"id","style":"label","explode":true}"#,
            Shape::Array(PrimitiveKind::Integer),
            ".3.4.5",
        ),
        (
            r#"{"name":"lang","style":"simple"}"#,
            Shape::Scalar(PrimitiveKind::String),
            "en",
        ),
    ];

    for (definition, shape, raw) in &definitions {
        let options: ParamOptions = serde_json::from_str(definition)?;
        let value = bind(&options, raw, shape)?;
        println!("{} = {}", options.name, value);
        println!("  re-encoded: {}", value.to_styled(&options)?);
    }

    // Undeclared keys are rejected unless the schema is open
    let options = ParamOptions::new("filter").with_explode(true);
    let closed = Shape::Record(field_spec! { "min" => Number });
    let open = Shape::Record(field_spec! { .., "min" => Number });
    let raw = "min=1,sort=asc";

    if let Err(err) = bind(&options, raw, &closed) {
        println!("closed schema: {}", err);
    }
    println!("open schema: {}", bind(&options, raw, &open)?);

    Ok(())
}
