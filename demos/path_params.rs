//! Binding typed path, query and header parameters.
//!
//! Run with: cargo run --example path_params
//! Set RUST_LOG=serde_param_style=debug to see binding failures logged.

use serde::Deserialize;
use serde_param_style::{from_str, to_string, Location, ParamOptions, Style};
use std::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    Admin,
    Member,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    role: Role,
    first_name: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // GET /users/;role=admin;firstName=Alex/orders?id=3&id=4&id=5
    let user_options = ParamOptions::new("user").with_style(Style::Matrix).with_explode(true);
    let user: User = from_str(&user_options, ";role=admin;firstName=Alex")?;
    println!("path user: {:?}", user);

    let id_options = ParamOptions::for_location(Location::Query, "id");
    let ids: Vec<u32> = from_str(&id_options, "id=3&id=4&id=5")?;
    println!("query ids: {:?}", ids);

    let trace_options = ParamOptions::for_location(Location::Header, "X-Trace");
    let trace: (String, u8) = from_str(&trace_options, "edge-1,3")?;
    println!("header trace: {:?}", trace);

    // Clients write parameters the same way
    let back = to_string(&id_options, &ids)?;
    println!("query ids encoded: {}", back);

    // A malformed value reports the parameter and its style
    if let Err(err) = from_str::<Vec<u32>>(&id_options, "id=3&id=four") {
        println!("rejected: {}", err);
    }

    match user.role {
        Role::Admin => println!("{} may manage orders", user.first_name),
        Role::Member => println!("{} may view orders", user.first_name),
    }

    Ok(())
}
