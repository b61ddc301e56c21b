//! Print the OpenAPI document as JSON.
//!
//! Pass an API version to rewrite the documented paths, for example
//! `openapi-dump 2` prints paths under `/api/v2`.

use std::io;

use org_registry::doc::openapi_for_version;

fn main() -> io::Result<()> {
    let version = std::env::args().nth(1).unwrap_or_else(|| "1".to_owned());
    let json = openapi_for_version(&version)
        .to_pretty_json()
        .map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
