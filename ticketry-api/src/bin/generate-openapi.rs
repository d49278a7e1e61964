//! OpenAPI Specification Generator Binary
//!
//! Writes the Ticketry OpenAPI specification as JSON to stdout.
//!
//! Usage:
//!   cargo run -p ticketry-api --bin generate-openapi --features openapi > openapi.json

use ticketry_api::ApiDoc;

fn main() {
    match ApiDoc::to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI spec: {}", e);
            std::process::exit(1);
        }
    }
}
