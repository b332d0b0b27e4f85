use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src/api.rs");
    println!("cargo:rerun-if-changed=src/db/models.rs");
    println!("cargo:rerun-if-changed=src/services/advisory_service.rs");
    println!("cargo:rerun-if-changed=src/advisory");
    println!("cargo:rerun-if-changed=src/alerts");
    println!("cargo:rerun-if-changed=migrations");

    // The real spec comes from `cargo run --bin generate-openapi`
    let openapi_path = Path::new("openapi.json");

    if !openapi_path.exists() {
        let placeholder = r#"{
  "note": "Run 'cargo run --bin generate-openapi' to generate the OpenAPI spec"
}"#;
        fs::write(openapi_path, placeholder).expect("Failed to create openapi.json placeholder");
    }
}
