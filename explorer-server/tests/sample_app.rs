//! Verifies the bundled sample host description renders complete documents.

use std::fs;
use std::path::PathBuf;

use explorer_core::{ExplorerConfig, HostApp, render_declaration, render_listing};

fn read_sample_app() -> HostApp {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("app.json");
    let raw = fs::read_to_string(&path).expect("read explorer-server app.json");
    HostApp::from_json(&raw).expect("parse sample app")
}

#[test]
fn sample_app_lists_public_models() {
    let app = read_sample_app();
    let listing = render_listing(&app, &ExplorerConfig::default());
    let paths: Vec<&str> = listing.apis.iter().map(|api| api.path.as_str()).collect();
    assert_eq!(paths, vec!["/products", "/categories"]);
}

#[test]
fn sample_app_declarations_reference_every_model() {
    let app = read_sample_app();
    let product = app.find_by_path("products").expect("products resource");
    let declaration = render_declaration(
        product,
        &app.registry(),
        "http://localhost:3000/api",
        app.api_version(),
    );
    let names: Vec<&str> = declaration.models.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Image", "Product", "Region"]);

    let body = serde_json::to_value(&declaration).expect("serialize");
    assert_eq!(body["models"]["Product"]["properties"]["price"]["minimum"], "0");
    assert_eq!(body["models"]["Product"]["properties"]["price"]["defaultValue"], 10);
}

#[test]
fn sample_app_category_pulls_in_products() {
    let app = read_sample_app();
    let category = app.find_by_path("categories").expect("categories resource");
    let declaration = render_declaration(
        category,
        &app.registry(),
        "http://localhost:3000/api",
        app.api_version(),
    );
    assert!(declaration.models.contains_key("Product"));
    assert!(declaration.models.contains_key("Image"));
    assert!(declaration.models.contains_key("Region"));
}
