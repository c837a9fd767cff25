use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/stickers.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the sticker catalog before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    let labels = catalog.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Root must be a JSON array of sticker labels\n\
             Got: {catalog}\n"
        );
    });

    assert!(
        !labels.is_empty(),
        "\n\nCATALOG BUILD ERROR: Catalog is empty\n\
         The embedded catalog must contain at least one sticker label.\n"
    );

    for (i, label) in labels.iter().enumerate() {
        let text = label.as_str().unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: Entry {i} is not a string\nGot: {label}\n");
        });
        assert!(
            !text.trim().is_empty(),
            "\n\nCATALOG BUILD ERROR: Entry {i} is blank\n"
        );
    }

    println!(
        "cargo:warning=Validated catalog: {} sticker labels",
        labels.len()
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/stickers.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
