//! Bundle I/O around a compile run, the way the CLI drives it.

mod common;

use common::{init_logging, versioned_documents};
use docxref::{bundle, compiler::XrefCompiler, config::ResolverConfig, XrefError};
use tempfile::TempDir;

#[test]
fn test_yaml_and_json_bundles_roundtrip() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let docs = versioned_documents();
    for name in ["bundle.yml", "bundle.yaml", "bundle.json"] {
        let path = temp_dir.path().join(name);
        bundle::save(&path, &docs).unwrap();
        assert_eq!(bundle::load(&path).unwrap(), docs, "{name}");
    }
}

#[test]
fn test_json_bundle_field_names() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bundle.json");
    bundle::save(&path, &versioned_documents()).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entity = &raw[0]["entities"][0];
    assert_eq!(entity["nameWithType"], "Foo");
    assert_eq!(entity["isOwner"], true);
    assert!(entity.get("summary").is_none());
}

#[test]
fn test_unsupported_extension_is_rejected() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bundle.txt");
    assert!(matches!(
        bundle::save(&path, &versioned_documents()),
        Err(XrefError::Serialization(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_resolve_bundle_with_config_file() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.yml");
    let output = temp_dir.path().join("out.json");
    let config_path = temp_dir.path().join("docxref.toml");
    std::fs::write(
        &config_path,
        "unresolved_attribute = \"data-optional\"\nexpand_generics = false\n",
    )
    .unwrap();
    bundle::save(&input, &versioned_documents()).unwrap();

    let config = ResolverConfig::load(&config_path).unwrap();
    let result = XrefCompiler::new(config)
        .unwrap()
        .compile(bundle::load(&input).unwrap())
        .unwrap();
    bundle::save(&output, &result.documents).unwrap();

    let written = bundle::load(&output).unwrap();
    let summary = written[1].entities[0].summary.clone().unwrap();
    assert!(summary.contains(r#"<link uid="" data-optional="false">nothing</link>"#));
    assert!(!summary.contains("data-throw-if-not-resolved"));
}
