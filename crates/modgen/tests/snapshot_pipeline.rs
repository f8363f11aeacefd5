//! Integration tests driving the pipeline from snapshot documents on disk.

use std::fs;
use std::path::PathBuf;

use modgen::{
    BuilderOptions, EmitOptions, Error, ModuleInfoBuilder, Outcome, ScanSnapshot, render_module_info,
};
use tempfile::TempDir;

fn load(temp: &TempDir, json: &str) -> ScanSnapshot {
    let path = temp.path().join("scan.json");
    fs::write(&path, json).unwrap();
    ScanSnapshot::from_path(&path).unwrap()
}

fn options(temp: &TempDir) -> BuilderOptions {
    BuilderOptions {
        output_dir: temp.path().join("out"),
        ..BuilderOptions::default()
    }
}

#[test]
fn converts_directory_of_archives_with_derived_names() {
    let temp = TempDir::new().unwrap();
    let mut snapshot = load(
        &temp,
        r#"{
            "archives": [
                { "path": "/repo/libs/commons-io-2.11.0.jar", "packages": ["org.apache.commons.io"] },
                { "path": "/repo/libs/slf4j-api-1.7.36.jar", "packages": ["org.slf4j"] }
            ],
            "api": {
                "commons.io": [
                    { "origin": "org.apache.commons.io.IOUtils", "targetClass": "org.slf4j.Logger",
                      "target": { "kind": "module", "name": "slf4j.api" } }
                ]
            },
            "full": {
                "commons.io": [
                    { "origin": "org.apache.commons.io.IOUtils", "targetClass": "org.slf4j.Logger",
                      "target": { "kind": "module", "name": "slf4j.api" } }
                ]
            }
        }"#,
    );
    let finder = snapshot.clone();

    let output = ModuleInfoBuilder::new(
        options(&temp),
        &finder,
        &mut snapshot,
        &[PathBuf::from("/repo/libs")],
    )
    .unwrap()
    .run()
    .unwrap();

    assert!(output.success());
    let names: Vec<&str> = output.descriptors().map(|d| d.name()).collect();
    assert_eq!(names, vec!["commons.io", "slf4j.api"]);

    let commons = fs::read_to_string(temp.path().join("out/commons.io/module-info.java")).unwrap();
    assert_eq!(
        commons,
        "module commons.io {\n    requires public slf4j.api;\n    exports org.apache.commons.io;\n}\n"
    );
    let slf4j = fs::read_to_string(temp.path().join("out/slf4j.api/module-info.java")).unwrap();
    assert_eq!(slf4j, "module slf4j.api {\n    exports org.slf4j;\n}\n");
}

#[test]
fn removed_internal_api_blocks_conversion() {
    let temp = TempDir::new().unwrap();
    let mut snapshot = load(
        &temp,
        r#"{
            "archives": [ { "path": "/repo/legacy.jar", "packages": ["legacy"] } ],
            "full": {
                "legacy": [
                    { "origin": "legacy.Codec", "targetClass": "sun.misc.BASE64Encoder",
                      "target": { "kind": "removed_internal" } }
                ]
            }
        }"#,
    );
    let finder = snapshot.clone();

    let output = ModuleInfoBuilder::new(
        BuilderOptions {
            trace_missing: true,
            ..options(&temp)
        },
        &finder,
        &mut snapshot,
        &[PathBuf::from("/repo/legacy.jar")],
    )
    .unwrap()
    .run()
    .unwrap();

    assert!(!output.success());
    let outcome = output.report().get("legacy").unwrap();
    match &outcome.outcome {
        Outcome::Missing { unresolved, trace } => {
            assert_eq!(unresolved, &vec!["JDK internal API (removed)".to_string()]);
            assert_eq!(trace.len(), 1);
            assert!(trace[0].contains("sun.misc.BASE64Encoder"));
        }
        other => panic!("expected missing outcome, got {other:?}"),
    }
    assert!(!temp.path().join("out/legacy").exists());
}

#[test]
fn services_and_providers_render_sorted() {
    let temp = TempDir::new().unwrap();
    let mut snapshot = load(
        &temp,
        r#"{
            "archives": [
                { "path": "/repo/svc.jar", "packages": ["svc"],
                  "provides": { "z.Spi": ["svc.Two", "svc.One"], "a.Spi": ["svc.Only"] } }
            ]
        }"#,
    );
    let finder = snapshot.clone();

    let output = ModuleInfoBuilder::new(
        options(&temp),
        &finder,
        &mut snapshot,
        &[PathBuf::from("/repo/svc.jar")],
    )
    .unwrap()
    .run()
    .unwrap();

    let descriptor = output.descriptors().next().unwrap();
    let text = render_module_info(descriptor, &EmitOptions::default()).unwrap();
    assert_eq!(
        text,
        "module svc {\n    exports svc;\n    provides a.Spi with svc.Only;\n    provides z.Spi with svc.One;\n    provides z.Spi with svc.Two;\n}\n"
    );
}

#[test]
fn explicit_module_in_snapshot_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut snapshot = load(
        &temp,
        r#"{
            "archives": [
                { "path": "/repo/named.jar", "name": "named",
                  "descriptor": { "name": "named", "requires": [], "exports": [], "provides": {} } }
            ]
        }"#,
    );
    let finder = snapshot.clone();

    let err = ModuleInfoBuilder::new(
        options(&temp),
        &finder,
        &mut snapshot,
        &[PathBuf::from("/repo")],
    )
    .err()
    .unwrap();

    assert!(matches!(err, Error::NotAutomaticModule { .. }));
    assert!(err.to_string().contains("named.jar"));
    assert_eq!(snapshot.releases(), 1);
}

#[test]
fn missing_snapshot_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let err = ScanSnapshot::from_path(&temp.path().join("absent.json")).unwrap_err();

    match err {
        Error::Io { path, .. } => assert!(path.ends_with("absent.json")),
        other => panic!("expected I/O error, got {other:?}"),
    }
}
