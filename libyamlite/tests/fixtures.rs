//! Test harness for the yamlite parser against fixture files.
//!
//! This test harness reads all .yamlite files from the test/ok/ directory,
//! parses them, and compares the JSON encoding against the expected output
//! in test/json/. It also reads .yamlite files from test/bad/ (expected to
//! fail) and verifies they produce the error message in the corresponding
//! .error file.

use std::fs;
use std::path::{Path, PathBuf};

use libyamlite::{encode, parse, parse_with_filename, Format, Value};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// Get all .yamlite files from a subdirectory of test/, sorted.
fn get_files_in_subdir(subdir: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join("*.yamlite");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .flatten()
        .collect();
    files.sort();
    files
}

/// Read a sibling fixture file with the same stem and another extension.
fn read_expected(path: &Path, subdir: &str, ext: &str) -> String {
    let stem = path.file_stem().unwrap().to_string_lossy();
    let expected = test_root().join(subdir).join(format!("{}.{}", stem, ext));
    fs::read_to_string(&expected)
        .unwrap_or_else(|e| panic!("missing {}: {}", expected.display(), e))
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

#[test]
fn test_ok_fixtures() {
    let files = get_files_in_subdir("ok");
    assert!(!files.is_empty(), "no fixtures found in test/ok");

    let mut failures = Vec::new();
    for path in &files {
        let input = fs::read_to_string(path).unwrap();
        let expected = read_expected(path, "json", "json");

        let doc = match parse(&input) {
            Ok(doc) => doc,
            Err(e) => {
                failures.push(format!("{}: unexpected error: {}", file_name(path), e));
                continue;
            }
        };
        let actual = encode(&Value::Mapping(doc), Format::Json).unwrap();
        if actual.trim_end() != expected.trim_end() {
            failures.push(format!(
                "{}:\n--- expected\n{}\n--- actual\n{}",
                file_name(path),
                expected.trim_end(),
                actual
            ));
        }
    }

    assert!(failures.is_empty(), "\n{}", failures.join("\n\n"));
}

#[test]
fn test_bad_fixtures() {
    let files = get_files_in_subdir("bad");
    assert!(!files.is_empty(), "no fixtures found in test/bad");

    let mut failures = Vec::new();
    for path in &files {
        let input = fs::read_to_string(path).unwrap();
        let expected = read_expected(path, "bad", "error");
        let name = file_name(path);

        match parse_with_filename(&input, Some(&name)) {
            Ok(doc) => failures.push(format!("{}: expected error, got {:?}", name, doc)),
            Err(e) => {
                let actual = e.to_string();
                if actual != expected.trim_end_matches('\n') {
                    failures.push(format!(
                        "{}:\n  expected: {}\n  actual:   {}",
                        name,
                        expected.trim_end_matches('\n'),
                        actual
                    ));
                }
            }
        }
    }

    assert!(failures.is_empty(), "\n{}", failures.join("\n"));
}

/// Every ok fixture written back as yamlite must reparse to the same tree.
#[test]
fn test_ok_fixtures_roundtrip() {
    for path in get_files_in_subdir("ok") {
        let input = fs::read_to_string(&path).unwrap();
        let doc = parse(&input).unwrap();
        let text = encode(&Value::Mapping(doc.clone()), Format::Yamlite).unwrap();
        let reparsed = parse(&text)
            .unwrap_or_else(|e| panic!("{}: reparse failed: {}\n{}", file_name(&path), e, text));
        assert_eq!(reparsed, doc, "{}", file_name(&path));
    }
}
