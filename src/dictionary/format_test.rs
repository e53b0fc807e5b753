// Tests for dictionary import/export formats
// Test cases:
// - JSON: object roots parse as given (no trim), other roots and non-string
//   values are malformed
// - CSV: first-comma split, trimming, skipped blank/empty lines, commas kept
//   in values, last-write-wins on repeated keys
// - Extension dispatch is case-insensitive; unknown extensions are rejected
// - Export → import round-trips the identical mapping

use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_json_object_keeps_keys_and_values_as_given() {
    let mapping = parse_json_mapping(r#"{" spaced key ": " spaced value ", "a": "b"}"#).unwrap();
    assert_eq!(mapping.len(), 2);
    // No implicit trim on load; trimming is a lookup-time concern
    assert_eq!(mapping.get(" spaced key "), Some(&" spaced value ".to_string()));
    assert_eq!(mapping.get("a"), Some(&"b".to_string()));
}

#[test]
fn test_parse_json_rejects_non_object_root() {
    assert!(matches!(
        parse_json_mapping(r#"["a", "b"]"#),
        Err(ImportError::Malformed(_))
    ));
    assert!(matches!(
        parse_json_mapping(r#""just a string""#),
        Err(ImportError::Malformed(_))
    ));
}

#[test]
fn test_parse_json_rejects_non_string_values() {
    let result = parse_json_mapping(r#"{"a": 1}"#);
    assert!(matches!(result, Err(ImportError::Malformed(_))));
}

#[test]
fn test_parse_json_rejects_invalid_json() {
    assert!(matches!(
        parse_json_mapping("{not json"),
        Err(ImportError::Malformed(_))
    ));
}

#[test]
fn test_parse_csv_splits_on_first_comma_and_trims() {
    let mapping = parse_csv_mapping("hello, allo\n api ,  interface \n");
    assert_eq!(mapping.get("hello"), Some(&"allo".to_string()));
    assert_eq!(mapping.get("api"), Some(&"interface".to_string()));
}

#[test]
fn test_parse_csv_keeps_commas_in_value() {
    let mapping = parse_csv_mapping("greeting,hello, world");
    assert_eq!(mapping.get("greeting"), Some(&"hello, world".to_string()));
}

#[test]
fn test_parse_csv_skips_blank_and_incomplete_lines() {
    let mapping = parse_csv_mapping("\n  \nno-comma-line\n,missing key\nmissing value,\nok,fine\n");
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.get("ok"), Some(&"fine".to_string()));
}

#[test]
fn test_parse_csv_last_write_wins() {
    let mapping = parse_csv_mapping("key,first\nkey,second");
    assert_eq!(mapping.get("key"), Some(&"second".to_string()));
}

#[test]
fn test_import_named_dispatches_on_extension() {
    let json = import_named("upload.json", r#"{"a": "b"}"#).unwrap();
    assert_eq!(json.get("a"), Some(&"b".to_string()));

    let csv = import_named("upload.csv", "a,b").unwrap();
    assert_eq!(csv.get("a"), Some(&"b".to_string()));

    // Case-insensitive extension
    let upper = import_named("UPLOAD.JSON", r#"{"a": "b"}"#).unwrap();
    assert_eq!(upper.get("a"), Some(&"b".to_string()));
}

#[test]
fn test_import_named_rejects_unknown_extensions() {
    assert!(matches!(
        import_named("dict.txt", "a,b"),
        Err(ImportError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        import_named("no_extension", "a,b"),
        Err(ImportError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_import_file_reports_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");
    assert!(matches!(
        import_file(&missing),
        Err(ImportError::Io(_, _))
    ));
}

#[test]
fn test_export_import_round_trip_is_identical() {
    let entries = vec![
        ("a".to_string(), "b".to_string()),
        ("c,d".to_string(), "e".to_string()),
    ];
    let json = export_json(&entries).unwrap();
    let reimported = parse_json_mapping(&json).unwrap();

    assert_eq!(reimported.len(), 2);
    assert_eq!(reimported.get("a"), Some(&"b".to_string()));
    // A key containing a comma survives the JSON round trip untouched
    assert_eq!(reimported.get("c,d"), Some(&"e".to_string()));
}

#[test]
fn test_export_is_deterministic_and_pretty() {
    let forward = vec![
        ("a".to_string(), "1".to_string()),
        ("b".to_string(), "2".to_string()),
    ];
    let reversed: Vec<(String, String)> = forward.iter().rev().cloned().collect();

    let first = export_json(&forward).unwrap();
    let second = export_json(&reversed).unwrap();
    assert_eq!(first, second);
    // Pretty-printed output spans multiple lines
    assert!(first.contains('\n'));
}

#[test]
fn test_export_to_file_then_import_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("export.json");
    let entries = vec![("hello".to_string(), "allo".to_string())];

    export_to_file(&path, &entries).unwrap();
    let reimported = import_file(&path).unwrap();

    assert_eq!(reimported.len(), 1);
    assert_eq!(reimported.get("hello"), Some(&"allo".to_string()));
}
