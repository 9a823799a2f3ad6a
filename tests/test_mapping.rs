use pretty_assertions::assert_eq;
use std::path::Path;
use tipmap::read_mapping_file;
use tipmap::rename::{MappingTable, RenameError};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

#[test]
fn test_read_mapping_file() {
    let table = read_mapping_file(fixture("rails.map")).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.get("Takahe"), Some("Porphyrio hochstetteri"));
    assert_eq!(table.get("Moho"), Some("Porphyrio mantelli"));
    assert_eq!(table.get("Pukeko"), None);
}

#[test]
fn test_order_of_first_appearance() {
    let table = MappingTable::parse("Weka\tW\nTakahe\tT\nMoho\tM\n".as_bytes()).unwrap();
    let keys: Vec<_> = table.iter().map(|(old, _)| old).collect();
    assert_eq!(keys, vec!["Weka", "Takahe", "Moho"]);
}

#[test]
fn test_later_duplicate_key_wins() {
    let table = MappingTable::parse("A\tfirst\nB\tB1\nA\tsecond\n".as_bytes()).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("A"), Some("second"));
    // Overwritten key keeps its original slot
    let pairs: Vec<_> = table.iter().collect();
    assert_eq!(pairs, vec![("A", "second"), ("B", "B1")]);
}

#[test]
fn test_empty_input_is_empty_table() {
    let table = MappingTable::parse("".as_bytes()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_malformed_line_reports_line_number() {
    let err = read_mapping_file(fixture("malformed.map")).unwrap_err();
    assert!(matches!(err, RenameError::Format { line: 2 }));
    assert_eq!(err.to_string(), "map file does not have 2 fields at line: 2");
}

#[test]
fn test_too_many_fields() {
    let err = MappingTable::parse("A\tB\tC\n".as_bytes()).unwrap_err();
    assert!(matches!(err, RenameError::Format { line: 1 }));
}

#[test]
fn test_blank_line_is_malformed() {
    let err = MappingTable::parse("A\tA1\n\nB\tB1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, RenameError::Format { line: 2 }));
}

#[test]
fn test_spaces_are_not_separators() {
    let table = MappingTable::parse("Spotless Crake\tZapornia tabuensis\n".as_bytes()).unwrap();
    assert_eq!(table.get("Spotless Crake"), Some("Zapornia tabuensis"));

    let err = MappingTable::parse("Spotless Crake Zapornia\n".as_bytes()).unwrap_err();
    assert!(matches!(err, RenameError::Format { line: 1 }));
}

#[test]
fn test_missing_file() {
    let path = fixture("missing.map");
    let err = read_mapping_file(&path).unwrap_err();

    match err {
        RenameError::Io { target, source } => {
            assert_eq!(target, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected Io error, got {:?}", other),
    }
}
