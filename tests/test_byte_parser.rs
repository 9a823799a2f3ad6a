use std::io::Write;
use tempfile::NamedTempFile;
use tipmap::parser::buffered_byte_source::BufferedByteSource;
use tipmap::parser::byte_parser::{ByteParser, ConsumeMode};
use tipmap::parser::ParsingErrorType;

#[test]
fn test_peek_and_consume() {
    let mut parser = ByteParser::for_str("(A,B);");

    assert_eq!(parser.peek(), Some(b'('));
    assert!(parser.consume_if(b'('));
    assert!(!parser.consume_if(b'('));
    assert_eq!(parser.next_byte(), Some(b'A'));
    assert_eq!(parser.position(), 2);
}

#[test]
fn test_skip_nested_whitespace_and_comments() {
    let mut parser = ByteParser::for_str(" \n[one] \t[two]\r\nA");
    parser.skip_comment_and_whitespace().unwrap();
    assert_eq!(parser.peek(), Some(b'A'));
}

#[test]
fn test_unclosed_comment() {
    let mut parser = ByteParser::for_str("[never closed");
    let err = parser.skip_comment_and_whitespace().unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
}

#[test]
fn test_unquoted_label_stops_at_delimiter() {
    let mut parser = ByteParser::for_str("Kea:1.0");
    let label = parser.parse_label(b":,);").unwrap();
    assert_eq!(label, "Kea");
    assert_eq!(parser.peek(), Some(b':'));
}

#[test]
fn test_quoted_label_keeps_delimiters() {
    let mut parser = ByteParser::for_str("'Kea, (alpine parrot)':1.0");
    let label = parser.parse_label(b":,);").unwrap();
    assert_eq!(label, "Kea, (alpine parrot)");
}

#[test]
fn test_utf8_label() {
    let mut parser = ByteParser::for_str("Kōkako,");
    assert_eq!(parser.parse_label(b",").unwrap(), "Kōkako");
}

#[test]
fn test_consume_until_eof() {
    let mut parser = ByteParser::for_str("abc");
    assert!(!parser.consume_until(b';', ConsumeMode::Exclusive));
    assert!(parser.is_eof());
}

#[test]
fn test_error_context() {
    let mut parser = ByteParser::for_str("(A,B)X:oops;");
    parser.consume_until(b':', ConsumeMode::Inclusive);
    assert_eq!(parser.get_context_as_string(4), "oops");
}

#[test]
fn test_streaming_reader() {
    let source = BufferedByteSource::from_reader("(A,B);".as_bytes());
    let mut parser = ByteParser::new(source);

    assert_eq!(parser.peek(), Some(b'('));
    assert!(!parser.consume_until(b'!', ConsumeMode::Inclusive));
    assert!(parser.is_eof());
    assert!(parser.take_read_error().is_none());
}

#[test]
fn test_buffered_file_source() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "  'Tui' [bird]").unwrap();

    let mut parser = ByteParser::from_file_buffered(file.path()).unwrap();
    assert_eq!(parser.parse_label(b"[").unwrap(), "Tui");
    parser.skip_comment_and_whitespace().unwrap();
    assert!(parser.is_eof());
}
