//! Streaming implementation of byte source for parsing.
//!
//! This module provides [BufferedByteSource], which pulls bytes from any
//! [Read] (a file, standard input) on demand. Use this for large inputs
//! where loading everything into memory would be impractical.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::parser::byte_source::ByteSource;

// =#========================================================================#=
// BUFFERED BYTE SOURCE
// =#========================================================================#=
/// A streaming byte source over a reader.
///
/// Bytes move from the [BufReader] into a lookahead queue only when they are
/// peeked, so memory stays bounded by the reader's buffer plus the largest
/// [peek_slice](ByteSource::peek_slice) requested. A read error other than
/// [io::ErrorKind::Interrupted] ends the stream and is kept for
/// [take_error](ByteSource::take_error).
pub struct BufferedByteSource<R: Read = File> {
    reader: BufReader<R>,
    /// Bytes read from the reader but not consumed yet
    lookahead: VecDeque<u8>,
    /// Absolute position of the first lookahead byte
    pos: usize,
    exhausted: bool,
    error: Option<io::Error>,
}

impl BufferedByteSource<File> {
    /// Opens the file at `path` for streaming.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::from_reader(File::open(path)?))
    }
}

impl<R: Read> BufferedByteSource<R> {
    /// Wraps `reader`, e.g. a locked standard input.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            lookahead: VecDeque::new(),
            pos: 0,
            exhausted: false,
            error: None,
        }
    }

    /// Pulls from the reader until at least `k` bytes are queued or the
    /// stream is exhausted.
    fn fill(&mut self, k: usize) {
        while self.lookahead.len() < k && !self.exhausted {
            match self.reader.fill_buf() {
                Ok([]) => self.exhausted = true,
                Ok(buf) => {
                    let n = buf.len();
                    self.lookahead.extend(buf);
                    self.reader.consume(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.exhausted = true;
                    self.error = Some(e);
                }
            }
        }
    }
}

impl<R: Read> ByteSource for BufferedByteSource<R> {
    fn peek(&mut self) -> Option<u8> {
        self.fill(1);
        self.lookahead.front().copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        self.fill(1);
        let byte = self.lookahead.pop_front()?;
        self.pos += 1;
        Some(byte)
    }

    fn peek_slice(&mut self, k: usize) -> &[u8] {
        self.fill(k);
        let queued = self.lookahead.make_contiguous();
        let end = k.min(queued.len());
        &queued[..end]
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.peek().is_none()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::NewickParser;
    use crate::parser::ParsingErrorType;
    use crate::parser::byte_parser::ByteParser;

    /// Yields `data`, then fails every read.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("device went away"));
            }
            Read::read(&mut self.data, buf)
        }
    }

    fn failing_parser(data: &'static [u8]) -> ByteParser<BufferedByteSource<FailingReader>> {
        ByteParser::new(BufferedByteSource::from_reader(FailingReader { data }))
    }

    #[test]
    fn test_peek_slice_across_chunks() {
        let data = b"(Tui,Kereru);".repeat(1000);
        let mut source = BufferedByteSource::from_reader(&data[..]);

        for _ in 0..9000 {
            source.next_byte();
        }
        assert_eq!(source.position(), 9000);
        assert_eq!(source.peek_slice(13).len(), 13);
        assert_eq!(source.peek_slice(50_000).len(), data.len() - 9000);
        assert_eq!(source.peek(), Some(data[9000]));
    }

    #[test]
    fn test_buffered_parse_newick_file() {
        let source = BufferedByteSource::from_file("tests/fixtures/three_trees.nwk").unwrap();
        let byte_parser = ByteParser::new(source);
        let mut newick_parser = NewickParser::new();

        let trees = newick_parser.parse_all(byte_parser).unwrap();
        assert_eq!(trees.len(), 3);
        assert!(trees.iter().all(|t| t.is_reconciled()));
    }

    #[test]
    fn test_read_error_after_complete_tree() {
        let err = NewickParser::new()
            .parse_all(failing_parser(b"(A,B);\n"))
            .unwrap_err();

        assert_eq!(err.kind(), &ParsingErrorType::IoError("device went away".to_string()));
        assert_eq!(err.position(), 7);
        assert_eq!(err.into_io_error().unwrap().to_string(), "device went away");
    }

    #[test]
    fn test_read_error_inside_tree() {
        let err = NewickParser::new()
            .parse_all(failing_parser(b"(A,"))
            .unwrap_err();

        assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
        assert_eq!(err.position(), 3);
    }

    #[test]
    fn test_read_error_ends_lazy_parsing() {
        let mut iter = NewickParser::new().into_iter(failing_parser(b"(A,B);(C,D);"));

        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_ok());
        let err = iter.next().unwrap().unwrap_err();
        assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_read_error_is_taken_once() {
        let mut source = BufferedByteSource::from_reader(FailingReader { data: b"" });

        assert!(source.is_eof());
        assert!(source.take_error().is_some());
        assert!(source.take_error().is_none());
    }
}
