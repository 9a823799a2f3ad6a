//! The [ByteSource] trait, implemented by
//! [InMemoryByteSource](crate::parser::in_memory_byte_source::InMemoryByteSource) and
//! [BufferedByteSource](crate::parser::buffered_byte_source::BufferedByteSource).

use std::io;

/// Forward-only access to input bytes for a
/// [ByteParser](crate::parser::ByteParser).
///
/// Peeking takes `&mut self` because streaming sources may have to read
/// more input to answer it.
pub trait ByteSource {
    /// Returns the current byte without consuming it, or `None` at EOF.
    fn peek(&mut self) -> Option<u8>;

    /// Consumes and returns the current byte, or `None` at EOF.
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns up to `k` upcoming bytes without consuming them.
    /// Shorter only if EOF comes first.
    fn peek_slice(&mut self, k: usize) -> &[u8];

    /// Returns up to `k` upcoming bytes as owned context for error messages.
    fn get_context(&mut self, k: usize) -> Vec<u8> {
        self.peek_slice(k).to_vec()
    }

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;

    fn is_eof(&mut self) -> bool;

    /// Takes the read error that ended the input early, if any.
    ///
    /// Sources report a failed read as EOF; callers that reach EOF must
    /// check here to tell a truncated input from a complete one.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}
