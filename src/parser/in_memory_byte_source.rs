//! Byte source over data held fully in memory.

use crate::parser::byte_source::ByteSource;

/// Owns all input bytes and a cursor into them.
///
/// Used for Newick strings given directly.
pub struct InMemoryByteSource {
    data: Vec<u8>,
    cursor: usize,
}

impl InMemoryByteSource {
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }

    fn remaining(&self) -> &[u8] {
        self.data.get(self.cursor..).unwrap_or_default()
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&mut self) -> Option<u8> {
        self.remaining().first().copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek();
        if byte.is_some() {
            self.cursor += 1;
        }
        byte
    }

    fn peek_slice(&mut self, k: usize) -> &[u8] {
        let rest = self.remaining();
        &rest[..k.min(rest.len())]
    }

    #[inline]
    fn position(&self) -> usize {
        self.cursor
    }

    fn is_eof(&mut self) -> bool {
        self.remaining().is_empty()
    }
}
