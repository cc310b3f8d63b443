//! Character stream over a byte reader
//!
//! Decodes UTF-8 one character at a time so the scanner can consume a reader
//! in a single forward pass without buffering the whole input.

use std::io::{self, BufRead};

/// Iterator of characters decoded from a buffered reader
pub struct ReaderChars<R> {
    reader: R,
}

impl<R: BufRead> ReaderChars<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => buf[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.reader.consume(1);
            return Ok(Some(byte));
        }
    }

    fn read_char(&mut self, first: u8) -> io::Result<char> {
        let width = utf8_width(first).ok_or_else(|| invalid_utf8(first))?;
        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .read_byte()?
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "truncated UTF-8 sequence"))?;
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| invalid_utf8(first))
    }
}

impl<R: BufRead> Iterator for ReaderChars<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_byte() {
            Ok(Some(first)) => Some(self.read_char(first)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Length of the UTF-8 sequence introduced by `first`, or None for a continuation byte
fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(first: u8) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 sequence starting with byte 0x{:02X}", first),
    )
}
