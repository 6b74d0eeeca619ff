// Buffered byte cursor with pushback.
//
// The sniffer and both tokenizer modes look one byte ahead when matching a
// 2-byte line ending or a closing quote. Unmatched look-ahead bytes are
// pushed back here instead of seeking the underlying stream.

use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

/// Read buffer size for the underlying stream.
pub const CURSOR_BUFFER: usize = 64 * 1024;

/// Owned byte source positioned at an offset. Its position is the single
/// source of truth for where the next record starts.
pub struct ByteCursor<R> {
    inner: BufReader<R>,
    /// LIFO stack of un-read bytes
    pushback: Vec<u8>,
    /// Absolute offset of the next byte `inner` will hand out
    offset: u64,
    at_eof: bool,
}

impl<R: Read + Seek> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        ByteCursor {
            inner: BufReader::with_capacity(CURSOR_BUFFER, inner),
            pushback: Vec::with_capacity(2),
            offset: 0,
            at_eof: false,
        }
    }

    /// Next byte, or `None` at end of stream.
    #[inline]
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushback.pop() {
            return Ok(Some(byte));
        }
        let buf = self.inner.fill_buf()?;
        match buf.first() {
            Some(&byte) => {
                self.inner.consume(1);
                self.offset += 1;
                Ok(Some(byte))
            }
            None => {
                self.at_eof = true;
                Ok(None)
            }
        }
    }

    /// Push a byte back; it is returned by the next `next_byte` call.
    #[inline]
    pub fn unread(&mut self, byte: u8) {
        self.pushback.push(byte);
    }

    /// Read up to `buf.len()` bytes, returning how many were filled.
    pub fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.next_byte()? {
                Some(byte) => {
                    buf[filled] = byte;
                    filled += 1;
                }
                None => break,
            }
        }
        Ok(filled)
    }

    /// Reposition to an absolute offset, dropping pushback and EOF state.
    pub fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.pushback.clear();
        self.offset = offset;
        self.at_eof = false;
        Ok(())
    }

    /// Logical position of the next byte to be returned.
    pub fn position(&self) -> u64 {
        self.offset - self.pushback.len() as u64
    }

    /// True once a read has hit end of stream and nothing is pushed back.
    pub fn is_eof(&self) -> bool {
        self.at_eof && self.pushback.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_and_unread() {
        let mut cursor = ByteCursor::new(Cursor::new(b"ab".to_vec()));
        assert_eq!(cursor.next_byte().unwrap(), Some(b'a'));
        cursor.unread(b'a');
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next_byte().unwrap(), Some(b'a'));
        assert_eq!(cursor.next_byte().unwrap(), Some(b'b'));
        assert_eq!(cursor.next_byte().unwrap(), None);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_two_byte_pushback_is_lifo() {
        let mut cursor = ByteCursor::new(Cursor::new(b"\rx".to_vec()));
        let first = cursor.next_byte().unwrap().unwrap();
        let second = cursor.next_byte().unwrap().unwrap();
        cursor.unread(second);
        cursor.unread(first);
        assert_eq!(cursor.next_byte().unwrap(), Some(b'\r'));
        assert_eq!(cursor.next_byte().unwrap(), Some(b'x'));
    }

    #[test]
    fn test_seek_clears_state() {
        let mut cursor = ByteCursor::new(Cursor::new(b"\xEF\xBB\xBFa".to_vec()));
        let mut head = [0u8; 4];
        assert_eq!(cursor.read_up_to(&mut head).unwrap(), 4);
        assert_eq!(cursor.next_byte().unwrap(), None);
        cursor.unread(b'q');
        cursor.seek_to(3).unwrap();
        assert!(!cursor.is_eof());
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.next_byte().unwrap(), Some(b'a'));
    }
}
