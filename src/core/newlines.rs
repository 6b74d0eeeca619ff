// Line terminators

/// Detected line terminator.
///
/// Zero bytes means no terminator was seen before end of stream (single,
/// unterminated line). One byte is `\n` or a lone `\r`; two bytes is `\r\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineEnding {
    bytes: [u8; 2],
    len: u8,
}

impl LineEnding {
    pub const NONE: LineEnding = LineEnding { bytes: [0, 0], len: 0 };
    pub const LF: LineEnding = LineEnding { bytes: [b'\n', 0], len: 1 };
    pub const CR: LineEnding = LineEnding { bytes: [b'\r', 0], len: 1 };
    pub const CRLF: LineEnding = LineEnding { bytes: [b'\r', b'\n'], len: 2 };

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First terminator byte, if any.
    pub fn first(&self) -> Option<u8> {
        (self.len >= 1).then_some(self.bytes[0])
    }

    /// Second terminator byte of a 2-byte ending.
    pub fn second(&self) -> Option<u8> {
        (self.len == 2).then_some(self.bytes[1])
    }

    /// Printable form for logs: `\n`, `\r\n`, `\r` or empty.
    pub fn escaped(&self) -> String {
        self.as_bytes().escape_ascii().to_string()
    }
}

/// True for the two bytes that can start a line terminator.
#[inline]
pub fn is_newline_byte(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}
