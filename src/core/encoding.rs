// Encoding Normalizer
//
// Fields and fixed-width lines are produced as UTF-8 text. Byte runs that are
// not valid UTF-8 are reinterpreted as a single legacy 8-bit encoding and
// converted. This is a best-effort repair, not general transcoding: any byte
// sequence decodes, but only Windows-1252 / ISO-8859-1 input decodes correctly.

use encoding_rs::{Encoding, WINDOWS_1252};

/// The one legacy encoding tried for invalid UTF-8.
#[inline]
pub fn fallback_encoding() -> &'static Encoding {
    WINDOWS_1252
}

/// How a byte run was turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Utf8,
    Fallback,
}

/// Convert an owned byte run into UTF-8 text.
///
/// Fast path: valid UTF-8 is moved into the `String` without copying.
pub fn normalize_utf8(bytes: Vec<u8>) -> (String, Decoded) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, Decoded::Utf8),
        Err(err) => {
            let bytes = err.into_bytes();
            let (text, _) = fallback_encoding().decode_without_bom_handling(&bytes);
            log::trace!(
                "reinterpreted {} bytes as {}",
                bytes.len(),
                fallback_encoding().name()
            );
            (text.into_owned(), Decoded::Fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        let (text, how) = normalize_utf8("Bültenweg".as_bytes().to_vec());
        assert_eq!(text, "Bültenweg");
        assert_eq!(how, Decoded::Utf8);
    }

    #[test]
    fn test_latin1_fallback() {
        // "Bültenweg" with ü as the single Latin-1 byte 0xFC
        let (text, how) = normalize_utf8(b"B\xFCltenweg".to_vec());
        assert_eq!(text, "Bültenweg");
        assert_eq!(how, Decoded::Fallback);
    }

    #[test]
    fn test_windows_1252_specials() {
        let (text, _) = normalize_utf8(b"\x80 5".to_vec());
        assert_eq!(text, "€ 5");
    }

    #[test]
    fn test_empty_input() {
        let (text, how) = normalize_utf8(Vec::new());
        assert_eq!(text, "");
        assert_eq!(how, Decoded::Utf8);
    }
}
