// Content classification for path-based sources.
//
// Decides whether a file holds text at all and whether it starts with a BOM
// before the sniffer opens it. The reader trusts `with_bom` literally and only
// uses the BOM table to find the exact signature length.

use crate::error::{ReaderError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes sampled from the head of the file.
pub const SAMPLE_SIZE: usize = 8 * 1024;

/// Coarse text type reported by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Ascii,
    Utf8,
    Utf16,
    Utf32,
    Iso8859,
}

/// Classification result for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentClass {
    pub kind: TextKind,
    pub encoding_label: &'static str,
    pub with_bom: bool,
}

/// Classifies a path before it is opened for reading.
pub trait ContentClassifier: Send + Sync {
    fn classify(&self, path: &Path) -> Result<ContentClass>;
}

/// Default in-process classifier working on a byte sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureClassifier;

impl ContentClassifier for SignatureClassifier {
    fn classify(&self, path: &Path) -> Result<ContentClass> {
        const OP: &str = "classify";

        let file = File::open(path).map_err(|e| ReaderError::unreadable(OP, path, e))?;
        let mut sample = Vec::with_capacity(SAMPLE_SIZE);
        file.take(SAMPLE_SIZE as u64)
            .read_to_end(&mut sample)
            .map_err(|e| ReaderError::unreadable(OP, path, e))?;

        classify_sample(&sample).ok_or_else(|| ReaderError::unrecognized(OP, path))
    }
}

/// Classify a head-of-file sample. `None` means no text signature matched.
pub fn classify_sample(sample: &[u8]) -> Option<ContentClass> {
    if sample.is_empty() {
        return None;
    }

    // UTF-32 first: its LE signature extends UTF-16 LE
    let with_bom = |kind, encoding_label| {
        Some(ContentClass {
            kind,
            encoding_label,
            with_bom: true,
        })
    };
    if sample.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return with_bom(TextKind::Utf8, "UTF-8");
    }
    if sample.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
        return with_bom(TextKind::Utf32, "UTF-32LE");
    }
    if sample.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        return with_bom(TextKind::Utf32, "UTF-32BE");
    }
    if sample.starts_with(&[0xFF, 0xFE]) {
        return with_bom(TextKind::Utf16, "UTF-16LE");
    }
    if sample.starts_with(&[0xFE, 0xFF]) {
        return with_bom(TextKind::Utf16, "UTF-16BE");
    }

    if sample.contains(&0) {
        return None;
    }

    let without_bom = |kind, encoding_label| {
        Some(ContentClass {
            kind,
            encoding_label,
            with_bom: false,
        })
    };
    if sample.is_ascii() {
        return without_bom(TextKind::Ascii, "us-ascii");
    }
    match std::str::from_utf8(sample) {
        Ok(_) => return without_bom(TextKind::Utf8, "utf-8"),
        // Sample cut in the middle of a multi-byte sequence
        Err(e) if e.error_len().is_none() => return without_bom(TextKind::Utf8, "utf-8"),
        Err(_) => {}
    }
    if sample.iter().all(|&b| !is_binary_control(b)) {
        return without_bom(TextKind::Iso8859, "iso-8859-1");
    }
    None
}

/// C0 controls that never appear in 8-bit text files.
#[inline]
fn is_binary_control(byte: u8) -> bool {
    byte < 0x20 && !matches!(byte, b'\t' | b'\n' | b'\r' | 0x0C | 0x1B)
}
