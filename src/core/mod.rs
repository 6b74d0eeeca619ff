// Core primitives for format detection and tokenization

pub mod bom;
pub mod classify;
pub mod cursor;
pub mod encoding;
pub mod field;
pub mod newlines;
pub mod scanner;
pub mod sniff;

pub use bom::{match_bom, Bom, BOM_TABLE};
pub use classify::{ContentClass, ContentClassifier, SignatureClassifier, TextKind};
pub use cursor::ByteCursor;
pub use encoding::normalize_utf8;
pub use field::{finish_field, strip_record_tags, strip_tags};
pub use newlines::LineEnding;
pub use scanner::{detect_separator, is_separator, DEFAULT_SEPARATOR};
pub use sniff::{detect, DetectedFormat, SniffConfig};
