// Error types for table loading and reading

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Errors raised by the load family and by reads on a loaded source.
///
/// Invalid UTF-8, short/long rows and skipped empty lines are repaired
/// locally and never show up here.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The path could not be classified or opened
    #[error("{op} => error reading the file ('{}'): {source}", path.display())]
    SourceUnreadable {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Content classification found no text signature
    #[error("{op} => invalid file-content ('{}')", path.display())]
    UnrecognizedContent { op: &'static str, path: PathBuf },

    /// The format-plan source is empty or holds a non-integer width
    #[error("{op} => {detail} in format-file ('{}')", path.display())]
    FormatParse {
        op: &'static str,
        path: PathBuf,
        detail: String,
        /// Raw offending value, if a value was at fault
        value: Option<String>,
    },

    /// Temporary storage for string content could not be created or written
    #[error("{op} => {reason}: {source}")]
    Staging {
        op: &'static str,
        reason: &'static str,
        #[source]
        source: io::Error,
    },

    /// I/O failure while reading an already loaded source
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ReaderError {
    pub(crate) fn unreadable(op: &'static str, path: &Path, source: io::Error) -> Self {
        ReaderError::SourceUnreadable {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn unrecognized(op: &'static str, path: &Path) -> Self {
        ReaderError::UnrecognizedContent {
            op,
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn empty_format(op: &'static str, path: &Path) -> Self {
        ReaderError::FormatParse {
            op,
            path: path.to_path_buf(),
            detail: "error parsing the format-file".to_string(),
            value: None,
        }
    }

    pub(crate) fn bad_width(op: &'static str, path: &Path, value: &str) -> Self {
        ReaderError::FormatParse {
            op,
            path: path.to_path_buf(),
            detail: format!("error parsing a value ({value}) to integer"),
            value: Some(value.to_string()),
        }
    }

    pub(crate) fn staging(op: &'static str, reason: &'static str, source: io::Error) -> Self {
        ReaderError::Staging { op, reason, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_operation_and_path() {
        let err = ReaderError::unrecognized("load_file", Path::new("no_file.csv"));
        assert_eq!(
            err.to_string(),
            "load_file => invalid file-content ('no_file.csv')"
        );

        let err = ReaderError::bad_width("load_format_file", Path::new("fmt.txt"), "abc");
        assert_eq!(
            err.to_string(),
            "load_format_file => error parsing a value (abc) to integer in format-file ('fmt.txt')"
        );
        match err {
            ReaderError::FormatParse { value, .. } => assert_eq!(value.as_deref(), Some("abc")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_converts() {
        let err: ReaderError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, ReaderError::Io(_)));
    }
}
