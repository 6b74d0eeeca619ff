// RustyTable - Delimited and fixed-width text table reader
//
// Strategies:
// A: Delimited records with quoting (strategy::delimited)
// B: Fixed-width character columns driven by a format plan (strategy::fixed_width)
//
// Detection runs once per load (core::sniff): BOM, line ending, separator and
// field count. The streaming reader (reader.rs) drives the tokenizer and
// applies header, empty-line, offset and limit policies.

pub mod core;
pub mod dataset;
pub mod error;
pub mod options;
pub mod parallel;
pub mod reader;
pub mod strategy;

pub use crate::core::{
    detect_separator, ContentClass, ContentClassifier, DetectedFormat, LineEnding,
    SignatureClassifier, TextKind,
};
pub use dataset::{ColumnKey, Dataset};
pub use error::{ReaderError, Result};
pub use options::ReaderOptions;
pub use parallel::{read_files_parallel, read_fixed_width_parallel};
pub use reader::{ReaderState, Rows, TableReader};
pub use strategy::FormatPlan;

// ============================================================================
// Global allocator
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
