// Streaming Record Reader
//
// Owns one open source at a time and drives the tokenizer over it.
// State: Unopened -> Ready (after a load) -> Exhausted (end of stream).
// The byte cursor is the only position state; rewind() seeks it back to just
// past the BOM and re-arms header handling.

use crate::core::{
    detect, detect_separator as vote_separator, ByteCursor, ContentClassifier, DetectedFormat,
    LineEnding, SignatureClassifier, SniffConfig,
};
use crate::dataset::{fit_row, Dataset};
use crate::error::{ReaderError, Result};
use crate::options::ReaderOptions;
use crate::strategy::{load_plan, FormatPlan, Tokenizer};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Prefix of staged temporary files
const STAGING_PREFIX: &str = "csv";

/// Lifecycle of a reader's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Unopened,
    Ready,
    Exhausted,
}

/// Reader for delimited and fixed-width text tables.
pub struct TableReader {
    options: ReaderOptions,
    classifier: Box<dyn ContentClassifier>,
    source: Option<ByteCursor<File>>,
    filename: Option<PathBuf>,
    /// Backing file of `load_string` content, deleted on drop
    staged: Option<NamedTempFile>,
    format: DetectedFormat,
    plan: Vec<usize>,
    names_from_plan: bool,
    field_count: usize,
    header_done: bool,
    line: usize,
    state: ReaderState,
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReader {
    pub fn new() -> Self {
        Self::with_options(ReaderOptions::default())
    }

    pub fn with_options(options: ReaderOptions) -> Self {
        TableReader {
            options,
            classifier: Box::new(SignatureClassifier),
            source: None,
            filename: None,
            staged: None,
            format: DetectedFormat::default(),
            plan: Vec::new(),
            names_from_plan: false,
            field_count: 0,
            header_done: false,
            line: 0,
            state: ReaderState::Unopened,
        }
    }

    /// Replace the content classifier consulted by `load_file`.
    pub fn with_classifier<C: ContentClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn set_first_line_is_header(&mut self, yes: bool) -> &mut Self {
        self.options.first_line_is_header = yes;
        self
    }

    pub fn set_header_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.header_names = names.into_iter().map(Into::into).collect();
        self.names_from_plan = false;
        self
    }

    pub fn set_ignore_empty_lines(&mut self, yes: bool) -> &mut Self {
        self.options.ignore_empty_lines = yes;
        self
    }

    pub fn set_strip_tags(&mut self, yes: bool) -> &mut Self {
        self.options.strip_tags = yes;
        self
    }

    /// Override the sniffed separator. `None` restores the detected one.
    pub fn set_separator(&mut self, separator: Option<u8>) -> &mut Self {
        self.options.separator = separator;
        self
    }

    // ------------------------------------------------------------------
    // Load family
    // ------------------------------------------------------------------

    /// Classify, open and sniff a data file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.open("load_file", path.as_ref())
    }

    /// Stage in-memory content through a temporary file and load it.
    pub fn load_string<C: AsRef<[u8]>>(&mut self, content: C) -> Result<()> {
        const OP: &str = "load_string";

        let staged = stage(OP, content.as_ref())?;
        self.open(OP, staged.path())?;
        self.staged = Some(staged);
        Ok(())
    }

    /// Load a fixed-width plan from a format file.
    ///
    /// Replaces any previous plan. With `detect_header_names` set, names from a
    /// `fieldname` column become the reader's header names.
    pub fn load_format_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        detect_header_names: bool,
    ) -> Result<()> {
        const OP: &str = "load_format_file";

        let path = path.as_ref();
        let plan = File::open(path)
            .map_err(|e| ReaderError::unreadable(OP, path, e))
            .and_then(|file| load_plan(&mut ByteCursor::new(file), path, detect_header_names));

        match plan {
            Ok(plan) => {
                self.apply_plan(plan);
                Ok(())
            }
            Err(err) => {
                self.close();
                Err(err)
            }
        }
    }

    /// Load a fixed-width plan from in-memory content.
    pub fn load_format_string<C: AsRef<[u8]>>(
        &mut self,
        content: C,
        detect_header_names: bool,
    ) -> Result<()> {
        let staged = stage("load_format_string", content.as_ref())?;
        self.load_format_file(staged.path(), detect_header_names)
    }

    fn open(&mut self, op: &'static str, path: &Path) -> Result<()> {
        self.close();

        let class = self.classifier.classify(path)?;
        let file = File::open(path).map_err(|e| ReaderError::unreadable(op, path, e))?;
        let mut cursor = ByteCursor::new(file);
        let config = SniffConfig {
            with_bom: class.with_bom,
            separator: self.options.separator,
        };
        let format = detect(&mut cursor, config).map_err(|e| ReaderError::unreadable(op, path, e))?;

        log::debug!(
            "{op}: {} ({}, bom={:?})",
            path.display(),
            class.encoding_label,
            format.bom_encoding()
        );

        self.field_count = if self.plan.is_empty() {
            format.field_count
        } else {
            self.plan.len()
        };
        self.format = format;
        self.source = Some(cursor);
        self.filename = Some(path.to_path_buf());
        self.state = ReaderState::Ready;
        Ok(())
    }

    fn apply_plan(&mut self, plan: FormatPlan) {
        self.field_count = plan.field_count();
        self.plan = plan.widths;
        match plan.header_names {
            Some(names) => {
                self.options.header_names = names;
                self.names_from_plan = true;
            }
            None if self.names_from_plan => {
                self.options.header_names.clear();
                self.names_from_plan = false;
            }
            None => {}
        }
    }

    /// Drop the source and any staged file; back to `Unopened`.
    fn close(&mut self) {
        self.source = None;
        self.staged = None;
        self.filename = None;
        self.format = DetectedFormat::default();
        self.field_count = self.plan.len();
        self.header_done = false;
        self.line = 0;
        self.state = ReaderState::Unopened;
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    /// Seek back to just past the BOM and re-arm header handling.
    pub fn rewind(&mut self) -> Result<()> {
        let Some(cursor) = self.source.as_mut() else {
            return Ok(());
        };
        cursor.seek_to(self.format.bom_length() as u64)?;
        self.header_done = false;
        self.line = 0;
        self.state = ReaderState::Ready;
        Ok(())
    }

    /// Rewind, then feed every record in the `offset`/`limit` window to `callback`.
    ///
    /// Returns the number of rows delivered. Records before `offset` still
    /// advance the line counter.
    pub fn for_each_record<F>(
        &mut self,
        mut callback: F,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<usize>
    where
        F: FnMut(Dataset),
    {
        if !self.is_loaded() {
            return Ok(0);
        }
        self.rewind()?;

        let mut delivered = 0;
        while limit.map_or(true, |max| delivered < max) {
            let Some(dataset) = self.next_row()? else {
                break;
            };
            if dataset.line <= offset {
                continue;
            }
            callback(dataset);
            delivered += 1;
        }

        log::debug!("delivered {delivered} rows (limit={limit:?}, offset={offset})");
        Ok(delivered)
    }

    /// Collect the `offset`/`limit` window into a vector.
    pub fn read_datasets(&mut self, limit: Option<usize>, offset: usize) -> Result<Vec<Dataset>> {
        let mut datasets = Vec::new();
        self.for_each_record(|dataset| datasets.push(dataset), limit, offset)?;
        Ok(datasets)
    }

    /// Next row from the current position, or `None` once exhausted.
    pub fn next_row(&mut self) -> Result<Option<Dataset>> {
        let Some(row) = self.next_record()? else {
            return Ok(None);
        };
        let row = fit_row(row, self.field_count);
        Ok(Some(if self.is_keyed() {
            Dataset::keyed(self.line, &self.options.header_names, row)
        } else {
            Dataset::positional(self.line, row)
        }))
    }

    /// Iterate rows from the current position without rewinding.
    pub fn rows(&mut self) -> Rows<'_> {
        Rows { reader: self }
    }

    fn next_record(&mut self) -> Result<Option<Vec<String>>> {
        if self.state != ReaderState::Ready {
            return Ok(None);
        }

        if !self.header_done {
            self.header_done = true;
            if self.options.first_line_is_header {
                match self.read_raw() {
                    Ok(Some(header)) if self.options.header_names.is_empty() => {
                        self.options.header_names = header;
                    }
                    Ok(Some(_)) => {}
                    Ok(None) => return self.exhaust(),
                    Err(err) => return self.fail(err),
                }
            }
        }

        match self.read_raw() {
            Ok(Some(row)) => {
                self.line += 1;
                Ok(Some(row))
            }
            Ok(None) => self.exhaust(),
            Err(err) => self.fail(err),
        }
    }

    fn read_raw(&mut self) -> Result<Option<Vec<String>>> {
        let Some(cursor) = self.source.as_mut() else {
            return Ok(None);
        };
        let tokenizer = Tokenizer {
            separator: self.options.separator.unwrap_or(self.format.separator),
            line_ending: self.format.line_ending,
            plan: &self.plan,
            ignore_empty_lines: self.options.ignore_empty_lines,
            strip_tags: self.options.strip_tags,
        };
        Ok(tokenizer.next_record(cursor)?)
    }

    fn exhaust<T>(&mut self) -> Result<Option<T>> {
        self.state = ReaderState::Exhausted;
        Ok(None)
    }

    fn fail<T>(&mut self, err: ReaderError) -> Result<Option<T>> {
        self.state = ReaderState::Exhausted;
        Err(err)
    }

    fn is_keyed(&self) -> bool {
        self.options.first_line_is_header || !self.options.header_names.is_empty()
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub fn bom_encoding(&self) -> &'static str {
        self.format.bom_encoding()
    }

    pub fn bom_length(&self) -> usize {
        self.format.bom_length()
    }

    pub fn fixed_width_fields(&self) -> &[usize] {
        &self.plan
    }

    pub fn is_loaded(&self) -> bool {
        self.state != ReaderState::Unopened
    }

    pub fn line_ending(&self) -> LineEnding {
        self.format.line_ending
    }

    /// Active separator: the override if set, else the detected one.
    pub fn separator(&self) -> u8 {
        self.options.separator.unwrap_or(self.format.separator)
    }

    pub fn strip_tags(&self) -> bool {
        self.options.strip_tags
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn header_names(&self) -> &[String] {
        &self.options.header_names
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn first_line_is_header(&self) -> bool {
        self.options.first_line_is_header
    }

    pub fn ignore_empty_lines(&self) -> bool {
        self.options.ignore_empty_lines
    }

    pub fn format(&self) -> &DetectedFormat {
        &self.format
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Separator vote over an in-memory line, without opening anything.
    pub fn detect_separator(line: &str) -> u8 {
        vote_separator(line.as_bytes())
    }
}

/// Row iterator returned by [`TableReader::rows`].
pub struct Rows<'r> {
    reader: &'r mut TableReader,
}

impl Iterator for Rows<'_> {
    type Item = Result<Dataset>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_row().transpose()
    }
}

/// Write `content` to a fresh temporary file.
fn stage(op: &'static str, content: &[u8]) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempfile()
        .map_err(|e| ReaderError::staging(op, "unable to create temporary file", e))?;
    file.write_all(content)
        .and_then(|()| file.flush())
        .map_err(|e| ReaderError::staging(op, "unable to write temporary file", e))?;
    Ok(file)
}
