// Reader configuration

/// Configuration surface read by [`TableReader`](crate::TableReader).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Consume the first record as header names
    pub first_line_is_header: bool,
    /// Explicit header names; blank entries fall back to positional keys
    pub header_names: Vec<String>,
    /// Hide records whose only field is the empty string
    pub ignore_empty_lines: bool,
    /// Remove angle-bracket tags from every field
    pub strip_tags: bool,
    /// Use this separator instead of the sniffed one
    pub separator: Option<u8>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            first_line_is_header: false,
            header_names: Vec::new(),
            ignore_empty_lines: true,
            strip_tags: false,
            separator: None,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_line_is_header(mut self, yes: bool) -> Self {
        self.first_line_is_header = yes;
        self
    }

    pub fn with_header_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignore_empty_lines(mut self, yes: bool) -> Self {
        self.ignore_empty_lines = yes;
        self
    }

    pub fn with_strip_tags(mut self, yes: bool) -> Self {
        self.strip_tags = yes;
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = Some(separator);
        self
    }
}
