// Row materialization: positional lists or header-keyed maps

use std::fmt;

/// Key of one value in a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    Name(String),
    Index(usize),
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Name(name) => f.write_str(name),
            ColumnKey::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// One delivered row with its 1-based record number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub line: usize,
    pub values: Vec<(ColumnKey, String)>,
}

impl Dataset {
    /// Positional row: keys are column indices.
    pub fn positional(line: usize, row: Vec<String>) -> Self {
        let values = row
            .into_iter()
            .enumerate()
            .map(|(idx, value)| (ColumnKey::Index(idx), value))
            .collect();
        Dataset { line, values }
    }

    /// Keyed row: column `i` is labeled by `names[i]`, or by its index when
    /// the name is missing or blank.
    pub fn keyed(line: usize, names: &[String], row: Vec<String>) -> Self {
        let values = row
            .into_iter()
            .enumerate()
            .map(|(idx, value)| (column_key(names, idx), value))
            .collect();
        Dataset { line, values }
    }

    /// Value of a named column.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.iter().find_map(|(key, value)| match key {
            ColumnKey::Name(n) if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Value at a column position.
    pub fn at(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(|(_, value)| value.as_str())
    }

    /// Field values in column order.
    pub fn fields(&self) -> Vec<&str> {
        self.values.iter().map(|(_, value)| value.as_str()).collect()
    }

    pub fn into_fields(self) -> Vec<String> {
        self.values.into_iter().map(|(_, value)| value).collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ColumnKey> {
        self.values.iter().map(|(key, _)| key)
    }
}

fn column_key(names: &[String], idx: usize) -> ColumnKey {
    match names.get(idx) {
        Some(name) if !name.is_empty() => ColumnKey::Name(name.clone()),
        _ => ColumnKey::Index(idx),
    }
}

/// Pad with empty strings or truncate a row to exactly `field_count` fields.
pub fn fit_row(mut row: Vec<String>, field_count: usize) -> Vec<String> {
    row.resize(field_count, String::new());
    row
}
