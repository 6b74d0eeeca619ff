// Parallel fan-out over independent sources using Rayon
//
// Every path gets its own TableReader; readers share nothing but the
// (cloned) options, so no synchronization is needed.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::options::ReaderOptions;
use crate::reader::TableReader;
use rayon::prelude::*;
use std::path::Path;

/// Read every file in parallel. Results keep the order of `paths`.
pub fn read_files_parallel<P>(paths: &[P], options: &ReaderOptions) -> Vec<Result<Vec<Dataset>>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| read_one(path.as_ref(), options, None))
        .collect()
}

/// Read fixed-width files in parallel, all sharing one format file.
pub fn read_fixed_width_parallel<P, F>(
    paths: &[P],
    format_file: F,
    options: &ReaderOptions,
) -> Vec<Result<Vec<Dataset>>>
where
    P: AsRef<Path> + Sync,
    F: AsRef<Path> + Sync,
{
    let format_file = format_file.as_ref();
    paths
        .par_iter()
        .map(|path| read_one(path.as_ref(), options, Some(format_file)))
        .collect()
}

fn read_one(path: &Path, options: &ReaderOptions, format_file: Option<&Path>) -> Result<Vec<Dataset>> {
    let mut reader = TableReader::with_options(options.clone());
    if let Some(format_file) = format_file {
        reader.load_format_file(format_file, options.header_names.is_empty())?;
    }
    reader.load_file(path)?;
    reader.read_datasets(None, 0)
}
