// Format-Plan Loader
//
// A plan source is itself a small delimited table, in one of two shapes:
// - bare widths on the first record: `3|8|13|7|10|5`
// - a labeled table with `length`, or `start` + `stop`, and optionally
//   `fieldname` columns, one column definition per record

use super::Tokenizer;
use crate::core::{detect, ByteCursor, SniffConfig};
use crate::error::{ReaderError, Result};
use std::io::{Read, Seek};
use std::path::Path;

const OP: &str = "load_format_file";

/// Column widths plus the names harvested from a `fieldname` column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatPlan {
    pub widths: Vec<usize>,
    pub header_names: Option<Vec<String>>,
}

impl FormatPlan {
    pub fn field_count(&self) -> usize {
        self.widths.len()
    }
}

/// Positions of the recognized labels in the first record.
#[derive(Debug, Default, Clone, Copy)]
struct PlanColumns {
    length: Option<usize>,
    start: Option<usize>,
    stop: Option<usize>,
    fieldname: Option<usize>,
}

impl PlanColumns {
    fn locate(labels: &[String]) -> Self {
        let mut columns = PlanColumns::default();
        for (idx, label) in labels.iter().enumerate() {
            match label.trim().to_lowercase().as_str() {
                "length" => columns.length = Some(idx),
                "start" => columns.start = Some(idx),
                "stop" => columns.stop = Some(idx),
                "fieldname" => columns.fieldname = Some(idx),
                _ => {}
            }
        }
        columns
    }

    fn is_labeled(&self) -> bool {
        self.length.is_some() || (self.start.is_some() && self.stop.is_some())
    }
}

/// Sniff and parse a plan source.
///
/// `source` only labels errors. With `extract_header_names` set and a
/// `fieldname` column present, the plan also carries one name per column.
pub fn load_plan<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    source: &Path,
    extract_header_names: bool,
) -> Result<FormatPlan> {
    let format = detect(cursor, SniffConfig::default())?;
    let tokenizer = Tokenizer {
        separator: format.separator,
        line_ending: format.line_ending,
        plan: &[],
        ignore_empty_lines: true,
        strip_tags: false,
    };

    let labels = tokenizer
        .next_record(cursor)?
        .ok_or_else(|| ReaderError::empty_format(OP, source))?;
    let columns = PlanColumns::locate(&labels);

    let plan = if columns.is_labeled() {
        let mut widths = Vec::new();
        let mut names = Vec::new();
        while let Some(record) = tokenizer.next_record(cursor)? {
            widths.push(column_width(&record, columns, source)?);
            if let Some(idx) = columns.fieldname {
                names.push(cell(&record, idx).trim().to_string());
            }
        }
        let header_names = (extract_header_names && columns.fieldname.is_some()).then_some(names);
        FormatPlan {
            widths,
            header_names,
        }
    } else {
        let widths = labels
            .iter()
            .map(|value| parse_width(value, source))
            .collect::<Result<Vec<_>>>()?;
        FormatPlan {
            widths,
            header_names: None,
        }
    };

    if plan.widths.is_empty() {
        return Err(ReaderError::empty_format(OP, source));
    }

    log::debug!(
        "loaded format plan from {}: widths={:?} names={}",
        source.display(),
        plan.widths,
        plan.header_names.as_ref().map_or(0, Vec::len)
    );
    Ok(plan)
}

/// Width of one column definition: `length`, else `stop - start + 1`.
fn column_width(record: &[String], columns: PlanColumns, source: &Path) -> Result<usize> {
    if let Some(idx) = columns.length {
        return parse_width(cell(record, idx), source);
    }

    // is_labeled() guarantees both are present here
    let (Some(start_idx), Some(stop_idx)) = (columns.start, columns.stop) else {
        return Err(ReaderError::empty_format(OP, source));
    };
    let start = parse_width(cell(record, start_idx), source)?;
    let stop_raw = cell(record, stop_idx);
    let stop = parse_width(stop_raw, source)?;
    if stop < start {
        return Err(ReaderError::bad_width(OP, source, stop_raw.trim()));
    }
    Ok(stop - start + 1)
}

fn cell(record: &[String], idx: usize) -> &str {
    record.get(idx).map_or("", String::as_str)
}

fn parse_width(raw: &str, source: &Path) -> Result<usize> {
    let value = raw.trim();
    value
        .parse::<usize>()
        .map_err(|_| ReaderError::bad_width(OP, source, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn plan(input: &str, names: bool) -> Result<FormatPlan> {
        let mut cursor = ByteCursor::new(Cursor::new(input.as_bytes().to_vec()));
        load_plan(&mut cursor, Path::new("format.txt"), names)
    }

    #[test]
    fn test_bare_widths() {
        let p = plan("3|8|13|7|10|5", false).unwrap();
        assert_eq!(p.widths, vec![3, 8, 13, 7, 10, 5]);
        assert_eq!(p.header_names, None);
        assert_eq!(p.field_count(), 6);
    }

    #[test]
    fn test_bare_widths_only_first_record() {
        let p = plan("3|8\nid\ncountry\n", false).unwrap();
        assert_eq!(p.widths, vec![3, 8]);
        assert_eq!(p.field_count(), 2);
    }

    #[test]
    fn test_labeled_table_with_names() {
        let input = "Fieldname|Length|Start|Stop\n\
                     id|3|1|3\n\
                     country|8|4|11\n\
                     city|13|12|24";
        let p = plan(input, true).unwrap();
        assert_eq!(p.widths, vec![3, 8, 13]);
        assert_eq!(
            p.header_names,
            Some(vec!["id".to_string(), "country".to_string(), "city".to_string()])
        );

        let p = plan(input, false).unwrap();
        assert_eq!(p.header_names, None);
    }

    #[test]
    fn test_start_stop_table() {
        let p = plan("start;stop\n1;3\n4;11\n\n12;24\n", false).unwrap();
        assert_eq!(p.widths, vec![3, 8, 13]);
    }

    #[test]
    fn test_non_numeric_value() {
        let err = plan("3|x|5", false).unwrap_err();
        match err {
            ReaderError::FormatParse { value, path, .. } => {
                assert_eq!(value.as_deref(), Some("x"));
                assert_eq!(path, Path::new("format.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = plan("length\n3\nabc\n", false).unwrap_err();
        assert!(err.to_string().contains("(abc)"));
    }

    #[test]
    fn test_stop_before_start() {
        assert!(plan("start,stop\n10,2\n", false).is_err());
    }

    #[test]
    fn test_empty_source() {
        let err = plan("", false).unwrap_err();
        assert!(err.to_string().contains("error parsing the format-file"));
        assert!(plan("length\n", false).is_err());
    }
}
