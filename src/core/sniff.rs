// Format Sniffer
//
// Runs once right after a stream is opened:
// 1. BOM match against the signature table (only for BOM-capable content)
// 2. Line-ending scan, voting on candidate separators along the way
// 3. Field count of the first physical line
// The cursor is left just past the BOM.

use super::bom::{match_bom, Bom, MAX_BOM_LEN};
use super::cursor::ByteCursor;
use super::newlines::{is_newline_byte, LineEnding};
use super::scanner::{SeparatorVote, DEFAULT_SEPARATOR};
use std::io::{self, Read, Seek};

/// Sniffed layout of a source. Immutable once detection completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedFormat {
    pub bom: Option<&'static Bom>,
    pub line_ending: LineEnding,
    pub separator: u8,
    pub field_count: usize,
}

impl DetectedFormat {
    pub fn bom_length(&self) -> usize {
        self.bom.map_or(0, |b| b.len())
    }

    /// BOM encoding name, or the empty string when there is none.
    pub fn bom_encoding(&self) -> &'static str {
        self.bom.map_or("", |b| b.name)
    }
}

impl Default for DetectedFormat {
    fn default() -> Self {
        DetectedFormat {
            bom: None,
            line_ending: LineEnding::NONE,
            separator: DEFAULT_SEPARATOR,
            field_count: 0,
        }
    }
}

/// Detection inputs supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffConfig {
    /// Content was classified as carrying a BOM
    pub with_bom: bool,
    /// Skip the vote and use this separator
    pub separator: Option<u8>,
}

/// Sniff BOM, line ending, separator and field count from the start of `cursor`.
pub fn detect<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    config: SniffConfig,
) -> io::Result<DetectedFormat> {
    cursor.seek_to(0)?;

    let mut bom = None;
    if config.with_bom {
        let mut head = [0u8; MAX_BOM_LEN];
        let filled = cursor.read_up_to(&mut head)?;
        bom = match_bom(&head[..filled]);
    }
    let bom_length = bom.map_or(0, |b: &Bom| b.len()) as u64;
    cursor.seek_to(bom_length)?;

    let (line_ending, vote) = scan_first_line(cursor)?;
    let separator = config.separator.unwrap_or_else(|| vote.winner());

    cursor.seek_to(bom_length)?;
    let field_count = count_fields(cursor, separator, line_ending)?;

    cursor.seek_to(bom_length)?;

    let format = DetectedFormat {
        bom,
        line_ending,
        separator,
        field_count,
    };
    log::debug!(
        "detected format: bom={:?} line_ending=\"{}\" separator={:?} fields={}",
        format.bom_encoding(),
        line_ending.escaped(),
        separator as char,
        field_count
    );
    Ok(format)
}

/// Scan forward to the first CR and/or LF, voting on separators before it.
fn scan_first_line<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
) -> io::Result<(LineEnding, SeparatorVote)> {
    let mut vote = SeparatorVote::new();

    while let Some(byte) = cursor.next_byte()? {
        if !is_newline_byte(byte) {
            vote.observe(byte);
            continue;
        }

        if byte == b'\n' {
            return Ok((LineEnding::LF, vote));
        }

        // CR: Windows if LF follows, classic Mac otherwise
        return match cursor.next_byte()? {
            Some(b'\n') => Ok((LineEnding::CRLF, vote)),
            Some(other) => {
                cursor.unread(other);
                Ok((LineEnding::CR, vote))
            }
            None => Ok((LineEnding::CR, vote)),
        };
    }

    Ok((LineEnding::NONE, vote))
}

/// Separator occurrences on the first physical line, plus one.
fn count_fields<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    separator: u8,
    line_ending: LineEnding,
) -> io::Result<usize> {
    let mut count = 1;
    let stop = line_ending.first();
    while let Some(byte) = cursor.next_byte()? {
        if Some(byte) == stop {
            break;
        }
        if byte == separator {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sniff(input: &[u8], with_bom: bool) -> (DetectedFormat, u64) {
        let mut cursor = ByteCursor::new(Cursor::new(input.to_vec()));
        let format = detect(
            &mut cursor,
            SniffConfig {
                with_bom,
                separator: None,
            },
        )
        .unwrap();
        (format, cursor.position())
    }

    #[test]
    fn test_semicolon_unix() {
        let (format, pos) = sniff(b"id;country;city\n1;DEU;Hannover\n", false);
        assert_eq!(format.separator, b';');
        assert_eq!(format.line_ending, LineEnding::LF);
        assert_eq!(format.field_count, 3);
        assert_eq!(format.bom_length(), 0);
        assert_eq!(format.bom_encoding(), "");
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_line_ending_styles() {
        assert_eq!(sniff(b"a,b\r\nc,d", false).0.line_ending, LineEnding::CRLF);
        assert_eq!(sniff(b"a,b\rc,d", false).0.line_ending, LineEnding::CR);
        assert_eq!(sniff(b"a,b\r", false).0.line_ending, LineEnding::CR);
        assert_eq!(sniff(b"a,b", false).0.line_ending, LineEnding::NONE);
    }

    #[test]
    fn test_same_result_for_every_line_ending() {
        for nl in ["\n", "\r\n", "\r"] {
            let input = format!("a|b|c{nl}1|2|3{nl}");
            let (format, _) = sniff(input.as_bytes(), false);
            assert_eq!(format.separator, b'|', "line ending {nl:?}");
            assert_eq!(format.field_count, 3, "line ending {nl:?}");
        }
    }

    #[test]
    fn test_only_first_line_votes() {
        let (format, _) = sniff(b"a;b\n1,2,3,4,5\n", false);
        assert_eq!(format.separator, b';');
        assert_eq!(format.field_count, 2);
    }

    #[test]
    fn test_utf8_bom_skipped() {
        let (format, pos) = sniff(b"\xEF\xBB\xBFid;name\n1;x\n", true);
        assert_eq!(format.bom_length(), 3);
        assert_eq!(format.bom_encoding(), "UTF-8");
        assert_eq!(format.field_count, 2);
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_bom_ignored_unless_flagged() {
        let (format, pos) = sniff(b"\xEF\xBB\xBFid;name\n", false);
        assert_eq!(format.bom_length(), 0);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_single_column_defaults_to_comma() {
        let (format, _) = sniff(b"name\nalice\n", false);
        assert_eq!(format.separator, b',');
        assert_eq!(format.field_count, 1);
    }

    #[test]
    fn test_separator_override() {
        let mut cursor = ByteCursor::new(Cursor::new(b"a;b;c:d\n".to_vec()));
        let format = detect(
            &mut cursor,
            SniffConfig {
                with_bom: false,
                separator: Some(b':'),
            },
        )
        .unwrap();
        assert_eq!(format.separator, b':');
        assert_eq!(format.field_count, 2);
    }

    #[test]
    fn test_empty_input() {
        let (format, _) = sniff(b"", true);
        assert_eq!(format.line_ending, LineEnding::NONE);
        assert_eq!(format.field_count, 1);
        assert!(format.bom.is_none());
    }
}
