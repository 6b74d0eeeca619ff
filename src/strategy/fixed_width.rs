// Approach B: Fixed-width columns
//
// Accumulate one physical line, normalize it to UTF-8, then slice it by the
// plan's widths in character units so multi-byte characters are never split.

use super::{ends_line, RawRecord};
use crate::core::{finish_field, ByteCursor, LineEnding};
use std::io::{self, Read, Seek};

/// Read one line and split it into fixed-width fields.
///
/// Blank lines come back as `RawRecord::End`; the cursor's EOF flag tells
/// them apart from the real end of stream.
pub fn read_fixed_width<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    line_ending: LineEnding,
    widths: &[usize],
) -> io::Result<RawRecord> {
    let mut line = Vec::new();

    while let Some(byte) = cursor.next_byte()? {
        if ends_line(cursor, byte, line_ending)? {
            break;
        }
        line.push(byte);
    }

    // An empty line ends this call whatever the blank-line policy
    if line.is_empty() {
        return Ok(RawRecord::End);
    }

    let text = finish_field(line);
    Ok(RawRecord::Fields(split_fixed_width(&text, widths)))
}

/// Slice a line at the plan's character offsets.
///
/// Slicing stops once the line is used up; unused trailing widths produce no
/// field. The last slice may be shorter than its width.
pub fn split_fixed_width(line: &str, widths: &[usize]) -> Vec<String> {
    // Byte offset of every char boundary, including the end of the line
    let bounds: Vec<usize> = line
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(line.len()))
        .collect();
    let char_len = bounds.len() - 1;

    let mut fields = Vec::with_capacity(widths.len());
    let mut start = 0;
    for &width in widths {
        if start >= char_len {
            break;
        }
        let end = start.saturating_add(width).min(char_len);
        fields.push(line[bounds[start]..bounds[end]].to_string());
        start = start.saturating_add(width);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WIDTHS: [usize; 6] = [3, 8, 13, 7, 10, 5];

    #[test]
    fn test_split_header_line() {
        let fields = split_fixed_width("id country city         postal street    house", &WIDTHS);
        assert_eq!(
            fields,
            vec!["id ", "country ", "city         ", "postal ", "street    ", "house"]
        );
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        let fields = split_fixed_width("1  DEU     Braunschweig 38106  Bültenweg 73", &WIDTHS);
        assert_eq!(fields.len(), WIDTHS.len());
        assert_eq!(fields[4], "Bültenweg ");
        assert_eq!(fields[5], "73");
    }

    #[test]
    fn test_split_short_line_drops_unused_widths() {
        let fields = split_fixed_width("3  DEU     incomplete   38100", &WIDTHS);
        assert_eq!(fields, vec!["3  ", "DEU     ", "incomplete   ", "38100"]);
    }

    #[test]
    fn test_split_zero_width() {
        assert_eq!(split_fixed_width("abc", &[1, 0, 2]), vec!["a", "", "bc"]);
    }

    #[test]
    fn test_read_lines() {
        let mut cursor = ByteCursor::new(Cursor::new(b"ab12\r\n\r\ncd34".to_vec()));
        let rec = read_fixed_width(&mut cursor, LineEnding::CRLF, &[2, 2]).unwrap();
        assert_eq!(rec, RawRecord::Fields(vec!["ab".into(), "12".into()]));
        let rec = read_fixed_width(&mut cursor, LineEnding::CRLF, &[2, 2]).unwrap();
        assert_eq!(rec, RawRecord::End);
        assert!(!cursor.is_eof());
        let rec = read_fixed_width(&mut cursor, LineEnding::CRLF, &[2, 2]).unwrap();
        assert_eq!(rec, RawRecord::Fields(vec!["cd".into(), "34".into()]));
        let rec = read_fixed_width(&mut cursor, LineEnding::CRLF, &[2, 2]).unwrap();
        assert_eq!(rec, RawRecord::End);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_lone_cr_is_data_with_crlf_ending() {
        let mut cursor = ByteCursor::new(Cursor::new(b"a\rbcd\r\n".to_vec()));
        let rec = read_fixed_width(&mut cursor, LineEnding::CRLF, &[2, 3]).unwrap();
        assert_eq!(rec, RawRecord::Fields(vec!["a\r".into(), "bcd".into()]));
    }

    #[test]
    fn test_latin1_line_is_repaired() {
        let mut cursor = ByteCursor::new(Cursor::new(b"M\xFCnchen\n".to_vec()));
        let rec = read_fixed_width(&mut cursor, LineEnding::LF, &[3, 10]).unwrap();
        assert_eq!(rec, RawRecord::Fields(vec!["Mün".into(), "chen".into()]));
    }
}
