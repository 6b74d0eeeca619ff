// Approach A: Delimited records with quoting
//
// Single pass over bytes with two states, unquoted and quoted:
// - A `"` at the start of a field opens quoted state (the quote is dropped)
// - Unquoted: separator ends the field, a matched line ending ends the record
// - Quoted: `""` is a literal quote; a lone `"` closes the field, and a
//   following separator or line ending is consumed. Anything else is pushed
//   back and starts the next field.
// Fields are normalized to UTF-8 one by one.

use super::{ends_line, RawRecord};
use crate::core::{finish_field, is_separator, ByteCursor, LineEnding};
use std::io::{self, Read, Seek};
use std::mem;

/// Quote character
pub const QUOTE: u8 = b'"';

/// Read one delimited record starting at the cursor.
pub fn read_delimited<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    separator: u8,
    line_ending: LineEnding,
) -> io::Result<RawRecord> {
    let mut fields = Vec::new();
    let mut field: Vec<u8> = Vec::new();
    let mut quoted = false;

    while let Some(byte) = cursor.next_byte()? {
        if quoted {
            if byte != QUOTE {
                field.push(byte);
                continue;
            }
            match cursor.next_byte()? {
                Some(QUOTE) => field.push(QUOTE),
                Some(next) => {
                    quoted = false;
                    fields.push(finish_field(mem::take(&mut field)));
                    if is_separator(next, separator) {
                        continue;
                    }
                    if ends_line(cursor, next, line_ending)? {
                        break;
                    }
                    cursor.unread(next);
                }
                None => {
                    // Closing quote at end of stream
                    fields.push(finish_field(mem::take(&mut field)));
                    break;
                }
            }
            continue;
        }

        if field.is_empty() && byte == QUOTE {
            quoted = true;
            continue;
        }

        if is_separator(byte, separator) {
            fields.push(finish_field(mem::take(&mut field)));
            continue;
        }

        if ends_line(cursor, byte, line_ending)? {
            fields.push(finish_field(mem::take(&mut field)));
            break;
        }

        field.push(byte);
    }

    // Last field of an unterminated last line
    if !field.is_empty() {
        fields.push(finish_field(field));
    }

    if fields.is_empty() {
        return Ok(RawRecord::End);
    }
    if fields.len() == 1 && fields[0].is_empty() {
        return Ok(RawRecord::Blank);
    }
    Ok(RawRecord::Fields(fields))
}
