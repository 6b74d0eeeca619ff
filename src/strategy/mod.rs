// Record tokenization strategies
//
// A: Delimited with quoting (delimited.rs)
// B: Fixed-width character columns (fixed_width.rs)
// The mode is picked per call: a non-empty width plan selects fixed-width.
// plan.rs loads width plans through the delimited path.

pub mod delimited;
pub mod fixed_width;
pub mod plan;

pub use delimited::read_delimited;
pub use fixed_width::{read_fixed_width, split_fixed_width};
pub use plan::{load_plan, FormatPlan};

use crate::core::{strip_record_tags, ByteCursor, LineEnding};
use std::io::{self, Read, Seek};

/// One physical record as seen by a strategy, before policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    Fields(Vec<String>),
    /// A terminated record whose only field is the empty string
    Blank,
    End,
}

/// Result of one tokenizer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Record(Vec<String>),
    /// Empty line hidden by the ignore-empty-lines policy
    Skipped,
    End,
}

/// Per-source tokenizer state, seeded by the sniffer.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    pub separator: u8,
    pub line_ending: LineEnding,
    pub plan: &'a [usize],
    pub ignore_empty_lines: bool,
    pub strip_tags: bool,
}

impl<'a> Tokenizer<'a> {
    /// Read exactly one physical record from the cursor.
    pub fn read_record<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> io::Result<Token> {
        let raw = if self.plan.is_empty() {
            read_delimited(cursor, self.separator, self.line_ending)?
        } else {
            read_fixed_width(cursor, self.line_ending, self.plan)?
        };

        Ok(match raw {
            RawRecord::End => Token::End,
            RawRecord::Blank if self.ignore_empty_lines => Token::Skipped,
            RawRecord::Blank => Token::Record(vec![String::new()]),
            RawRecord::Fields(mut fields) => {
                if self.strip_tags {
                    strip_record_tags(&mut fields);
                }
                Token::Record(fields)
            }
        })
    }

    /// Read the next delivered record, stepping over skipped empty lines.
    ///
    /// Fixed-width blank lines end a call before the stream does; they are
    /// stepped over until the cursor reports end of stream.
    pub fn next_record<R: Read + Seek>(
        &self,
        cursor: &mut ByteCursor<R>,
    ) -> io::Result<Option<Vec<String>>> {
        loop {
            match self.read_record(cursor)? {
                Token::Record(fields) => return Ok(Some(fields)),
                Token::Skipped => continue,
                Token::End if !cursor.is_eof() => continue,
                Token::End => return Ok(None),
            }
        }
    }
}

/// Check whether `byte` starts a complete line ending.
///
/// For a 2-byte ending the second byte is read ahead; if it does not match it
/// is pushed back and `byte` counts as data.
#[inline]
pub(crate) fn ends_line<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    byte: u8,
    line_ending: LineEnding,
) -> io::Result<bool> {
    if line_ending.first() != Some(byte) {
        return Ok(false);
    }
    let Some(second) = line_ending.second() else {
        return Ok(true);
    };
    match cursor.next_byte()? {
        Some(next) if next == second => Ok(true),
        Some(next) => {
            cursor.unread(next);
            Ok(false)
        }
        None => Ok(false),
    }
}
