//! FILENAME: core/qname/src/parser.rs
//! PURPOSE: Scanner for bracketed qualified member names.
//! CONTEXT: Single-pass scan over the input string. Each segment must be
//! bracket-delimited; segments are separated by a single `.` and the last
//! segment must be followed by end of input.
//!
//! GRAMMAR:
//!   qualified --> segment ("." segment)*
//!   segment   --> "[" seg_char+ "]"
//!   seg_char  --> any char except "]" | "]]" (escaped literal "]")

use smallvec::SmallVec;
use thiserror::Error;

/// Parsed path segments in root-to-leaf order.
/// Member paths are almost always short, so storage is inline for up to
/// four segments.
pub type Segments = SmallVec<[String; 4]>;

/// Errors for malformed qualified names. Every variant carries the byte
/// offset where scanning stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QnameError {
    #[error("empty qualified name")]
    Empty,

    #[error("expected '[' at offset {0}")]
    ExpectedOpenBracket(usize),

    #[error("empty segment at offset {0}")]
    EmptySegment(usize),

    #[error("unterminated segment starting at offset {0}")]
    UnterminatedSegment(usize),

    #[error("expected '.' or end of input at offset {0}")]
    ExpectedDot(usize),

    #[error("trailing '.' with no segment at offset {0}")]
    TrailingDot(usize),
}

pub type QnameResult<T> = Result<T, QnameError>;

/// Parses a bracketed qualified name into its segments.
///
/// `[Store].[USA].[CA]` becomes `["Store", "USA", "CA"]`. A doubled `]]`
/// inside a segment is unescaped to a literal `]`.
pub fn parse(input: &str) -> QnameResult<Segments> {
    let mut segments = Segments::new();
    let mut chars = input.char_indices().peekable();

    loop {
        // Expect the opening bracket of the next segment.
        let seg_start = match chars.next() {
            Some((offset, '[')) => offset,
            Some((offset, _)) => return Err(QnameError::ExpectedOpenBracket(offset)),
            None if segments.is_empty() => return Err(QnameError::Empty),
            None => return Err(QnameError::TrailingDot(input.len())),
        };

        // Accumulate until the closing bracket, honoring the `]]` escape.
        let mut segment = String::new();
        loop {
            match chars.next() {
                Some((offset, ']')) => {
                    if matches!(chars.peek(), Some(&(_, ']'))) {
                        chars.next();
                        segment.push(']');
                    } else if segment.is_empty() {
                        return Err(QnameError::EmptySegment(offset));
                    } else {
                        break;
                    }
                }
                Some((_, ch)) => segment.push(ch),
                None => return Err(QnameError::UnterminatedSegment(seg_start)),
            }
        }
        segments.push(segment);

        // After a segment: either end of input or a separator dot.
        match chars.next() {
            None => return Ok(segments),
            Some((_, '.')) => {}
            Some((offset, _)) => return Err(QnameError::ExpectedDot(offset)),
        }
    }
}

/// Quotes one plain segment name into its bracketed form, escaping any
/// literal `]` as `]]`.
pub fn quote_segment(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Joins plain segment names into a bracketed qualified name.
/// Inverse of [`parse`] for any segments `parse` can produce.
pub fn join<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(quote_segment)
        .collect::<Vec<_>>()
        .join(".")
}
