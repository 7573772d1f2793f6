//! Tokenizer for dotted/bracket path strings.
//!
//! Grammar, left to right:
//! - `.` ends the current name. An empty name between two dots (or before a
//!   leading dot, or after a trailing one) is the empty-string key.
//! - `[` starts a bracket group. Its content becomes one segment: canonical
//!   unsigned integers become [`Segment::Index`], a `'`/`"` quoted string
//!   becomes a key with the quotes stripped and `\` escapes resolved, anything
//!   else is taken verbatim as a key.
//! - text directly after `]` starts a new name (`"a[0]b"` is `a`, `0`, `b`).

use std::iter::Peekable;
use std::str::CharIndices;

use super::{PathError, Segment};
use crate::constants::{BRACKET_CLOSE, BRACKET_OPEN, ESCAPE, PATH_SEPARATOR};

/// Splits a path string into segments.
pub(crate) fn parse(input: &str) -> Result<Vec<Segment>, PathError> {
    if input.is_empty() {
        return Err(PathError::Empty);
    }

    let mut segments = Vec::new();
    let mut name = String::new();
    // Whether the current dot-segment still owes a name segment, even an empty one.
    let mut pending = true;
    let mut chars = input.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            PATH_SEPARATOR => {
                if pending {
                    segments.push(Segment::Key(std::mem::take(&mut name)));
                }
                pending = true;
            }
            BRACKET_OPEN => {
                if !name.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut name)));
                }
                pending = false;
                segments.push(parse_bracket(input, position, &mut chars)?);
            }
            BRACKET_CLOSE => {
                return Err(PathError::UnexpectedCharacter {
                    path: input.to_string(),
                    found: ch,
                    position,
                });
            }
            _ => {
                name.push(ch);
                pending = true;
            }
        }
    }

    if pending {
        segments.push(Segment::Key(name));
    }

    Ok(segments)
}

/// Parses one bracket group; `open` is the byte position of its `[`.
fn parse_bracket(
    input: &str,
    open: usize,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<Segment, PathError> {
    let quote = match chars.peek() {
        Some(&(_, q @ ('"' | '\''))) => {
            chars.next();
            Some(q)
        }
        _ => None,
    };

    match quote {
        Some(quote) => {
            let key = read_quoted(input, open, quote, chars)?;
            match chars.next() {
                Some((_, BRACKET_CLOSE)) => Ok(Segment::Key(key)),
                Some((position, found)) => Err(PathError::UnexpectedCharacter {
                    path: input.to_string(),
                    found,
                    position,
                }),
                None => Err(PathError::UnterminatedBracket {
                    path: input.to_string(),
                    position: open,
                }),
            }
        }
        None => {
            let mut content = String::new();
            for (position, ch) in chars.by_ref() {
                match ch {
                    BRACKET_CLOSE => return Ok(Segment::from_bracket(content)),
                    BRACKET_OPEN => {
                        return Err(PathError::UnexpectedCharacter {
                            path: input.to_string(),
                            found: ch,
                            position,
                        });
                    }
                    _ => content.push(ch),
                }
            }
            Err(PathError::UnterminatedBracket {
                path: input.to_string(),
                position: open,
            })
        }
    }
}

fn read_quoted(
    input: &str,
    open: usize,
    quote: char,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<String, PathError> {
    let mut key = String::new();
    while let Some((_, ch)) = chars.next() {
        match ch {
            ESCAPE => match chars.next() {
                Some((_, escaped)) => key.push(escaped),
                None => break,
            },
            c if c == quote => return Ok(key),
            c => key.push(c),
        }
    }
    Err(PathError::UnterminatedQuote {
        path: input.to_string(),
        position: open + 1,
    })
}
