//! Faction list decoding
//!
//! Faction cells hold a serialized list literal such as `['Union', "Army of
//! the Potomac"]`. The decoder accepts exactly that shape: brackets, quoted
//! strings separated by commas, an optional trailing comma and whitespace.
//! Anything else is rejected and the caller falls back to the raw text.

use super::escape_html;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListParseError {
    #[error("expected '[' at offset {0}")]
    ExpectedOpen(usize),

    #[error("expected a quoted string at offset {0}")]
    ExpectedString(usize),

    #[error("expected ',' or ']' at offset {0}")]
    ExpectedSeparator(usize),

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("trailing characters at offset {0}")]
    TrailingCharacters(usize),

    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    #[error("unexpected end of input")]
    UnexpectedEnd,
}

/// Decode a list literal of quoted strings
pub fn parse_faction_list(input: &str) -> Result<Vec<String>, ListParseError> {
    let mut chars = input.char_indices().peekable();
    let mut entries = Vec::new();

    skip_whitespace(&mut chars);
    match chars.next() {
        Some((_, '[')) => {}
        Some((offset, _)) => return Err(ListParseError::ExpectedOpen(offset)),
        None => return Err(ListParseError::UnexpectedEnd),
    }

    loop {
        skip_whitespace(&mut chars);
        match chars.peek().copied() {
            Some((_, ']')) => {
                chars.next();
                break;
            }
            Some((offset, quote @ ('\'' | '"'))) => {
                chars.next();
                entries.push(parse_string(&mut chars, quote, offset)?);
            }
            Some((offset, _)) => return Err(ListParseError::ExpectedString(offset)),
            None => return Err(ListParseError::UnexpectedEnd),
        }

        skip_whitespace(&mut chars);
        match chars.next() {
            Some((_, ',')) => {}
            Some((_, ']')) => break,
            Some((offset, _)) => return Err(ListParseError::ExpectedSeparator(offset)),
            None => return Err(ListParseError::UnexpectedEnd),
        }
    }

    skip_whitespace(&mut chars);
    if let Some((offset, _)) = chars.next() {
        return Err(ListParseError::TrailingCharacters(offset));
    }

    Ok(entries)
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
}

fn parse_string(
    chars: &mut Peekable<CharIndices<'_>>,
    quote: char,
    start: usize,
) -> Result<String, ListParseError> {
    let mut value = String::new();
    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, 'a')) => value.push('\u{07}'),
                Some((_, 'b')) => value.push('\u{08}'),
                Some((_, 'f')) => value.push('\u{0c}'),
                Some((_, 'v')) => value.push('\u{0b}'),
                Some((_, escaped @ ('\\' | '\'' | '"'))) => value.push(escaped),
                Some((_, 'x')) => value.push(parse_hex_escape(chars, 2, offset)?),
                Some((_, 'u')) => value.push(parse_hex_escape(chars, 4, offset)?),
                Some((_, 'U')) => value.push(parse_hex_escape(chars, 8, offset)?),
                // Unknown escapes are kept verbatim
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => break,
            },
            c if c == quote => return Ok(value),
            c => value.push(c),
        }
    }
    Err(ListParseError::UnterminatedString(start))
}

/// Read exactly `digits` hex digits and return the code point they name
fn parse_hex_escape(
    chars: &mut Peekable<CharIndices<'_>>,
    digits: usize,
    offset: usize,
) -> Result<char, ListParseError> {
    let mut code = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next_if(|(_, c)| c.is_ascii_hexdigit())
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or(ListParseError::InvalidEscape(offset))?;
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or(ListParseError::InvalidEscape(offset))
}

/// Join faction names for display, one per line
pub fn format_factions<S: AsRef<str>>(factions: &[S]) -> String {
    factions
        .iter()
        .map(|faction| escape_html(faction.as_ref()))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// A faction cell, decoded when it is a valid list literal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Factions {
    List(Vec<String>),
    Raw(String),
}

impl Factions {
    pub fn from_raw(raw: &str) -> Self {
        match parse_faction_list(raw) {
            Ok(list) => Self::List(list),
            Err(err) => {
                tracing::debug!("Faction list {raw:?} not decoded ({err}), showing raw text");
                Self::Raw(raw.to_string())
            }
        }
    }

    /// Escaped HTML, entries separated by `<br>`
    pub fn to_html(&self) -> String {
        match self {
            Self::List(list) => format_factions(list),
            Self::Raw(raw) => escape_html(raw),
        }
    }

    /// Plain text, one entry per line
    pub fn to_text(&self) -> String {
        match self {
            Self::List(list) => list.join("\n"),
            Self::Raw(raw) => raw.clone(),
        }
    }
}
