//! Status-line templates.
//!
//! | token      | expands to                                  |
//! |------------|---------------------------------------------|
//! | `%H`       | hours, zero-padded to 2, unbounded          |
//! | `%M`, `%S` | minutes / seconds within the hour / minute  |
//! | `%s`       | total whole seconds                         |
//! | `%f`       | fraction of a second, 6 digits              |
//! | `%<N>f`    | fraction of a second, N digits, truncated   |
//! | `%n` `%t` `%e` `%%` | newline, tab, ESC, `%`             |
//! | `\n` `\t` `\e` `\\` | newline, tab, ESC, `\`             |

use std::fmt::Write;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_FORMAT: &str = "Elapsed: %H:%M:%S";

const DEFAULT_FRACTION_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Hours,
    Minutes,
    Seconds,
    TotalSeconds,
    Fraction { digits: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pieces: Vec<Piece>,
    newlines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFormatError {
    #[error("'%' followed by unknown specifier {0:?}")]
    UnknownSpecifier(char),
    #[error("'%' at end of format")]
    DanglingPercent,
    #[error("backslash followed by unknown escape {0:?}")]
    UnknownEscape(char),
    #[error("backslash at end of format")]
    DanglingBackslash,
    #[error("fraction width is too large")]
    WidthOverflow,
}

impl Format {
    /// Number of line breaks the rendered text contains, needed to erase it.
    pub fn newlines(&self) -> usize {
        self.newlines
    }

    pub fn render(&self, elapsed: Duration) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            piece.render_into(&mut out, elapsed);
        }
        out
    }

    fn push_char(&mut self, c: char) {
        if c == '\n' {
            self.newlines += 1;
        }
        match self.pieces.last_mut() {
            Some(Piece::Literal(s)) => s.push(c),
            _ => self.pieces.push(Piece::Literal(c.to_string())),
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Self {
            pieces: vec![
                Piece::Literal("Elapsed: ".to_string()),
                Piece::Hours,
                Piece::Literal(":".to_string()),
                Piece::Minutes,
                Piece::Literal(":".to_string()),
                Piece::Seconds,
            ],
            newlines: 0,
        }
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fmt = Format {
            pieces: Vec::new(),
            newlines: 0,
        };
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '%' => match chars.next().ok_or(ParseFormatError::DanglingPercent)? {
                    'H' => fmt.pieces.push(Piece::Hours),
                    'M' => fmt.pieces.push(Piece::Minutes),
                    'S' => fmt.pieces.push(Piece::Seconds),
                    's' => fmt.pieces.push(Piece::TotalSeconds),
                    'f' => fmt.pieces.push(Piece::Fraction {
                        digits: DEFAULT_FRACTION_DIGITS,
                    }),
                    'n' => fmt.push_char('\n'),
                    't' => fmt.push_char('\t'),
                    'e' => fmt.push_char('\x1b'),
                    '%' => fmt.push_char('%'),
                    d @ '0'..='9' => {
                        let mut digits = 0usize;
                        let mut next = Some(d);
                        while let Some(d) = next.and_then(|c| c.to_digit(10)) {
                            digits = digits
                                .checked_mul(10)
                                .and_then(|n| n.checked_add(d as usize))
                                .ok_or(ParseFormatError::WidthOverflow)?;
                            next = chars.next_if(char::is_ascii_digit);
                        }
                        match chars.next() {
                            Some('f') => fmt.pieces.push(Piece::Fraction { digits }),
                            _ => return Err(ParseFormatError::UnknownSpecifier(d)),
                        }
                    }
                    other => return Err(ParseFormatError::UnknownSpecifier(other)),
                },
                '\\' => match chars.next().ok_or(ParseFormatError::DanglingBackslash)? {
                    'n' => fmt.push_char('\n'),
                    't' => fmt.push_char('\t'),
                    'e' => fmt.push_char('\x1b'),
                    '\\' => fmt.push_char('\\'),
                    other => return Err(ParseFormatError::UnknownEscape(other)),
                },
                c => fmt.push_char(c),
            }
        }

        Ok(fmt)
    }
}

impl Piece {
    fn render_into(&self, out: &mut String, d: Duration) {
        let secs = d.as_secs();
        // Writing to a String cannot fail.
        let _ = match self {
            Piece::Literal(s) => out.write_str(s),
            Piece::Hours => write!(out, "{:02}", secs / 3600),
            Piece::Minutes => write!(out, "{:02}", secs / 60 % 60),
            Piece::Seconds => write!(out, "{:02}", secs % 60),
            Piece::TotalSeconds => write!(out, "{secs}"),
            Piece::Fraction { digits } => {
                // Nanosecond precision, padded with zeros past 9 digits.
                // Truncated rather than rounded so no carry into seconds.
                let nanos = format!("{:09}", d.subsec_nanos());
                for i in 0..*digits {
                    out.push(nanos.as_bytes().get(i).map_or('0', |b| char::from(*b)));
                }
                Ok(())
            }
        };
    }
}
