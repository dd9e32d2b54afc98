use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Why a property path failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// The path text is empty.
    #[error("the path is empty")]
    Empty,
    /// A segment has no name, e.g. `a..b` or `[0]`.
    #[error("empty segment name")]
    EmptyName,
    /// A `[` or `(` has no matching close.
    #[error("unclosed `{0}`")]
    Unclosed(char),
    /// The text between `[` and `]` is not a non-negative integer.
    #[error("invalid index `{0}`")]
    InvalidIndex(Box<str>),
    /// A character that cannot appear at this position.
    #[error("unexpected `{0}`")]
    Unexpected(char),
    /// Something other than `.` follows a closing bracket.
    #[error("trailing input after `{0}`")]
    TrailingInput(char),
    /// The path parsed, but is not the shape the caller asked for.
    #[error("expected a {0} property")]
    WrongShape(&'static str),
}

/// A property path that violates the path grammar.
///
/// `offset` is the byte position in `path` where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed property path `{path}` at offset {offset}: {reason}")]
pub struct MalformedPathError {
    /// The rejected path text.
    pub path: Box<str>,
    /// Byte offset of the failure.
    pub offset: usize,
    /// What went wrong.
    pub reason: MalformedReason,
}

impl MalformedPathError {
    #[inline]
    pub(crate) fn new(path: &str, offset: usize, reason: MalformedReason) -> Self {
        Self {
            path: path.into(),
            offset,
            reason,
        }
    }
}

// -----------------------------------------------------------------------------
// Segment

/// One step of a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A named member, `name`.
    Simple {
        /// Member name.
        name: Box<str>,
    },
    /// An element of a sequence member, `name[index]`.
    Indexed {
        /// Member name.
        name: Box<str>,
        /// Element position.
        index: usize,
    },
    /// An entry of a map member, `name(key)`.
    Mapped {
        /// Member name.
        name: Box<str>,
        /// Entry key.
        key: Box<str>,
    },
}

impl Segment {
    /// Returns the member name of the segment.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple { name } | Self::Indexed { name, .. } | Self::Mapped { name, .. } => name,
        }
    }

    /// Returns a short name of the segment kind.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Simple { .. } => "simple",
            Self::Indexed { .. } => "indexed",
            Self::Mapped { .. } => "mapped",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { name } => f.write_str(name),
            Self::Indexed { name, index } => write!(f, "{name}[{index}]"),
            Self::Mapped { name, key } => write!(f, "{name}({key})"),
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyPath

/// A parsed property path.
///
/// # Grammar
///
/// ```text
/// path    = segment ('.' segment)*
/// segment = name ('[' index ']' | '(' key ')')?
/// ```
///
/// - `name` is non-empty and contains none of `.[]()`.
/// - `index` is a decimal non-negative integer.
/// - `key` is any text without `)`, possibly empty.
///
/// Whitespace is kept as is.
///
/// # Examples
///
/// ```
/// use bp_reflect::access::{PropertyPath, Segment};
///
/// let path = PropertyPath::parse("orders[2].notes(en).text").unwrap();
///
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.segments()[0], Segment::Indexed { name: "orders".into(), index: 2 });
/// assert_eq!(path.to_string(), "orders[2].notes(en).text");
///
/// assert!(PropertyPath::parse("orders[two]").is_err());
/// assert!(PropertyPath::parse("orders[2").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Box<[Segment]>,
}

impl PropertyPath {
    /// Parses a property path.
    pub fn parse(text: &str) -> Result<Self, MalformedPathError> {
        Parser::new(text).parse().map(|segments| Self {
            segments: segments.into_boxed_slice(),
        })
    }

    /// Returns the segments in source order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments, at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has more than one segment.
    #[inline]
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Renders the first `len` segments in canonical form.
    pub fn prefix(&self, len: usize) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().take(len).enumerate() {
            if i > 0 {
                out.push('.');
            }
            // Writing into a `String` cannot fail.
            let _ = fmt::Write::write_fmt(&mut out, format_args!("{segment}"));
        }
        out
    }

    pub(crate) fn into_segments(self) -> Box<[Segment]> {
        self.segments
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(segment, f)?;
        }
        Ok(())
    }
}

impl FromStr for PropertyPath {
    type Err = MalformedPathError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// -----------------------------------------------------------------------------
// Parser

struct Parser<'a> {
    path: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    #[inline]
    fn new(path: &'a str) -> Self {
        Self { path, pos: 0 }
    }

    #[inline]
    fn error(&self, offset: usize, reason: MalformedReason) -> MalformedPathError {
        MalformedPathError::new(self.path, offset, reason)
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.path[self.pos..].chars().next()
    }

    fn parse(mut self) -> Result<Vec<Segment>, MalformedPathError> {
        if self.path.is_empty() {
            return Err(self.error(0, MalformedReason::Empty));
        }

        let mut segments = Vec::new();
        loop {
            segments.push(self.segment()?);
            match self.peek() {
                None => return Ok(segments),
                // `segment` only stops at `.` or the end after a bracket check.
                Some(_) => self.pos += 1,
            }
        }
    }

    fn segment(&mut self) -> Result<Segment, MalformedPathError> {
        let start = self.pos;
        let rest = &self.path[start..];
        let len = rest.find(['.', '[', ']', '(', ')']).unwrap_or(rest.len());
        self.pos += len;

        if len == 0 {
            return Err(match self.peek() {
                Some(c @ (']' | ')')) => self.error(start, MalformedReason::Unexpected(c)),
                _ => self.error(start, MalformedReason::EmptyName),
            });
        }
        let name: Box<str> = rest[..len].into();

        let segment = match self.peek() {
            None | Some('.') => return Ok(Segment::Simple { name }),
            Some('[') => {
                let body = self.bracket('[', ']')?;
                let index = parse_index(body)
                    .ok_or_else(|| self.error(start + len + 1, MalformedReason::InvalidIndex(body.into())))?;
                Segment::Indexed { name, index }
            }
            Some('(') => {
                let key = self.bracket('(', ')')?;
                Segment::Mapped {
                    name,
                    key: key.into(),
                }
            }
            Some(c) => return Err(self.error(self.pos, MalformedReason::Unexpected(c))),
        };

        match self.peek() {
            None | Some('.') => Ok(segment),
            Some(_) => {
                let close = if matches!(segment, Segment::Indexed { .. }) { ']' } else { ')' };
                Err(self.error(self.pos, MalformedReason::TrailingInput(close)))
            }
        }
    }

    // Consumes `open body close`, returning `body`.
    fn bracket(&mut self, open: char, close: char) -> Result<&'a str, MalformedPathError> {
        let open_at = self.pos;
        let body_start = open_at + open.len_utf8();
        match self.path[body_start..].find(close) {
            Some(len) => {
                self.pos = body_start + len + close.len_utf8();
                Ok(&self.path[body_start..body_start + len])
            }
            None => Err(self.error(open_at, MalformedReason::Unclosed(open))),
        }
    }
}

fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{MalformedReason, PropertyPath, Segment};
    use alloc::string::ToString;

    fn reason(text: &str) -> MalformedReason {
        PropertyPath::parse(text).unwrap_err().reason
    }

    #[test]
    fn parse_all_segment_kinds() {
        let path = PropertyPath::parse("a.b[12].c(k.e y).d").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Simple { name: "a".into() },
                Segment::Indexed { name: "b".into(), index: 12 },
                Segment::Mapped { name: "c".into(), key: "k.e y".into() },
                Segment::Simple { name: "d".into() },
            ]
        );
        assert!(path.is_nested());
        assert_eq!(path.prefix(2), "a.b[12]");
    }

    #[test]
    fn display_is_canonical() {
        for text in ["a", "a[0]", "m()", "a.b(x).c[3]"] {
            assert_eq!(PropertyPath::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn reject_malformed_paths() {
        assert_eq!(reason(""), MalformedReason::Empty);
        assert_eq!(reason("a..b"), MalformedReason::EmptyName);
        assert_eq!(reason("a."), MalformedReason::EmptyName);
        assert_eq!(reason(".a"), MalformedReason::EmptyName);
        assert_eq!(reason("[0]"), MalformedReason::EmptyName);
        assert_eq!(reason("a[1"), MalformedReason::Unclosed('['));
        assert_eq!(reason("a(k"), MalformedReason::Unclosed('('));
        assert_eq!(reason("a]"), MalformedReason::Unexpected(']'));
        assert_eq!(reason("a[x]"), MalformedReason::InvalidIndex("x".into()));
        assert_eq!(reason("a[-1]"), MalformedReason::InvalidIndex("-1".into()));
        assert_eq!(reason("a[+1]"), MalformedReason::InvalidIndex("+1".into()));
        assert_eq!(reason("a[]"), MalformedReason::InvalidIndex("".into()));
        assert_eq!(reason("a[1]b"), MalformedReason::TrailingInput(']'));
        assert_eq!(reason("a(k)[0]"), MalformedReason::TrailingInput(')'));
    }

    #[test]
    fn index_overflow_is_malformed() {
        let err = PropertyPath::parse("a[99999999999999999999999]").unwrap_err();
        assert!(matches!(err.reason, MalformedReason::InvalidIndex(_)));
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn whitespace_is_kept() {
        let path = PropertyPath::parse(" a ").unwrap();
        assert_eq!(path.segments()[0].name(), " a ");
    }
}
