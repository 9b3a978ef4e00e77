use crate::error::ScanError;
use std::fmt::{self, Display, Formatter};

/// A tag found on a line, reduced to its bare name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagToken<'a> {
    pub name: &'a str,
    pub is_closing: bool,
    /// 1-based byte column of the opening `<`.
    pub column: usize,
}

impl Display for TagToken<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_closing { write!(f, "</{}>", self.name) } else { write!(f, "<{}>", self.name) }
    }
}

/// Lazily yields the tags of a single line from left to right.
///
/// A tag name runs from just after `<` (or `</`) up to the first `>` or space.
/// Whatever follows a space is an attribute list and is skipped up to the next
/// `>`, or to the end of the line if the list continues on the next one.
/// Running out of line while still reading a name yields
/// [`ScanError::UnterminatedTag`], after which the scanner is exhausted.
#[derive(Debug, Clone)]
pub struct TagScanner<'a> {
    line: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> TagScanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0, finished: false }
    }

    fn skip_attributes(&self, from: usize) -> usize {
        match self.line[from..].find('>') {
            Some(offset) => from + offset + 1,
            None => self.line.len(),
        }
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Result<TagToken<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(offset) = self.line[self.pos..].find('<') else {
            self.finished = true;
            return None;
        };
        let open = self.pos + offset;

        let is_closing = self.line.as_bytes().get(open + 1) == Some(&b'/');
        let name_start = if is_closing { open + 2 } else { open + 1 };
        let column = open + 1;

        // `get` keeps a trailing bare `<` from slicing past the end
        let Some(end) = self
            .line
            .get(name_start..)
            .and_then(|rest| rest.find(['>', ' ']))
            .map(|offset| name_start + offset)
        else {
            self.finished = true;
            return Some(Err(ScanError::UnterminatedTag { column }));
        };

        self.pos = if self.line.as_bytes()[end] == b'>' { end + 1 } else { self.skip_attributes(end) };

        Some(Ok(TagToken { name: &self.line[name_start..end], is_closing, column }))
    }
}
