use crate::collections::Stack;
use crate::error::{ScanError, StackError};
use crate::tokenizer::{TagScanner, TagToken};
use crate::vocabulary::{TagClass, Vocabulary};
use log::{debug, trace};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::ControlFlow;

pub const DEFAULT_DOCTYPE: &str = "<!DOCTYPE html>";

/// Outcome of checking one document. Line numbers are 1-based and the doctype
/// line is line 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every tag was balanced. `line` is the last line read.
    Valid { line: usize },
    MissingDoctype,
    /// An unknown tag, or a closing tag that does not match the innermost open one.
    InvalidTag { line: usize, tag: String },
    SelfClosingTagClosed { line: usize, tag: String },
    /// Input ended with `tag` still open. `line` is the last line read.
    UnclosedTag { line: usize, tag: String },
    UnterminatedTag { line: usize, column: usize },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }

    pub fn line(&self) -> usize {
        match self {
            Verdict::MissingDoctype => 1,
            Verdict::Valid { line }
            | Verdict::InvalidTag { line, .. }
            | Verdict::SelfClosingTagClosed { line, .. }
            | Verdict::UnclosedTag { line, .. }
            | Verdict::UnterminatedTag { line, .. } => *line,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Verdict::InvalidTag { tag, .. }
            | Verdict::SelfClosingTagClosed { tag, .. }
            | Verdict::UnclosedTag { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid { .. } => write!(f, "Compiled successfully: HTML file is valid!"),
            Verdict::MissingDoctype => write!(f, "Error: DOCTYPE must be in line 1"),
            Verdict::InvalidTag { line, tag } => {
                write!(f, "Error in line {line}: Invalid or missing tag with '{tag}'")
            }
            Verdict::SelfClosingTagClosed { line, tag } => {
                write!(f, "Error in line {line}: '{tag}' is a self-closing tag")
            }
            Verdict::UnclosedTag { line, tag } => {
                write!(f, "Error in line {line}: '{tag}' must have its closing tag")
            }
            Verdict::UnterminatedTag { line, column } => {
                write!(f, "Error in line {line}: {}", ScanError::UnterminatedTag { column: *column })
            }
        }
    }
}

/// Checks documents against a fixed [`Vocabulary`].
///
/// The validator itself holds no per-document state, so one instance can check
/// any number of documents, from several threads at once.
#[derive(Debug, Clone)]
pub struct Validator<'v> {
    vocabulary: &'v Vocabulary,
    doctype: Cow<'v, str>,
}

impl<'v> Validator<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary, doctype: Cow::Borrowed(DEFAULT_DOCTYPE) }
    }

    /// Replaces the literal the first line has to match.
    pub fn with_doctype(mut self, doctype: impl Into<Cow<'v, str>>) -> Self {
        self.doctype = doctype.into();
        self
    }

    pub fn doctype(&self) -> &str {
        &self.doctype
    }

    pub fn validate_str(&self, source: &str) -> Result<Verdict, StackError> {
        self.validate(source.lines())
    }

    /// Scans `lines` in order and stops at the first fault.
    ///
    /// Faults in the document are reported as a [`Verdict`]. An `Err` means the
    /// validator broke its own stack discipline.
    pub fn validate<I, S>(&self, lines: I) -> Result<Verdict, StackError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter();

        let has_doctype = lines.next().is_some_and(|first| first.as_ref() == self.doctype);
        if !has_doctype {
            debug!("first line is not `{}`", self.doctype);
            return Ok(Verdict::MissingDoctype);
        }

        let mut scan = Scan::new(self.vocabulary);
        for line in lines {
            if let ControlFlow::Break(verdict) = scan.scan_line(line.as_ref())? {
                debug!("stopped at line {}: {verdict:?}", scan.line);
                return Ok(verdict);
            }
        }

        let verdict = scan.finish()?;
        debug!("reached end of input: {verdict:?}");
        Ok(verdict)
    }
}

/// State of a single document check.
struct Scan<'v> {
    vocabulary: &'v Vocabulary,
    open: Stack<String>,
    line: usize,
}

impl<'v> Scan<'v> {
    fn new(vocabulary: &'v Vocabulary) -> Self {
        // the doctype line has already been consumed
        Self { vocabulary, open: Stack::new(), line: 1 }
    }

    fn scan_line(&mut self, text: &str) -> Result<ControlFlow<Verdict>, StackError> {
        self.line += 1;

        for token in TagScanner::new(text) {
            let token = match token {
                Ok(token) => token,
                Err(ScanError::UnterminatedTag { column }) => {
                    return Ok(ControlFlow::Break(Verdict::UnterminatedTag { line: self.line, column }));
                }
            };

            if let ControlFlow::Break(verdict) = self.token(token)? {
                return Ok(ControlFlow::Break(verdict));
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    fn token(&mut self, token: TagToken<'_>) -> Result<ControlFlow<Verdict>, StackError> {
        let class = self.vocabulary.classify(token.name);
        trace!("line {}: {token} is {class:?}", self.line);

        let verdict = match (token.is_closing, class) {
            (false, TagClass::Container) => {
                self.open.push(token.name.to_string());
                return Ok(ControlFlow::Continue(()));
            }
            (false, TagClass::SelfClosing) => return Ok(ControlFlow::Continue(())),
            (true, TagClass::Container) => {
                if self.open.top().is_ok_and(|top| top == token.name) {
                    self.open.pop()?;
                    return Ok(ControlFlow::Continue(()));
                }
                Verdict::InvalidTag { line: self.line, tag: token.name.to_string() }
            }
            (true, TagClass::SelfClosing) => {
                Verdict::SelfClosingTagClosed { line: self.line, tag: token.name.to_string() }
            }
            (_, TagClass::Unknown) => {
                Verdict::InvalidTag { line: self.line, tag: token.name.to_string() }
            }
        };

        Ok(ControlFlow::Break(verdict))
    }

    fn finish(self) -> Result<Verdict, StackError> {
        if self.open.is_empty() {
            return Ok(Verdict::Valid { line: self.line });
        }

        Ok(Verdict::UnclosedTag { line: self.line, tag: self.open.top()?.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_lists("html\nhead\nbody\np\ndiv", "br\nimg")
    }

    fn check(source: &str) -> Verdict {
        Validator::new(&vocabulary()).validate_str(source).unwrap()
    }

    #[test]
    fn empty_document_has_no_doctype() {
        assert_eq!(check(""), Verdict::MissingDoctype);
    }

    #[test]
    fn doctype_must_match_exactly() {
        assert_eq!(check("<!doctype html>\n<html></html>"), Verdict::MissingDoctype);
        assert_eq!(check(" <!DOCTYPE html>"), Verdict::MissingDoctype);
        assert_eq!(check("<!DOCTYPE html>\r\n<html></html>\r\n"), Verdict::Valid { line: 2 });
    }

    #[test]
    fn doctype_only_document_is_valid() {
        assert_eq!(check("<!DOCTYPE html>"), Verdict::Valid { line: 1 });
    }

    #[test]
    fn custom_doctype() {
        let vocab = vocabulary();
        let validator = Validator::new(&vocab).with_doctype("<!DOCTYPE html5>".to_string());
        assert_eq!(validator.doctype(), "<!DOCTYPE html5>");
        assert_eq!(validator.validate_str("<!DOCTYPE html5>\n<p></p>").unwrap(), Verdict::Valid { line: 2 });
        assert_eq!(validator.validate_str("<!DOCTYPE html>\n<p></p>").unwrap(), Verdict::MissingDoctype);
    }

    #[test]
    fn closing_tag_on_empty_stack_is_a_mismatch() {
        assert_eq!(
            check("<!DOCTYPE html>\n</p>"),
            Verdict::InvalidTag { line: 2, tag: "p".to_string() }
        );
    }

    #[test]
    fn self_closing_tags_need_no_close() {
        assert_eq!(check("<!DOCTYPE html>\n<p>a<br>b<img src=\"x\"></p>"), Verdict::Valid { line: 2 });
    }

    #[test]
    fn nesting_spans_lines() {
        let source = "<!DOCTYPE html>\n<html>\n  <body>\n    <p>text</p>\n  </body>\n</html>\n";
        assert_eq!(check(source), Verdict::Valid { line: 6 });
    }

    #[test]
    fn unclosed_reports_innermost_tag_at_last_line() {
        let source = "<!DOCTYPE html>\n<html>\n<body>\n<div>\n\n";
        assert_eq!(check(source), Verdict::UnclosedTag { line: 5, tag: "div".to_string() });
    }

    #[test]
    fn scanning_halts_at_first_fault() {
        let source = "<!DOCTYPE html>\n<html>\n<foo>\n</br>\n";
        assert_eq!(check(source), Verdict::InvalidTag { line: 3, tag: "foo".to_string() });
    }

    #[test]
    fn unterminated_tag_is_fatal() {
        let source = "<!DOCTYPE html>\n<html>\n<p>text <b\n</html>";
        assert_eq!(check(source), Verdict::UnterminatedTag { line: 3, column: 9 });
    }

    #[test]
    fn doctype_repeated_later_is_unknown() {
        assert_eq!(
            check("<!DOCTYPE html>\n<!DOCTYPE html>"),
            Verdict::InvalidTag { line: 2, tag: "!DOCTYPE".to_string() }
        );
    }

    #[test]
    fn validator_can_be_reused() {
        let vocab = vocabulary();
        let validator = Validator::new(&vocab);
        assert!(!validator.validate_str("<!DOCTYPE html>\n<html>").unwrap().is_valid());
        assert!(validator.validate_str("<!DOCTYPE html>\n<html></html>").unwrap().is_valid());
    }

    #[test]
    fn verdict_accessors() {
        let verdict = Verdict::UnclosedTag { line: 4, tag: "body".to_string() };
        assert_eq!(verdict.line(), 4);
        assert_eq!(verdict.tag(), Some("body"));
        assert_eq!(Verdict::MissingDoctype.line(), 1);
        assert_eq!(Verdict::Valid { line: 9 }.tag(), None);
    }

    #[test]
    fn verdict_messages() {
        assert_eq!(Verdict::Valid { line: 3 }.to_string(), "Compiled successfully: HTML file is valid!");
        assert_eq!(Verdict::MissingDoctype.to_string(), "Error: DOCTYPE must be in line 1");
        assert_eq!(
            Verdict::InvalidTag { line: 2, tag: "foo".to_string() }.to_string(),
            "Error in line 2: Invalid or missing tag with 'foo'"
        );
        assert_eq!(
            Verdict::SelfClosingTagClosed { line: 5, tag: "br".to_string() }.to_string(),
            "Error in line 5: 'br' is a self-closing tag"
        );
        assert_eq!(
            Verdict::UnclosedTag { line: 2, tag: "body".to_string() }.to_string(),
            "Error in line 2: 'body' must have its closing tag"
        );
        assert_eq!(
            Verdict::UnterminatedTag { line: 7, column: 3 }.to_string(),
            "Error in line 7: unterminated tag starting at column 3"
        );
    }
}
