use crate::collections::Set;
use crate::error::LoadError;
use crate::fs::read_string;
use crate::{TPath, TResult};
use log::{debug, warn};

/// How a tag name is treated by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Opens a scope that must be closed again.
    Container,
    /// Complete on its own, a closing form is always an error.
    SelfClosing,
    Unknown,
}

const HTML5_TAGS: &[&str] = &[
    "a", "abbr", "address", "article", "aside", "audio", "b", "bdi", "bdo", "blockquote", "body",
    "button", "canvas", "caption", "cite", "code", "colgroup", "data", "datalist", "dd", "del",
    "details", "dfn", "dialog", "div", "dl", "dt", "em", "fieldset", "figcaption", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "html", "i",
    "iframe", "ins", "kbd", "label", "legend", "li", "main", "map", "mark", "menu", "meter", "nav",
    "noscript", "object", "ol", "optgroup", "option", "output", "p", "picture", "pre", "progress",
    "q", "rp", "rt", "ruby", "s", "samp", "script", "search", "section", "select", "slot", "small",
    "span", "strong", "style", "sub", "summary", "sup", "table", "tbody", "td", "template",
    "textarea", "tfoot", "th", "thead", "time", "title", "tr", "u", "ul", "var", "video",
];

const HTML5_VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// The two tag lists a document is checked against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    tags: Set<String>,
    self_closing: Set<String>,
}

impl Vocabulary {
    pub fn new(tags: Set<String>, self_closing: Set<String>) -> Self {
        let overlap = tags.intersection(&self_closing);
        if !overlap.is_empty() {
            warn!("tags listed as both regular and self-closing are treated as self-closing: {overlap}");
        }

        Vocabulary { tags, self_closing }
    }

    /// Builds a vocabulary from two newline-delimited lists. Lines are trimmed and
    /// blank lines ignored.
    pub fn from_lists(tags: &str, self_closing: &str) -> Self {
        Self::new(parse_list(tags), parse_list(self_closing))
    }

    pub fn load(tags: &TPath, self_closing: &TPath) -> TResult<Self> {
        let tags = read_list("tag", tags)?;
        let self_closing = read_list("self-closing tag", self_closing)?;
        Ok(Self::new(tags, self_closing))
    }

    /// Element names of the HTML living standard, with the void elements as the
    /// self-closing list.
    pub fn html5() -> Self {
        Self::new(
            HTML5_TAGS.iter().map(|t| (*t).to_string()).collect(),
            HTML5_VOID_TAGS.iter().map(|t| (*t).to_string()).collect(),
        )
    }

    /// Self-closing membership wins over regular membership.
    pub fn classify(&self, name: &str) -> TagClass {
        if self.is_self_closing(name) {
            TagClass::SelfClosing
        } else if self.is_known(name) {
            TagClass::Container
        } else {
            TagClass::Unknown
        }
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.tags.contains(name)
    }

    pub fn is_self_closing(&self, name: &str) -> bool {
        self.self_closing.contains(name)
    }

    pub fn tags(&self) -> &Set<String> {
        &self.tags
    }

    pub fn self_closing(&self) -> &Set<String> {
        &self.self_closing
    }
}

fn parse_list(content: &str) -> Set<String> {
    content.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect()
}

fn read_list(kind: &'static str, path: &TPath) -> TResult<Set<String>> {
    if !path.exists() {
        return Err(LoadError::VocabularyNotFound { kind, path: path.clone() }.into());
    }

    let list = parse_list(&read_string(path)?);
    debug!("loaded {} {kind} names from {path}", list.len());
    Ok(list)
}
