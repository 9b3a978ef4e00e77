use crate::fs::{read_string, resolve_against, walk_for_file};
use crate::validator::DEFAULT_DOCTYPE;
use crate::{TPath, TResult};
use anyhow::Context as _;
use camino::Utf8Path;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub document: DocumentConfig,
}

/// Locations of the two tag lists. Leaving both unset selects the built-in HTML5 lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub tags: Option<TPath>,
    pub self_closing: Option<TPath>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub doctype: String,
    /// Checked when no document is named on the command line.
    pub default: TPath,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self { doctype: DEFAULT_DOCTYPE.to_string(), default: TPath::from("index.html") }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "tagstack.toml";

    /// Uses the nearest `tagstack.toml` in `cwd` or its parents, or the defaults
    /// (resolved against `cwd`) when there is none.
    pub fn find_recursively(cwd: &Utf8Path) -> TResult<Self> {
        match walk_for_file(cwd, Self::FILE_NAME) {
            Some(file) => Self::from_file(&file),
            None => {
                debug!("no {} found in {cwd} or any of its parents, using defaults", Self::FILE_NAME);
                Ok(Config::default().fill_defaults(cwd))
            }
        }
    }

    pub fn from_file(path: &Utf8Path) -> TResult<Self> {
        let content = read_string(path)?;
        let config = Self::parse(&content).with_context(|| format!("invalid config file {path}"))?;
        debug!("loaded config from {path}");

        let base = path.parent().unwrap_or(Utf8Path::new("."));
        Ok(config.fill_defaults(base))
    }

    pub fn parse(content: &str) -> TResult<Self> {
        Ok(toml::from_str::<Config>(content)?)
    }

    /// Makes every configured path absolute relative to `base`.
    fn fill_defaults(mut self, base: &Utf8Path) -> Self {
        for path in [&mut self.vocabulary.tags, &mut self.vocabulary.self_closing].into_iter().flatten() {
            *path = resolve_against(base, path);
        }
        self.document.default = resolve_against(base, &self.document.default);
        self
    }
}
