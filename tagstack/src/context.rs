use crate::config::Config;
use crate::error::LoadError;
use crate::fs::{read_lossy, resolve_against};
use crate::reports::ReportsBag;
use crate::validator::{Validator, Verdict};
use crate::vocabulary::Vocabulary;
use crate::{TPath, TResult};
use anyhow::bail;
use camino::Utf8Path;
use log::debug;

#[derive(Debug)]
pub struct Context {
    config: Config,
    cwd: TPath,
}

/// A checked document together with the text it was checked from.
#[derive(Debug, Clone)]
pub struct Checked {
    pub path: TPath,
    pub source: String,
    pub verdict: Verdict,
}

impl Checked {
    /// Prints the source excerpt for a failed verdict to stderr.
    pub fn explain(&self, color: bool) -> TResult<()> {
        let mut bag = ReportsBag::new(&self.path, &self.source, color);
        bag.add_verdict(&self.verdict);
        bag.print()
    }
}

impl Context {
    pub fn new(cwd: &Utf8Path) -> TResult<Self> {
        Ok(Context { config: Config::find_recursively(cwd)?, cwd: cwd.to_path_buf() })
    }

    pub fn with_config(cwd: &Utf8Path, config: Config) -> Self {
        Context { config, cwd: cwd.to_path_buf() }
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn default_document(&self) -> &TPath {
        &self.config.document.default
    }

    /// Resolves a path given on the command line against the working directory.
    pub fn resolve(&self, path: &Utf8Path) -> TPath {
        resolve_against(&self.cwd, path)
    }

    /// Loads the configured lists, or the HTML5 defaults when none are configured.
    pub fn vocabulary(&self) -> TResult<Vocabulary> {
        match (&self.config.vocabulary.tags, &self.config.vocabulary.self_closing) {
            (Some(tags), Some(self_closing)) => Vocabulary::load(tags, self_closing),
            (None, None) => {
                debug!("no tag lists configured, using the built-in HTML5 lists");
                Ok(Vocabulary::html5())
            }
            _ => bail!("the tag list and the self-closing tag list have to be configured together"),
        }
    }

    /// Reads `path` and validates it against `vocabulary`.
    ///
    /// A missing document is an error and the validator is never run for it.
    pub fn check_file(&self, vocabulary: &Vocabulary, path: &Utf8Path) -> TResult<Checked> {
        if !path.is_file() {
            return Err(LoadError::DocumentNotFound(path.to_path_buf()).into());
        }

        let source = read_lossy(path)?;
        let verdict = Validator::new(vocabulary)
            .with_doctype(self.config.document.doctype.as_str())
            .validate_str(&source)?;
        debug!("{path}: {verdict:?}");

        Ok(Checked { path: path.to_path_buf(), source, verdict })
    }
}
