use camino::Utf8PathBuf;

pub mod collections;
pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod reports;
pub mod tokenizer;
pub mod validator;
pub mod vocabulary;

pub use collections::{Set, Stack};
pub use error::{LoadError, ScanError, StackError};
pub use tokenizer::{TagScanner, TagToken};
pub use validator::{Validator, Verdict};
pub use vocabulary::{TagClass, Vocabulary};

pub type TResult<T> = anyhow::Result<T>;

pub type TPath = Utf8PathBuf;
