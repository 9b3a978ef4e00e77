use crate::{TPath, TResult};
use anyhow::anyhow;
use camino::Utf8Path;
use fs_err::{read, read_to_string};
use std::path::PathBuf;

/// Looks for `file_name` in `dir` and then in each of its parents.
pub fn walk_for_file(dir: &Utf8Path, file_name: &str) -> Option<TPath> {
    let mut dir = dir.to_path_buf();
    loop {
        let file_path = dir.join(file_name);
        if file_path.is_file() {
            return Some(file_path);
        }

        if !dir.pop() {
            break;
        }
    }

    None
}

/// Convert PathBuf to Utf8PathBuf
pub fn to_tpath(path_buf: PathBuf) -> TResult<TPath> {
    TPath::from_path_buf(path_buf).map_err(|path| anyhow!("Path is not valid utf8: {}", path.display()))
}

pub fn read_string(path: &Utf8Path) -> TResult<String> {
    read_to_string(path.as_std_path()).map_err(|err| anyhow!(err))
}

/// Reads `path` as text, replacing invalid UTF-8 sequences with U+FFFD.
/// Tag names are ASCII, so documents in legacy encodings still scan correctly.
pub fn read_lossy(path: &Utf8Path) -> TResult<String> {
    let bytes = read(path.as_std_path()).map_err(|err| anyhow!(err))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Joins `path` onto `base` unless it is already absolute.
pub fn resolve_against(base: &Utf8Path, path: &Utf8Path) -> TPath {
    if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}
