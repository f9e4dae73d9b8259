//! Expansion of text input arguments for batch synthesis.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for input expansion.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0} is not a .txt file or directory")]
    NotText(PathBuf),
    #[error("{0} does not exist")]
    NotFound(PathBuf),
    #[error("error reading directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid pattern '{pattern}': {msg}")]
    Pattern { pattern: String, msg: String },
    #[error("no .txt files found in {0}")]
    Empty(String),
}

fn is_txt(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Expands files, directories and glob patterns into `.txt` paths.
///
/// Directory contents and pattern matches are sorted; argument order is
/// otherwise kept and duplicates are dropped.
pub fn expand_text_inputs<S: AsRef<str>>(args: &[S]) -> Result<Vec<PathBuf>, InputError> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for arg in args {
        let arg = arg.as_ref();
        for path in expand_one(arg)? {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    if out.is_empty() {
        let joined = args.iter().map(|a| a.as_ref()).collect::<Vec<_>>().join(", ");
        return Err(InputError::Empty(joined));
    }
    Ok(out)
}

fn expand_one(arg: &str) -> Result<Vec<PathBuf>, InputError> {
    let path = Path::new(arg);

    if path.is_dir() {
        return text_files_in(path);
    }
    if path.is_file() {
        if is_txt(path) {
            return Ok(vec![path.to_path_buf()]);
        }
        return Err(InputError::NotText(path.to_path_buf()));
    }
    if !is_pattern(arg) {
        return Err(InputError::NotFound(path.to_path_buf()));
    }

    let entries = glob::glob(arg).map_err(|e| InputError::Pattern {
        pattern: arg.to_string(),
        msg: e.msg.to_string(),
    })?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|p| p.is_file() && is_txt(p))
        .collect();
    matches.sort();
    tracing::debug!(pattern = arg, matches = matches.len(), "expanded glob");
    Ok(matches)
}

fn text_files_in(dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    let read_err = |source| InputError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_txt(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "text").unwrap();
        path
    }

    fn arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_single_file() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "test.txt");
        assert_eq!(expand_text_inputs(&[arg(&file)]).unwrap(), vec![file]);
    }

    #[test]
    fn test_directory_sorted() {
        let dir = TempDir::new().unwrap();
        let c = touch(dir.path(), "c.txt");
        let a = touch(dir.path(), "a.txt");
        let b = touch(dir.path(), "b.txt");
        touch(dir.path(), "skip.mp3");

        assert_eq!(expand_text_inputs(&[arg(dir.path())]).unwrap(), vec![a, b, c]);
    }

    #[test]
    fn test_rejects_non_txt_file() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "audio.mp3");
        assert!(matches!(
            expand_text_inputs(&[arg(&file)]),
            Err(InputError::NotText(_))
        ));
    }

    #[test]
    fn test_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(matches!(
            expand_text_inputs(&[arg(&missing)]),
            Err(InputError::NotFound(_))
        ));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            expand_text_inputs(&[arg(dir.path())]),
            Err(InputError::Empty(_))
        ));
    }

    #[test]
    fn test_glob_pattern() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "en_2.txt");
        let a = touch(dir.path(), "en_1.txt");
        touch(dir.path(), "fr_1.txt");
        touch(dir.path(), "en_3.wav");

        let pattern = arg(&dir.path().join("en_*"));
        assert_eq!(expand_text_inputs(&[pattern]).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_dedup_keeps_argument_order() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.txt");
        let b = touch(dir.path(), "b.txt");

        let args = [arg(&b), arg(dir.path()), arg(&a)];
        assert_eq!(expand_text_inputs(&args).unwrap(), vec![b, a]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            expand_text_inputs(&["[unclosed"]),
            Err(InputError::Pattern { .. })
        ));
    }
}
