//! Path resolution helpers
//!
//! Resolution is purely lexical: symlinks are not followed and the path does
//! not need to exist.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the root of an absolute path is dropped; leading `..` components
/// of a relative path are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve `path` against the process working directory and normalize it.
pub fn absolutize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        return normalize_lexically(path);
    }

    match std::env::current_dir() {
        Ok(cwd) => normalize_lexically(&cwd.join(path)),
        Err(e) => {
            tracing::warn!("Cannot read working directory, keeping relative path: {}", e);
            normalize_lexically(path)
        }
    }
}

/// Anchor a watch pattern under `base_dir` and return it as an absolute glob.
///
/// A leading separator on the pattern does not escape the base directory:
/// `/css/*.css` under `/srv/site` becomes `/srv/site/css/*.css`.
pub fn join_glob(base_dir: &Path, pattern: &str) -> String {
    let relative = pattern.trim_start_matches(['/', '\\']);
    absolutize(base_dir.join(relative))
        .to_string_lossy()
        .into_owned()
}
