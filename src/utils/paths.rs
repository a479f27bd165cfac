//! Path normalization and filename conversion

use crate::domain::Filename;
use std::path::{Component, Path, PathBuf};

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Make `path` absolute against the current directory.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return clean_path(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => clean_path(&cwd.join(path)),
        Err(_) => clean_path(path),
    }
}

/// Build the [`Filename`] record for a path reported by a toolchain.
///
/// `used` is kept verbatim; `absolute` resolves it against `working_dir`;
/// `relative` is taken from the current directory and `short` from
/// `working_dir`, each falling back to the absolute form.
pub fn convert_filename(used: &str, working_dir: &Path) -> Filename {
    let working_dir = absolutize(working_dir);
    let used_path = Path::new(used);
    let absolute = if used_path.is_absolute() {
        clean_path(used_path)
    } else {
        clean_path(&working_dir.join(used_path))
    };

    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| absolute.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| absolute.clone());
    let short = absolute
        .strip_prefix(&working_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| relative.clone());

    Filename {
        absolute: normalize_path(&absolute.to_string_lossy()),
        relative: normalize_path(&relative.to_string_lossy()),
        short: normalize_path(&short.to_string_lossy()),
        used: normalize_path(used),
    }
}
