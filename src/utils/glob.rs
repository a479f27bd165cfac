//! Recursive glob expansion over the filesystem

use globset::GlobBuilder;
use std::path::PathBuf;
use walkdir::WalkDir;

use super::paths::normalize_path;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

pub fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}

/// Expand `pattern` against the filesystem.
///
/// `*` stays within one path segment while `**` spans directories. Hidden
/// entries below the literal prefix of the pattern are never matched, even
/// when a later segment names them. Without `**` the walk only descends as
/// many levels as the pattern has segments. A pattern without wildcards
/// yields itself when the path exists. Results are sorted.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, globset::Error> {
    let pattern = normalize_path(pattern);
    if !has_glob_meta(&pattern) {
        let path = PathBuf::from(&pattern);
        return Ok(if path.exists() { vec![path] } else { Vec::new() });
    }

    let matcher = GlobBuilder::new(&pattern).literal_separator(true).build()?.compile_matcher();
    let mut matches: Vec<PathBuf> = candidates(&pattern)
        .filter(|candidate| matcher.is_match(candidate))
        .map(PathBuf::from)
        .collect();

    matches.sort();
    Ok(matches)
}

/// Every path the walk for `pattern` visits, normalized, before matching.
fn candidates(pattern: &str) -> impl Iterator<Item = String> {
    let (base, depth) = walk_scope(pattern);
    let strip_dot = base.as_os_str().is_empty();
    let walk_root = if strip_dot { PathBuf::from(".") } else { base };

    let mut walker = WalkDir::new(walk_root).follow_links(false);
    if let Some(depth) = depth {
        walker = walker.max_depth(depth);
    }

    walker
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_name().to_str().map(|n| n.starts_with('.')).unwrap_or(false)
        })
        .flatten()
        .filter(|entry| entry.depth() > 0)
        .map(move |entry| {
            let path = entry.path();
            let path = if strip_dot { path.strip_prefix(".").unwrap_or(path) } else { path };
            normalize_path(&path.to_string_lossy())
        })
}

/// Where to start walking for `pattern` and how deep to go.
///
/// The depth is `None` when a segment after the literal prefix may span
/// directories (`**`, or braces that could hold a separator).
fn walk_scope(pattern: &str) -> (PathBuf, Option<usize>) {
    let segments: Vec<&str> = pattern.split('/').collect();
    let literal = segments[..segments.len() - 1]
        .iter()
        .take_while(|segment| !has_glob_meta(segment))
        .count();

    let prefix = segments[..literal].join("/");
    let base = if prefix.is_empty() && pattern.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::from(prefix)
    };

    let rest = &segments[literal..];
    let unbounded = rest.iter().any(|segment| segment.contains("**") || segment.contains('{'));
    (base, (!unbounded).then_some(rest.len()))
}
