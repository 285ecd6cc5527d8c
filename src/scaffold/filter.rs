use std::fs;

use camino::Utf8Path;
use ignore::WalkBuilder;
use tracing::debug;

const SOURCE_EXTENSIONS: &[&str] = &[".ts", ".mts", ".cts"];

/// Last `/`-separated segment of a path string. Trailing slashes yield "".
pub(crate) fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub(crate) fn is_valid_dir_name(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c.is_ascii_alphanumeric() || c == '_')
        .unwrap_or(false)
}

pub(crate) fn is_source_file_name(name: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Barrel files never get stubs. Matches on suffix, so `reindex.ts` counts too.
pub(crate) fn is_index_file_name(name: &str) -> bool {
    SOURCE_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!("index{ext}")))
}

/// `widget.mts` -> `widget`. Names without a source extension come back unchanged.
pub(crate) fn source_stem(name: &str) -> &str {
    SOURCE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

pub fn is_valid_directory(path: &Utf8Path) -> bool {
    if !is_valid_dir_name(base_name(path.as_str())) {
        return false;
    }
    match fs::metadata(path) {
        Ok(meta) => meta.is_dir(),
        Err(err) => {
            debug!("Skipping directory {path}: {err}");
            false
        }
    }
}

pub fn is_valid_file(path: &Utf8Path) -> bool {
    let name = base_name(path.as_str());
    if !is_source_file_name(name) || is_index_file_name(name) {
        return false;
    }
    match fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(err) => {
            debug!("Skipping file {path}: {err}");
            false
        }
    }
}

/// Names of the immediate children of `path` that are valid source folders.
pub fn sub_folders(path: &Utf8Path) -> Vec<String> {
    children_matching(path, is_valid_directory)
}

/// Names of the immediate children of `path` that are valid source files.
pub fn ts_files(path: &Utf8Path) -> Vec<String> {
    children_matching(path, is_valid_file)
}

fn children_matching(path: &Utf8Path, keep: fn(&Utf8Path) -> bool) -> Vec<String> {
    if !is_valid_directory(path) {
        return Vec::new();
    }

    let mut names = Vec::new();
    for entry in WalkBuilder::new(path)
        .standard_filters(false)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!("Skipping entry under {path}: {err}");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 entry: {}", entry.path().display());
            continue;
        };
        // Joined textually so later `/src` substitution sees the same string form.
        let child = format!("{path}/{name}");
        if keep(Utf8Path::new(&child)) {
            names.push(name.to_string());
        }
    }
    names
}
