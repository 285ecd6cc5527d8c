use std::collections::VecDeque;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use super::filter::{is_index_file_name, source_stem, sub_folders, ts_files};
use super::stub::render_stub;
use super::writer::GeneratedFile;

/// Lazily yields `root`, then (when recursive) every valid subfolder,
/// depth-first in listing order. A folder is only listed once the consumer
/// reaches it. There is no cycle detection.
pub struct FolderWalk {
    stack: Vec<Utf8PathBuf>,
    recursive: bool,
}

impl FolderWalk {
    pub fn new(root: &Utf8Path, recursive: bool) -> Self {
        Self {
            stack: vec![root.to_owned()],
            recursive,
        }
    }
}

impl Iterator for FolderWalk {
    type Item = Utf8PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(folder) = self.stack.pop() {
            if !folder.exists() {
                info!("Nothing to do: {folder} does not exist");
                continue;
            }
            if self.recursive {
                let children = sub_folders(&folder);
                self.stack
                    .extend(children.iter().rev().map(|name| child_path(&folder, name)));
            }
            return Some(folder);
        }
        None
    }
}

/// Textual join, keeping whatever form the root was given in (`./`, `../`, ...).
pub(crate) fn child_path(folder: &Utf8Path, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{folder}/{name}"))
}

/// Replaces the first `/src` in the folder path with `/test`. The match is
/// textual, so `./srcs/src/a` becomes `./tests/src/a`.
pub fn test_folder_for(folder: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(folder.as_str().replacen("/src", "/test", 1))
}

/// Stubs for the source files directly inside `folder`.
pub fn folder_stubs(folder: &Utf8Path) -> Vec<GeneratedFile> {
    let test_folder = test_folder_for(folder);
    ts_files(folder)
        .into_iter()
        .filter(|name| !is_index_file_name(name))
        .map(|name| {
            let stem = source_stem(&name);
            let path = child_path(&test_folder, &format!("{stem}.test.js"));
            debug!("Planning {path} for {folder}/{name}");
            GeneratedFile {
                contents: render_stub(folder.as_str(), stem),
                path,
            }
        })
        .collect()
}

/// Lazy plan of every stub under `folder`. Nothing touches the disk except
/// directory listings.
pub struct StubPlan {
    folders: FolderWalk,
    pending: VecDeque<GeneratedFile>,
}

impl StubPlan {
    pub fn new(folder: &Utf8Path, recursive: bool) -> Self {
        Self {
            folders: FolderWalk::new(folder, recursive),
            pending: VecDeque::new(),
        }
    }
}

impl Iterator for StubPlan {
    type Item = GeneratedFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.pending.pop_front() {
                return Some(file);
            }
            let folder = self.folders.next()?;
            self.pending.extend(folder_stubs(&folder));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_first_src_segment() {
        assert_eq!(
            test_folder_for(Utf8Path::new("./project/src/feature")),
            Utf8PathBuf::from("./project/test/feature")
        );
    }

    #[test]
    fn substitution_is_textual_not_segment_aware() {
        // `srcs` is an unrelated folder, but it holds the first `/src`.
        assert_eq!(
            test_folder_for(Utf8Path::new("./srcs/src/a")),
            Utf8PathBuf::from("./tests/src/a")
        );
        // `resrc` has no leading slash before `src`, so the real segment wins.
        assert_eq!(
            test_folder_for(Utf8Path::new("./resrc/src/a")),
            Utf8PathBuf::from("./resrc/test/a")
        );
        // Only the first occurrence is replaced.
        assert_eq!(
            test_folder_for(Utf8Path::new("/repo/src/nested/src")),
            Utf8PathBuf::from("/repo/test/nested/src")
        );
    }

    #[test]
    fn path_without_src_keeps_its_folder() {
        assert_eq!(
            test_folder_for(Utf8Path::new("./lib/feature")),
            Utf8PathBuf::from("./lib/feature")
        );
    }

    #[test]
    fn missing_root_yields_nothing() {
        let root = Utf8Path::new("/definitely/missing/src");
        assert_eq!(FolderWalk::new(root, true).count(), 0);
        assert_eq!(StubPlan::new(root, true).count(), 0);
    }
}
