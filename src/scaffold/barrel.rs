use camino::Utf8Path;

use super::filter::{is_index_file_name, source_stem, sub_folders, ts_files};
use super::walk::{FolderWalk, child_path};
use super::writer::GeneratedFile;

pub const BARREL_FILE: &str = "index.ts";

/// Names a folder import resolves to.
const INDEX_FILES: &[&str] = &["index.ts", "index.mts", "index.cts"];

/// `export * from` lines for the given modules, newline terminated.
pub fn render_barrel(modules: &[String]) -> String {
    modules
        .iter()
        .map(|module| format!("export * from \"./{module}\";\n"))
        .collect()
}

/// The barrel for one folder: its source files, then its subfolders when
/// those get barrels of their own. `None` when there is nothing to export.
pub fn folder_barrel(folder: &Utf8Path, include_sub_folders: bool) -> Option<GeneratedFile> {
    let mut modules: Vec<String> = ts_files(folder)
        .iter()
        .filter(|name| !is_index_file_name(name))
        .map(|name| source_stem(name).to_string())
        .collect();
    if include_sub_folders {
        modules.extend(
            sub_folders(folder)
                .into_iter()
                .filter(|name| will_have_barrel(&child_path(folder, name))),
        );
    }

    if modules.is_empty() {
        return None;
    }

    Some(GeneratedFile {
        path: child_path(folder, BARREL_FILE),
        contents: render_barrel(&modules),
    })
}

/// True when `./<folder>` resolves after a recursive run: it already holds an
/// index file, or it has source files or exportable subfolders of its own.
fn will_have_barrel(folder: &Utf8Path) -> bool {
    INDEX_FILES
        .iter()
        .any(|name| child_path(folder, name).is_file())
        || !ts_files(folder).is_empty()
        || sub_folders(folder)
            .iter()
            .any(|name| will_have_barrel(&child_path(folder, name)))
}

/// Lazy plan of barrels for `folder` and, when recursive, every valid subfolder.
pub fn barrel_plan(
    folder: &Utf8Path,
    recursive: bool,
) -> impl Iterator<Item = GeneratedFile> + use<> {
    FolderWalk::new(folder, recursive).filter_map(move |dir| folder_barrel(&dir, recursive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_export_per_module() {
        let out = render_barrel(&["widget".to_string(), "feature".to_string()]);
        assert_eq!(
            out,
            "export * from \"./widget\";\nexport * from \"./feature\";\n"
        );
    }

    #[test]
    fn missing_folder_has_no_barrel() {
        assert!(folder_barrel(Utf8Path::new("/definitely/missing/src"), true).is_none());
    }
}
