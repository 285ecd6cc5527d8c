use std::fs;
use std::io::{self, Write};

use camino::Utf8PathBuf;
use tracing::{debug, info};

use super::error::{RunAborted, ScaffoldError};

/// A file the planner wants on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: Utf8PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Skipped,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub created: Vec<Utf8PathBuf>,
    pub skipped: usize,
}

/// Writes `file` unless something already exists at its path. Existing files
/// are never compared, rewritten or removed.
pub fn write_if_absent(file: &GeneratedFile) -> Result<WriteOutcome, ScaffoldError> {
    if file.path.exists() {
        debug!("Keeping existing {}", file.path);
        return Ok(WriteOutcome::Skipped);
    }

    if let Some(parent) = file.path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ScaffoldError::CreateDir {
            path: parent.to_owned(),
            source,
        })?;
    }

    let mut handle = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&file.path)
    {
        Ok(handle) => handle,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            debug!("{} appeared before it could be written", file.path);
            return Ok(WriteOutcome::Skipped);
        }
        Err(source) => {
            return Err(ScaffoldError::Write {
                path: file.path.clone(),
                source,
            });
        }
    };

    handle
        .write_all(file.contents.as_bytes())
        .map_err(|source| ScaffoldError::Write {
            path: file.path.clone(),
            source,
        })?;

    info!("Created {}", file.path);
    Ok(WriteOutcome::Created)
}

/// Drains a plan through [`write_if_absent`], stopping at the first failure.
/// The error keeps the files created before it.
pub fn apply<I>(plan: I) -> Result<Summary, RunAborted>
where
    I: IntoIterator<Item = GeneratedFile>,
{
    let mut summary = Summary::default();
    for file in plan {
        match write_if_absent(&file) {
            Ok(WriteOutcome::Created) => summary.created.push(file.path),
            Ok(WriteOutcome::Skipped) => summary.skipped += 1,
            Err(source) => {
                return Err(RunAborted {
                    created: summary.created,
                    source,
                });
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn planned(root: &Utf8PathBuf, relative: &str, contents: &str) -> GeneratedFile {
        GeneratedFile {
            path: root.join(relative),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn creates_missing_parents_and_writes_contents() {
        let tmp = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let file = planned(&root, "test/a/b/widget.test.js", "body");

        assert_eq!(write_if_absent(&file).unwrap(), WriteOutcome::Created);
        assert_eq!(fs::read_to_string(&file.path).unwrap(), "body");
    }

    #[test]
    fn never_touches_an_existing_file() {
        let tmp = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let file = planned(&root, "widget.test.js", "generated");
        fs::write(&file.path, "hand edited").unwrap();

        assert_eq!(write_if_absent(&file).unwrap(), WriteOutcome::Skipped);
        assert_eq!(fs::read_to_string(&file.path).unwrap(), "hand edited");
    }

    #[test]
    fn blocked_parent_is_a_hard_error() {
        let tmp = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        fs::write(root.join("test"), "not a directory").unwrap();
        let file = planned(&root, "test/widget.test.js", "body");

        let err = write_if_absent(&file).unwrap_err();
        assert!(
            matches!(err, ScaffoldError::CreateDir { .. }),
            "expected CreateDir, got {err:?}"
        );
    }

    #[test]
    fn apply_counts_created_and_skipped() {
        let tmp = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        fs::write(root.join("old.txt"), "keep").unwrap();

        let summary = apply(vec![
            planned(&root, "old.txt", "new"),
            planned(&root, "new.txt", "new"),
        ])
        .unwrap();

        assert_eq!(summary.created, vec![root.join("new.txt")]);
        assert_eq!(summary.skipped, 1);
        assert_eq!(fs::read_to_string(root.join("old.txt")).unwrap(), "keep");
    }

    #[test]
    fn failed_apply_reports_files_already_written() {
        let tmp = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        fs::write(root.join("blocked"), "not a directory").unwrap();

        let err = apply(vec![
            planned(&root, "first.txt", "one"),
            planned(&root, "blocked/second.txt", "two"),
            planned(&root, "third.txt", "three"),
        ])
        .unwrap_err();

        assert_eq!(err.created, vec![root.join("first.txt")]);
        assert!(
            matches!(err.source, ScaffoldError::CreateDir { .. }),
            "expected CreateDir, got {:?}",
            err.source
        );
        assert!(!root.join("third.txt").exists());
    }
}
