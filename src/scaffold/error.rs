use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures that abort a generation run. Read-side problems never surface here;
/// unreadable entries are skipped by the filter instead.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("failed to create directory {path}")]
    CreateDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A write failure partway through a run. `created` lists what the run had
/// already written, since those files stay on disk.
#[derive(Error, Debug)]
#[error("stopped after creating {} file(s)", .created.len())]
pub struct RunAborted {
    pub created: Vec<Utf8PathBuf>,
    #[source]
    pub source: ScaffoldError,
}
