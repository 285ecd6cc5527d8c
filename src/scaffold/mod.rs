pub mod barrel;
pub mod error;
pub mod filter;
pub mod stub;
pub mod walk;
pub mod writer;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

pub use error::{RunAborted, ScaffoldError};
pub use writer::{GeneratedFile, Summary, apply};

/// Everything a generation run needs. Built once from the command line.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub root_path: Utf8PathBuf,
    pub recursive: bool,
}

impl ScaffoldConfig {
    /// `{root}/src`, with doubled slashes collapsed.
    pub fn source_folder(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}/src", self.root_path).replace("//", "/"))
    }
}

pub fn plan_test_stubs(config: &ScaffoldConfig) -> walk::StubPlan {
    walk::StubPlan::new(&config.source_folder(), config.recursive)
}

pub fn plan_barrels(config: &ScaffoldConfig) -> impl Iterator<Item = GeneratedFile> + use<> {
    barrel::barrel_plan(&config.source_folder(), config.recursive)
}

/// Creates a `.test.js` stub under `test/` for every source file that lacks one.
pub fn generate_test_stubs(config: &ScaffoldConfig) -> Result<Summary, RunAborted> {
    let summary = apply(plan_test_stubs(config))?;
    log_summary("test stubs", &config.source_folder(), &summary);
    Ok(summary)
}

/// Creates an `index.ts` barrel in every visited folder that lacks one.
pub fn generate_barrels(config: &ScaffoldConfig) -> Result<Summary, RunAborted> {
    let summary = apply(plan_barrels(config))?;
    log_summary("barrels", &config.source_folder(), &summary);
    Ok(summary)
}

fn log_summary(kind: &str, folder: &Utf8Path, summary: &Summary) {
    info!(
        "{kind} under {folder}: {} created, {} already present",
        summary.created.len(),
        summary.skipped
    );
}
