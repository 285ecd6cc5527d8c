use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand};
use pathdiff::diff_paths;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod scaffold;

use scaffold::{GeneratedFile, ScaffoldConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate TypeScript barrel files and placeholder test stubs"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an `index.ts` barrel re-exporting each folder's modules
    #[command(name = "index-ts", visible_alias = "indexTs")]
    IndexTs(RunArgs),

    /// Create a `test/**/<name>.test.js` todo stub for every source file without one
    #[command(name = "test-js", visible_alias = "testJs")]
    TestJs(RunArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::IndexTs(_) => "index-ts",
            Command::TestJs(_) => "test-js",
        }
    }

    fn args(&self) -> &RunArgs {
        match self {
            Command::IndexTs(args) | Command::TestJs(args) => args,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct RunArgs {
    /// Project root containing `src/` (defaults to current directory). `rootPath=<PATH>` overrides it.
    #[arg(value_name = "ROOT")]
    inputs: Vec<String>,

    /// Descend into subfolders of `src/`
    #[arg(short, long)]
    recursive: bool,

    /// Project root; takes precedence over the positional root
    #[arg(long)]
    root_path: Option<String>,

    /// Print what would be generated without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report skipped entries and existing files too
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.args());

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Unhandled error processing {}: {err:#}", cli.command.name());
            eprintln!("{cli:#?}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &RunArgs) {
    let level = if args.quiet {
        "warn"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(command: &Command) -> Result<()> {
    let args = command.args();
    let config = ScaffoldConfig {
        root_path: resolve_root(args),
        recursive: args.recursive,
    };
    let cwd = std::env::current_dir()?;

    if args.dry_run {
        let plan: Vec<GeneratedFile> = match command {
            Command::IndexTs(_) => scaffold::plan_barrels(&config).collect(),
            Command::TestJs(_) => scaffold::plan_test_stubs(&config).collect(),
        };
        print_dry_run(&config, &plan, &cwd);
        return Ok(());
    }

    let result = match command {
        Command::IndexTs(_) => scaffold::generate_barrels(&config),
        Command::TestJs(_) => scaffold::generate_test_stubs(&config),
    };

    match result {
        Ok(summary) => {
            print_created(&summary.created, &cwd);
            Ok(())
        }
        Err(aborted) => {
            // Whatever was written before the failure stays on disk.
            print_created(&aborted.created, &cwd);
            Err(aborted).with_context(|| format!("Failed to scaffold {}", config.source_folder()))
        }
    }
}

/// `--root-path`, then the last `rootPath=` pair, then the first plain positional, then `./`.
fn resolve_root(args: &RunArgs) -> Utf8PathBuf {
    let mut positional = Vec::new();
    let mut pair_root = None;

    for input in &args.inputs {
        match input.split_once('=') {
            Some(("rootPath", value)) => pair_root = Some(value),
            Some((key, _)) => warn!("Ignoring unknown option `{key}`"),
            None => positional.push(input.as_str()),
        }
    }

    let raw = args
        .root_path
        .as_deref()
        .or(pair_root)
        .or(positional.first().copied())
        .unwrap_or("./");

    Utf8PathBuf::from(shellexpand::tilde(raw).into_owned())
}

fn display_path(path: &Path, cwd: &Path) -> PathBuf {
    diff_paths(path, cwd).unwrap_or_else(|| path.to_path_buf())
}

fn print_created(created: &[Utf8PathBuf], cwd: &Path) {
    for path in created {
        println!("{}", display_path(path.as_std_path(), cwd).display());
    }
}

fn print_dry_run(config: &ScaffoldConfig, plan: &[GeneratedFile], cwd: &Path) {
    eprintln!("Source folder: {}", config.source_folder());
    eprintln!("Recursive: {}", config.recursive);
    eprintln!("Planned files ({}):", plan.len());
    for file in plan {
        let state = if file.path.exists() { "exists" } else { "create" };
        eprintln!(
            "  - [{state}] {}",
            display_path(file.path.as_std_path(), cwd).display()
        );
    }
}
