use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use relnotes_core::banner::banner_text;
use relnotes_core::{
    PdfWriter, ReleaseNotesCompiler, ReleaseNotesError, RunOptions, RunSummary, VcsBackend,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use yansi::Paint;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum VcsArg {
    /// Subversion, falling back to Git
    #[default]
    Auto,
    Svn,
    Git,
}

impl From<VcsArg> for VcsBackend {
    fn from(arg: VcsArg) -> Self {
        match arg {
            VcsArg::Auto => VcsBackend::Auto,
            VcsArg::Svn => VcsBackend::Svn,
            VcsArg::Git => VcsBackend::Git,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "relnotes",
    author,
    version,
    about = "Compile release notes for a version-controlled module repository"
)]
struct Cli {
    #[clap(help = "Working copy to describe [default: directory of the executable]")]
    target_directory: Option<PathBuf>,

    #[clap(help = "Output PDF [default: ReleaseNotes.pdf beside the executable]")]
    output_file: Option<PathBuf>,

    #[clap(
        help = "Module documentation YAML [default: RepositoryDocumentation.yaml beside the executable]"
    )]
    config_file: Option<PathBuf>,

    #[clap(long, value_enum, default_value_t = VcsArg::Auto)]
    vcs: VcsArg,

    #[clap(long, short, default_value = "info")]
    log_level: String,

    #[clap(long, help = "Print the banner without colors")]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    print_banner(!cli.no_color && std::io::stdout().is_terminal());

    match run(cli) {
        Ok(summary) => {
            log::info!(
                "Release notes complete: {} pages, {} modules, {} revisions",
                summary.pages,
                summary.modules,
                summary.history_entries
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn print_banner(color: bool) {
    let banner = banner_text(env!("CARGO_PKG_VERSION"));
    if color {
        print!("{}", Paint::blue(banner));
    } else {
        print!("{}", banner);
    }
}

fn run(cli: Cli) -> Result<RunSummary> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let base_dir = exe
        .parent()
        .map(PathBuf::from)
        .context("Executable has no parent directory")?;

    let options = RunOptions::resolve(
        &base_dir,
        cli.target_directory,
        cli.output_file,
        cli.config_file,
    );
    log::debug!("Resolved options: {:?}", options);

    let summary = ReleaseNotesCompiler::new(VcsBackend::from(cli.vcs), PdfWriter::new())
        .run(&options)?;
    Ok(summary)
}

/// Library failures carry their own exit status, anything else is a usage error.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ReleaseNotesError>()
        .map(|e| e.kind().exit_code())
        .unwrap_or(1)
}
