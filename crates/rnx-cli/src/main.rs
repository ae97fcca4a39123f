//! # rnx
//!
//! Computes the modules a React Native runtime provides natively and prints
//! them as a webpack `externals` object.
//!
//! This is the entry point for the CLI. It parses arguments, sets up logging,
//! and dispatches to the command handlers. Results go to stdout, everything
//! else to stderr.

use clap::{Args, Parser, Subcommand};
use rnx_config::{Platform, DEFAULT_FRAMEWORK_PACKAGE};
use rnx_core::RnxError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Compute webpack externals for a React Native runtime
#[derive(Parser)]
#[command(name = "rnx", version, about = "Compute webpack externals for a React Native runtime")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the externals object for the installed framework
    Externals(ExternalsArgs),
    /// Link hoisted peer dependencies into the framework's node_modules
    Link(TargetArgs),
    /// Show version information
    Version,
}

/// Which framework installation to work on
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Directory to start package lookup from [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub from: Option<PathBuf>,

    /// Framework package name
    #[arg(long, default_value = DEFAULT_FRAMEWORK_PACKAGE)]
    pub package: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExternalsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Replay a captured `[{"name", "isPolyfill"}]` graph instead of running the packager
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Skip peer dependency linking
    #[arg(long)]
    pub no_link: bool,

    /// Blacklist the other platforms' sources (ios, android, web)
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Additional path suffix for the packager to ignore (repeatable)
    #[arg(long = "blacklist", value_name = "SUFFIX")]
    pub blacklist: Vec<String>,

    /// Node executable used to run the packager
    #[arg(long, env = "RNX_NODE", default_value = "node")]
    pub node: String,

    /// Write the externals object to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    debug!("Starting rnx v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("Command failed: {:?}", err);
            let formatter = ErrorFormatter::new();
            let rendered = match err.downcast_ref::<RnxError>() {
                Some(rnx_error) => formatter.format_error(rnx_error),
                None => formatter.format_chain(&err),
            };
            eprint!("{}", rendered);
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| RnxError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new()?;
        commands::dispatch_command(cli.command, &ctx).await?;
        Ok(())
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = ["rnx", "rnx_core", "rnx_config", "rnx_link", "rnx_resolver"]
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
