//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking its arguments and a
//! CommandContext.

use camino::{Utf8Path, Utf8PathBuf};
use rnx_core::utils::to_utf8_path;
use rnx_core::{RnxError, RnxResult};
use std::path::Path;
use tracing::info;

pub mod externals;
pub mod link;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    pub fn new() -> RnxResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| RnxError::io("Failed to get current directory".to_string(), e))?;

        Ok(Self {
            cwd: to_utf8_path(cwd)?,
            output: OutputHandler::new(),
        })
    }

    /// Resolve a user-supplied path against the working directory
    pub fn resolve_path(&self, path: &Path) -> RnxResult<Utf8PathBuf> {
        let path = to_utf8_path(path.to_path_buf())?;
        Ok(if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        })
    }

    /// Start directory for package lookup
    pub fn start_dir(&self, from: Option<&Path>) -> RnxResult<Utf8PathBuf> {
        match from {
            Some(dir) => self.resolve_path(dir),
            None => Ok(self.cwd.clone()),
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> RnxResult<()> {
    match command {
        Commands::Externals(args) => {
            info!("Computing externals (link peers: {})", !args.no_link);
            externals::execute(args, ctx).await
        },
        Commands::Link(target) => {
            info!("Linking peer dependencies of {}", target.package);
            link::execute(target, ctx).await
        },
        Commands::Version => {
            show_version(ctx);
            Ok(())
        },
    }
}

fn show_version(ctx: &CommandContext) {
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.result(&format!("rnx v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.result(&format!("Target: {}", target));
}

/// Display a path relative to the working directory when it is below it
pub fn display_path<'a>(ctx: &CommandContext, path: &'a Utf8Path) -> &'a Utf8Path {
    path.strip_prefix(&ctx.cwd).unwrap_or(path)
}
