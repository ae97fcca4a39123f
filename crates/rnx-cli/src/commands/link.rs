//! `rnx link` command implementation.
//!
//! Runs only the peer linking stage and reports what happened to each
//! declared dependency.

use rnx_config::FrameworkInstall;
use rnx_core::RnxResult;
use rnx_link::{PeerLinker, SkipReason};

use super::{display_path, CommandContext};
use crate::TargetArgs;

/// Execute the `rnx link` command
pub async fn execute(target: TargetArgs, ctx: &CommandContext) -> RnxResult<()> {
    let start_dir = ctx.start_dir(target.from.as_deref())?;
    let install = FrameworkInstall::locate(&start_dir, &target.package).await?;

    let report = PeerLinker::new(install.root())
        .link_missing(install.manifest().dependency_names())
        .await?;

    for peer in &report.linked {
        ctx.output.success(&format!(
            "{} -> {}",
            display_path(ctx, &peer.destination),
            display_path(ctx, &peer.source)
        ));
    }
    for name in report.skipped_because(SkipReason::NotADirectory) {
        ctx.output.warn(&format!("{} is hoisted as a file, not linked", name));
    }
    for name in report.skipped_because(SkipReason::InvalidName) {
        ctx.output.warn(&format!("{} is not a valid package name, not linked", name));
    }

    let present = report.skipped_because(SkipReason::AlreadyPresent).count();
    let unavailable = report.skipped_because(SkipReason::Unavailable).count();
    ctx.output.info(&format!(
        "{} linked, {} already present, {} not installed",
        report.linked.len(),
        present,
        unavailable
    ));

    Ok(())
}
