//! `rnx externals` command implementation.
//!
//! Runs the full pipeline and prints the externals object.

use rnx_config::FrameworkInstall;
use rnx_core::{RnxError, RnxResult};
use rnx_resolver::{
    DependencyGraphBuilder, ExternalsResolver, NodePackagerBuilder, ResolverOptions, SnapshotGraphBuilder,
};
use std::time::Instant;

use super::{display_path, CommandContext};
use crate::ExternalsArgs;

/// Execute the `rnx externals` command
pub async fn execute(args: ExternalsArgs, ctx: &CommandContext) -> RnxResult<()> {
    let start_time = Instant::now();

    let mut options = ResolverOptions::new(ctx.start_dir(args.target.from.as_deref())?)
        .with_package(args.target.package.clone())
        .with_platform(args.platform)
        .with_additional_blacklist(args.blacklist.clone());
    if args.no_link {
        options = options.without_peer_links();
    }

    let install = FrameworkInstall::locate(&options.start_dir, &options.package).await?;
    ctx.output.info(&format!(
        "Using {} {} at {}",
        install.manifest().name,
        install.manifest().version,
        display_path(ctx, install.root())
    ));

    let builder = graph_builder(&args, &install, ctx)?;
    let resolver = ExternalsResolver::new(options, builder);
    let resolution = resolver.resolve(&install).await?;

    if let Some(links) = &resolution.links {
        for peer in &links.linked {
            ctx.output.info(&format!("Linked {} -> {}", peer.name, display_path(ctx, &peer.source)));
        }
    }

    let json = resolution.externals.to_json(args.pretty)?;
    match &args.output {
        Some(path) => {
            let path = ctx.resolve_path(path)?;
            tokio::fs::write(&path, format!("{}\n", json))
                .await
                .map_err(|e| RnxError::io(format!("Failed to write {}", path), e))?;
            ctx.output.success(&format!(
                "Wrote {} externals to {} in {:.2}s",
                resolution.externals.len(),
                display_path(ctx, &path),
                start_time.elapsed().as_secs_f64()
            ));
        },
        None => ctx.output.result(&json),
    }

    Ok(())
}

/// Snapshot replay when asked for, the framework's packager otherwise
fn graph_builder(
    args: &ExternalsArgs,
    install: &FrameworkInstall,
    ctx: &CommandContext,
) -> RnxResult<Box<dyn DependencyGraphBuilder>> {
    let builder: Box<dyn DependencyGraphBuilder> = match &args.snapshot {
        Some(path) => Box::new(SnapshotGraphBuilder::new(ctx.resolve_path(path)?)),
        None => Box::new(NodePackagerBuilder::for_install(install).with_node(args.node.clone())),
    };
    Ok(builder)
}
