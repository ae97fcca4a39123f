//! Unit tests for CLI commands.

use super::*;
use crate::{Cli, ExternalsArgs, TargetArgs};
use clap::Parser;
use rnx_config::Platform;
use tempfile::TempDir;

/// Context rooted at a fresh project with react-native declaring `a` and `b`,
/// where only `a` is hoisted next to it.
async fn create_test_project(temp_dir: &TempDir) -> CommandContext {
    let cwd = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let root = cwd.join("node_modules/react-native");
    tokio::fs::create_dir_all(root.join("node_modules")).await.unwrap();
    tokio::fs::create_dir_all(cwd.join("node_modules/a")).await.unwrap();
    tokio::fs::write(
        root.join("package.json"),
        r#"{ "name": "react-native", "version": "0.14.2", "dependencies": { "a": "1.0.0", "b": "1.0.0" } }"#,
    )
    .await
    .unwrap();
    tokio::fs::write(
        cwd.join("graph.json"),
        r#"[{"name":"index","isPolyfill":false},{"name":"polyfill-1","isPolyfill":true}]"#,
    )
    .await
    .unwrap();

    CommandContext {
        cwd,
        output: crate::output::OutputHandler::plain(),
    }
}

fn externals_args(output: Option<&str>) -> ExternalsArgs {
    ExternalsArgs {
        target: TargetArgs {
            from: None,
            package: "react-native".to_string(),
        },
        snapshot: Some("graph.json".into()),
        no_link: false,
        platform: None,
        blacklist: Vec::new(),
        node: "node".to_string(),
        output: output.map(Into::into),
        pretty: false,
    }
}

#[test]
fn test_parse_externals_arguments() {
    let cli = Cli::try_parse_from([
        "rnx",
        "externals",
        "--snapshot",
        "graph.json",
        "--platform",
        "ios",
        "--blacklist",
        "fixtures/skip.js",
        "--no-link",
        "--pretty",
    ])
    .unwrap();

    match cli.command {
        Commands::Externals(args) => {
            assert_eq!(args.platform, Some(Platform::Ios));
            assert_eq!(args.blacklist, vec!["fixtures/skip.js".to_string()]);
            assert_eq!(args.target.package, "react-native");
            assert!(args.no_link);
            assert!(args.pretty);
        },
        _ => panic!("expected externals command"),
    }
}

#[test]
fn test_parse_rejects_unknown_platform() {
    let result = Cli::try_parse_from(["rnx", "externals", "--platform", "symbian"]);
    assert!(result.is_err());
}

#[test]
fn test_resolve_path_against_cwd() {
    let ctx = CommandContext {
        cwd: Utf8PathBuf::from("/work/app"),
        output: crate::output::OutputHandler::plain(),
    };

    assert_eq!(
        ctx.resolve_path(Path::new("out/externals.json")).unwrap(),
        Utf8PathBuf::from("/work/app/out/externals.json")
    );
    assert_eq!(
        ctx.resolve_path(Path::new("/tmp/externals.json")).unwrap(),
        Utf8PathBuf::from("/tmp/externals.json")
    );
    assert_eq!(ctx.start_dir(None).unwrap(), Utf8PathBuf::from("/work/app"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_externals_command_writes_output_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_project(&temp_dir).await;

    externals::execute(externals_args(Some("externals.json")), &ctx).await.unwrap();

    let written = tokio::fs::read_to_string(ctx.cwd.join("externals.json")).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value, serde_json::json!({ "index": "commonjs index" }));
    assert!(tokio::fs::read_link(ctx.cwd.join("node_modules/react-native/node_modules/a"))
        .await
        .is_ok());
}

#[cfg(unix)]
#[tokio::test]
async fn test_externals_command_without_linking() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_project(&temp_dir).await;
    let mut args = externals_args(Some("externals.json"));
    args.no_link = true;

    externals::execute(args, &ctx).await.unwrap();

    assert!(tokio::fs::symlink_metadata(ctx.cwd.join("node_modules/react-native/node_modules/a"))
        .await
        .is_err());
}

#[cfg(unix)]
#[tokio::test]
async fn test_link_command_links_hoisted_peer() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_project(&temp_dir).await;
    let target = TargetArgs {
        from: None,
        package: "react-native".to_string(),
    };

    link::execute(target.clone(), &ctx).await.unwrap();
    // Second run finds the link already in place
    link::execute(target, &ctx).await.unwrap();

    let link = tokio::fs::read_link(ctx.cwd.join("node_modules/react-native/node_modules/a"))
        .await
        .unwrap();
    assert_eq!(link, ctx.cwd.join("node_modules/a").into_std_path_buf());
}

#[tokio::test]
async fn test_externals_without_installation_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = CommandContext {
        cwd: Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap(),
        output: crate::output::OutputHandler::plain(),
    };
    let mut args = externals_args(None);
    args.target.package = "rnx-test-missing-framework".to_string();

    let err = externals::execute(args, &ctx).await.unwrap_err();

    assert!(matches!(err, RnxError::FrameworkNotFound { .. }));
}
