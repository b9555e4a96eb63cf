use pgdesk_cli::cli::{Command, DdlAction, HelpTopic, parse_args};
use pgdesk_cli::config::ProjectConfig;
use std::path::PathBuf;

fn args(v: &[&str]) -> Vec<String> {
    std::iter::once("pgdesk")
        .chain(v.iter().copied())
        .map(str::to_string)
        .collect()
}

#[test]
fn no_arguments_prints_root_help() {
    assert!(matches!(
        parse_args(&args(&[])).unwrap(),
        Command::Help(HelpTopic::Root)
    ));
    assert!(matches!(
        parse_args(&args(&["query", "--help"])).unwrap(),
        Command::Help(HelpTopic::Query)
    ));
}

#[test]
fn config_flag_is_shared_by_commands() {
    let Command::Ddl(d) = parse_args(&args(&[
        "ddl",
        "create-view",
        "--config",
        "conf/desk.toml",
        "--or-replace",
        "cheap",
        "SELECT * FROM products WHERE price < 5",
    ]))
    .unwrap() else {
        panic!("expected ddl");
    };
    assert_eq!(d.global.config, PathBuf::from("conf/desk.toml"));
    assert!(matches!(d.action, DdlAction::CreateView { replace: true, .. }));
}

#[tokio::test]
async fn dry_run_never_needs_a_database() {
    let missing = std::env::temp_dir().join("pgdesk-no-such-config.toml");
    let config = format!("--config={}", missing.display());
    pgdesk_cli::run(args(&[
        "query",
        "products",
        "--where",
        "price > 10",
        "--dry-run",
        &config,
    ]))
    .await
    .unwrap();

    let project = ProjectConfig::load_or_default(missing).unwrap();
    assert_eq!(project.file.database.pool_size, pgdesk::DEFAULT_POOL_SIZE);
}
