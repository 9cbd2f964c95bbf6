use activator_server::{Cli, Command};
use clap::Parser;
use std::time::Duration;

#[test]
fn serve_defaults() {
    let cli = Cli::try_parse_from([
        "activator-server",
        "serve",
        "--github-owner",
        "acme",
        "--github-repo",
        "scripts",
    ])
    .unwrap();
    assert!(!cli.verbose);

    let Command::Serve(args) = cli.command else {
        panic!("expected serve");
    };
    assert_eq!(args.port, 3001);
    assert_eq!(args.listen_addr().to_string(), "0.0.0.0:3001");
    assert_eq!(args.fetch_timeout(), Duration::from_secs(30));
    assert_eq!(args.launcher_path, "launchers");

    let github = args.github();
    assert_eq!(github.owner, "acme");
    assert_eq!(github.repo, "scripts");
    assert_eq!(github.api_base_url, "https://api.github.com");
    assert_eq!(github.timeout_secs, 30);
}

#[test]
fn serve_overrides() {
    let cli = Cli::try_parse_from([
        "activator-server",
        "--database",
        "/var/lib/activator/db.sqlite",
        "serve",
        "--bind",
        "127.0.0.1",
        "--port",
        "8080",
        "--github-owner",
        "acme",
        "--github-repo",
        "scripts",
        "--github-ref",
        "release",
        "--fetch-timeout-secs",
        "5",
        "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.database.to_str(), Some("/var/lib/activator/db.sqlite"));

    let Command::Serve(args) = cli.command else {
        panic!("expected serve");
    };
    assert_eq!(args.listen_addr().to_string(), "127.0.0.1:8080");
    assert_eq!(args.fetch_timeout(), Duration::from_secs(5));
    assert_eq!(args.github().git_ref.as_deref(), Some("release"));
    assert_eq!(args.github().timeout_secs, 5);
}

#[test]
fn issue_token_defaults() {
    let cli =
        Cli::try_parse_from(["activator-server", "issue-token", "--script-id", "abc"]).unwrap();
    let Command::IssueToken(args) = cli.command else {
        panic!("expected issue-token");
    };
    assert_eq!(args.ttl_hours, 24);
    assert_eq!(args.note, "");
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["activator-server"]).is_err());
}
