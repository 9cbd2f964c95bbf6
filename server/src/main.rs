//! Machine activation service.
//!
//! Usage:
//!   activator-server serve --github-owner acme --github-repo scripts
//!   activator-server add-script --name setup --path scripts/setup.py
//!   activator-server issue-token --script-id <id>
//!
//! Scripts and launchers are read from a GitHub repository; tokens, script
//! metadata and activation records live in a local SQLite database.

use activator_activation::Activator;
use activator_artifacts::GitHubScriptStore;
use activator_server::{
    AddScriptArgs, AppState, Cli, Command, IssueTokenArgs, ServeArgs, build_router,
};
use activator_store::{SqliteTokenStore, TokenStore};
use activator_types::{ExecutionConfig, InstallationToken, ScriptArtifact, ScriptId};
use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let store = SqliteTokenStore::open(&cli.database)
        .with_context(|| format!("Failed to open database {}", cli.database.display()))?;

    match cli.command {
        Command::Serve(args) => serve(store, args).await,
        Command::AddScript(args) => add_script(&store, args).await,
        Command::IssueToken(args) => issue_token(&store, args).await,
        Command::ListTokens => list_tokens(&store).await,
    }
}

async fn serve(store: SqliteTokenStore, args: ServeArgs) -> Result<()> {
    let scripts = GitHubScriptStore::new(args.github())
        .context("Failed to configure GitHub script store")?;
    info!("Reading scripts from {}/{}", args.github_owner, args.github_repo);

    let activator = Activator::new(Arc::new(store), Arc::new(scripts))
        .with_fetch_timeout(args.fetch_timeout());
    let app = build_router(AppState::new(activator, args.launcher_path.as_str()));

    let addr = args.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Activation service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("Activation service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed.
        std::future::pending::<()>().await;
    }
}

async fn add_script(store: &SqliteTokenStore, args: AddScriptArgs) -> Result<()> {
    let config = ExecutionConfig::from_json(&args.execution_config)
        .context("Invalid execution config")?;
    let script = ScriptArtifact::new(args.name, args.path, config);
    store.insert_script(&script).await.context("Failed to register script")?;

    info!("Registered script {} at {}", script.name, script.content_path);
    println!("{}", script.id);
    Ok(())
}

async fn issue_token(store: &SqliteTokenStore, args: IssueTokenArgs) -> Result<()> {
    if args.ttl_hours <= 0 {
        bail!("--ttl-hours must be positive");
    }
    let script_id = ScriptId::parse(&args.script_id).context("Invalid script id")?;
    if store.get_script(script_id).await?.is_none() {
        bail!("No script with id {script_id}");
    }

    let ttl = Duration::try_hours(args.ttl_hours).context("--ttl-hours is out of range")?;
    let token = InstallationToken::issue(script_id, args.note, Some(ttl))
        .context("Invalid token lifetime")?;
    store.insert(&token).await.context("Failed to store token")?;

    info!(
        "Issued token {} for script {}, expires {}",
        token.redacted_value(),
        script_id,
        token.expires_at
    );
    println!("{}", token.value);
    Ok(())
}

async fn list_tokens(store: &SqliteTokenStore) -> Result<()> {
    let now = Utc::now();
    for token in store.list().await? {
        println!(
            "{}  {:<9}  script {}  expires {}  {}",
            token.value,
            format!("{:?}", token.effective_status(now)).to_uppercase(),
            token.script_id,
            token.expires_at.format("%Y-%m-%d %H:%M UTC"),
            token.customer_info
        );
    }
    Ok(())
}
