//! Command-line and environment configuration.

use activator_artifacts::GitHubConfig;
use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "activator-server")]
#[command(about = "Machine activation service", version)]
pub struct Cli {
    /// SQLite database holding scripts, tokens and activations
    #[arg(long, env = "ACTIVATOR_DATABASE", default_value = "activator.db", global = true)]
    pub database: PathBuf,

    /// Enable verbose debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP activation service
    Serve(ServeArgs),
    /// Register a script stored in the GitHub repository
    AddScript(AddScriptArgs),
    /// Issue a one-time install-session token for a script
    IssueToken(IssueTokenArgs),
    /// List issued tokens, newest first
    ListTokens,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "ACTIVATOR_BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// HTTP port
    #[arg(short, long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// Owner of the repository holding scripts and launchers
    #[arg(long, env = "GITHUB_OWNER")]
    pub github_owner: String,

    /// Repository holding scripts and launchers
    #[arg(long, env = "GITHUB_REPO")]
    pub github_repo: String,

    /// Access token for the repository
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Branch, tag or commit to read from
    #[arg(long, env = "GITHUB_REF")]
    pub github_ref: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Repository directory holding launcher binaries
    #[arg(long, env = "GITHUB_LAUNCHER_PATH", default_value = "launchers")]
    pub launcher_path: String,

    /// Upper bound on fetching a script from GitHub, in seconds
    #[arg(long, env = "ACTIVATOR_FETCH_TIMEOUT", default_value = "30")]
    pub fetch_timeout_secs: u64,
}

impl ServeArgs {
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn github(&self) -> GitHubConfig {
        GitHubConfig {
            owner: self.github_owner.clone(),
            repo: self.github_repo.clone(),
            token: self.github_token.clone(),
            git_ref: self.github_ref.clone(),
            api_base_url: self.github_api_url.clone(),
            timeout_secs: self.fetch_timeout_secs,
        }
    }
}

#[derive(Args)]
pub struct AddScriptArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Path of the script inside the repository
    #[arg(long)]
    pub path: String,

    /// Execution config as JSON, keyed by windows/linux/darwin/default
    #[arg(long, default_value = "{}")]
    pub execution_config: String,
}

#[derive(Args)]
pub struct IssueTokenArgs {
    /// Script the token unlocks
    #[arg(long)]
    pub script_id: String,

    /// Customer or usage note
    #[arg(long, default_value = "")]
    pub note: String,

    /// Lifetime in hours
    #[arg(long, default_value_t = activator_types::DEFAULT_TOKEN_TTL_HOURS)]
    pub ttl_hours: i64,
}
