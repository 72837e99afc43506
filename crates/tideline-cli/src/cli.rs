use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tideline_core::ResourceKind;

#[derive(Parser)]
#[command(name = "tideline")]
#[command(about = "Tideline: keep bots, datasets and their friends in line with a declared file")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides the profile)
    #[arg(short, long, global = true, env = "TIDELINE_API_URL")]
    pub server: Option<String>,

    /// API token (overrides the profile)
    #[arg(long, global = true, env = "TIDELINE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, global = true, env = "TIDELINE_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Config profile name
    #[arg(short, long, global = true, env = "TIDELINE_PROFILE", default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Declared configuration file
    #[arg(long, global = true, default_value = "tideline.toml")]
    pub file: PathBuf,

    /// State snapshot file
    #[arg(long, global = true, default_value = "tideline.state.json")]
    pub state: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show what apply would change
    Plan,
    /// Refresh, then create, update and delete until remote matches the file
    Apply,
    /// Re-read every recorded resource and drop the ones deleted remotely
    Refresh,
    /// Adopt an existing remote entity under a local name
    Import(ImportArgs),
    /// Delete every recorded resource
    Destroy,
    /// Fetch one entity by identifier
    Get(GetArgs),
    /// List every entity of a kind
    List(ListArgs),
    /// Inspect the state snapshot
    State(StateArgs),
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct ImportArgs {
    /// Resource kind (bot, dataset, file, integration, secret, skillset)
    pub kind: ResourceKind,
    /// Local name, as used in the declared file
    pub name: String,
    /// Remote identifier
    pub id: String,
}

#[derive(clap::Args)]
pub struct GetArgs {
    /// Resource kind
    pub kind: ResourceKind,
    /// Remote identifier
    pub id: String,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Resource kind
    pub kind: ResourceKind,
}

#[derive(clap::Args)]
pub struct StateArgs {
    #[command(subcommand)]
    pub command: StateCommands,
}

#[derive(Subcommand)]
pub enum StateCommands {
    /// Print every recorded resource
    Show,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, token, format, timeout)
    pub key: String,
    /// Value
    pub value: String,
}
