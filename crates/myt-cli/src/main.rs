//! myt CLI - Command-line interface for myt-tools.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use myt_core::Config;
use myt_jira_workflow::{
    plan_transition, TransitionPlanRequest, TransitionResolver, JIRA_WORKFLOW,
};
use myt_mcp::{default_registry, McpServer};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "myt")]
#[command(author, version, about = "myt - JIRA workflow tools for AI assistants", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio
    Serve,

    /// Calculate the transition path between two statuses
    Transitions {
        /// Current status, alias, or preset shortcut
        from: String,

        /// Target status or alias
        to: Option<String>,
    },

    /// Plan moving a ticket to a target state
    Plan {
        /// Ticket ID (e.g., SI-8748)
        ticket: String,

        /// Target status or alias
        target: String,

        /// Current status, if known
        #[arg(long)]
        current: Option<String>,

        /// Context for the transition
        #[arg(long)]
        description: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file path
    Path,

    /// Get a value (e.g., jira.cloud_id)
    Get { key: String },

    /// Set a value (e.g., jira.cloud_id acme.atlassian.net)
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    init_logging(cli.verbose, &config.logging.level);

    JIRA_WORKFLOW
        .validate()
        .context("Built-in JIRA workflow is inconsistent")?;

    let resolver = TransitionResolver::new(config.jira.cloud_id.clone());

    match cli.command {
        Some(Commands::Serve) => {
            tracing::info!("Serving JIRA workflow tools for {}", resolver.cloud_id());
            let mut server = McpServer::new(default_registry(resolver));
            server.run().await?;
        }
        Some(Commands::Transitions { from, to }) => {
            let result = resolver.resolve(&from, to.as_deref().unwrap_or_default());
            print_json(&result)?;
            if result.is_error() {
                std::process::exit(1);
            }
        }
        Some(Commands::Plan {
            ticket,
            target,
            current,
            description,
        }) => {
            let request = TransitionPlanRequest {
                ticket_id: ticket,
                target_state: target,
                description,
                current_status: current,
            };
            let plan = plan_transition(&request, &resolver);
            print_json(&plan)?;
            if plan.is_error() {
                std::process::exit(1);
            }
        }
        Some(Commands::Config { command }) => run_config(command, config, &config_path)?,
        None => {
            println!("myt - JIRA workflow tools for AI assistants");
            println!("Run with --help for usage information");
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries the MCP protocol and command output.
fn init_logging(verbose: bool, configured_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_config(command: ConfigCommands, mut config: Config, path: &Path) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(&key)?);
        }
        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            config.save_to(path)?;
            println!("{} = {}", key, config.get(&key)?);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
