//! solsync - headless sync engine and CLI for MetalK8s Solutions
//!
//! Keeps Solution and Environment state from a MetalK8s cluster in sync
//! through polling loops and exposes it on the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use solsync::cli::{self, ConfigSubcommand, ListTarget};
use solsync::config::ConfigLoader;
use solsync::session::SolutionsSession;

/// solsync - keep MetalK8s Solution and Environment state in sync
#[derive(Parser, Debug)]
#[command(name = "solsync")]
#[command(about = "Keep MetalK8s Solution and Environment state in sync from the cluster", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Kubeconfig context to connect with
    #[arg(long)]
    context: Option<String>,

    /// Path to an explicit kubeconfig file
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the refresh loops and report state changes until interrupted
    Watch,
    /// Fetch one resource family and print it
    List {
        #[arg(value_enum)]
        target: ListTarget,
    },
    /// Environment management
    Env {
        #[command(subcommand)]
        subcommand: EnvSubcommand,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Environment management subcommands
#[derive(Subcommand, Debug)]
enum EnvSubcommand {
    /// Create a new environment
    Create {
        /// Environment name
        #[arg(long)]
        name: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config management needs no cluster connection
    if let Command::Config { subcommand } = &args.command {
        return cli::handle_config_command(subcommand.clone());
    }

    let log_file = cli::init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = ConfigLoader::load().unwrap_or_else(|_| ConfigLoader::load_defaults());

    tracing::debug!("Initializing Kubernetes client");
    let session = if let Some(path) = args.kubeconfig.as_deref() {
        SolutionsSession::connect_from_kubeconfig(path, &config).await?
    } else if let Some(context) = args.context.as_deref() {
        SolutionsSession::connect(context, &config).await?
    } else {
        SolutionsSession::connect_default(&config).await?
    };

    if args.debug {
        let context = solsync::kube::get_context().await?;
        tracing::info!("Connected to Kubernetes context: {}", context);
    }

    match args.command {
        Command::Watch => cli::run_watch(session).await,
        Command::List { target } => cli::run_list(&session, target).await,
        Command::Env {
            subcommand: EnvSubcommand::Create { name, description },
        } => cli::run_env_create(session, &name, &description).await,
        Command::Config { .. } => unreachable!("handled before connecting"),
    }
}
