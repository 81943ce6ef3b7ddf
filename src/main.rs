use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use asgctl::autoscaling;
use asgctl::config::{self, Config};

#[derive(Parser)]
#[command(name = "asgctl")]
#[command(
    about = "CLI for AWS Auto Scaling group capacity",
    long_about = "asgctl lists AWS Auto Scaling groups and adjusts their desired capacity.\n\nCommands:\n  - autoscaling list: print every group the account can see\n  - autoscaling upscale <NAME>: set a group's desired capacity to 2\n  - autoscaling downscale <NAME>: wait until the group has more than one\n    instance and all of them are healthy, then set desired capacity to 1\n\nCredentials and region come from the ambient AWS configuration (profile,\nenvironment, instance metadata), optionally pinned in the config file."
)]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage autoscaling group capacity
    #[command(alias = "as")]
    Autoscaling {
        #[command(subcommand)]
        subcommand: Option<autoscaling::AutoscalingCommands>,
    },
    /// Initialize configuration
    Init {
        /// Where to write the config file
        #[arg(short, long, default_value = ".asgctl.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Suppress INFO by default, only show warnings and errors
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Autoscaling { subcommand } => {
            autoscaling::handle_command(subcommand, &config, &cli.output).await?;
        }
        Commands::Init { path } => {
            config::init_config(&path)?;
        }
    }

    Ok(())
}
