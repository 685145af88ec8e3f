//! TaskHound CLI - scheduled task summary reporting
//!
//! Prints a per-host table of privileged and normal tasks from a file of
//! classified task records.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskhound_cli::{
    commands::{self, SummaryOptions},
    config::Config,
    output::OutputHandler,
};

/// TaskHound - scheduled task summary
#[derive(Parser)]
#[command(name = "taskhound")]
#[command(author = "TaskHound Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarize privileged and normal scheduled tasks per host")]
#[command(long_about = r#"
Renders a per-host summary of previously collected task records.

Records are read as a JSON array or JSON Lines; each record needs a "host"
and a "type" field ("PRIV" marks a privileged task).

Examples:
  taskhound summary rows.json                      # Summary without high-value data
  taskhound summary rows.json --hv-data            # Privileged counts are meaningful
  taskhound summary - --backup-dir ./backup        # Read records from stdin
  taskhound config --set report.hv_data=true       # Persist a default
"#)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the per-host task summary
    Summary {
        /// Records file (JSON array or JSON Lines), `-` for stdin
        input: PathBuf,

        /// Directory where raw task files were backed up
        #[arg(long, env = "TASKHOUND_BACKUP_DIR")]
        backup_dir: Option<String>,

        /// High-value target data was loaded, so privileged counts are meaningful
        #[arg(long)]
        hv_data: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set a configuration value (key=value)
        #[arg(long)]
        set: Option<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the table
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("taskhound_cli={},warn", log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = Config::config_path();
    let config = Config::load_from(&config_path)?;
    let color = config.display.color && !cli.no_color;

    match cli.command {
        Commands::Summary {
            input,
            backup_dir,
            hv_data,
        } => {
            let options = SummaryOptions::resolve(backup_dir, hv_data, &config);
            let mut output = OutputHandler::new(color);
            commands::summary(&input, &options, &mut output)?;
        }
        Commands::Config { show, set } => {
            let output = OutputHandler::new(color);
            if show {
                commands::show_config(&config, &config_path, &output)?;
            } else if let Some(kv) = set {
                commands::set_config(&kv, &config_path)?;
                output.print_info(&format!("Saved {}", config_path.display()));
            } else {
                commands::show_config(&config, &config_path, &output)?;
            }
        }
    }

    Ok(())
}
