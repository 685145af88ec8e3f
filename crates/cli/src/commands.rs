//! CLI subcommand handlers

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::{config::Config, output::OutputHandler, record, summary};

/// Options for the `summary` subcommand after merging flags with config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub backup_dir: Option<String>,
    pub has_hv_data: bool,
}

impl SummaryOptions {
    /// Command-line values win; config fills in what was not given.
    pub fn resolve(backup_dir: Option<String>, hv_data: bool, config: &Config) -> Self {
        Self {
            backup_dir: backup_dir
                .filter(|dir| !dir.is_empty())
                .or_else(|| config.report.backup_dir.clone()),
            has_hv_data: hv_data || config.report.hv_data,
        }
    }
}

/// Load records from `input` and print the summary table
pub fn summary(input: &Path, options: &SummaryOptions, output: &mut OutputHandler) -> Result<()> {
    let records = record::load_records(input)
        .with_context(|| format!("Failed to load task records from {}", input.display()))?;

    if records.is_empty() {
        tracing::info!(path = %input.display(), "no task records to summarize");
        return Ok(());
    }

    summary::render_summary(
        &records,
        options.backup_dir.as_deref(),
        options.has_hv_data,
        output,
    );

    Ok(())
}

/// Show current configuration
pub fn show_config(config: &Config, path: &Path, output: &OutputHandler) -> Result<()> {
    output.print_header("Configuration");

    println!();
    println!("  {}", "[display]".bright_cyan());
    println!("    {} = {}", "color".dimmed(), config.display.color);

    println!();
    println!("  {}", "[report]".bright_cyan());
    println!(
        "    {} = {}",
        "backup_dir".dimmed(),
        match &config.report.backup_dir {
            Some(dir) => format!("\"{}\"", dir),
            None => "not set".dimmed().to_string(),
        }
    );
    println!("    {} = {}", "hv_data".dimmed(), config.report.hv_data);

    println!();
    println!("  {} {}", "Config file:".dimmed(), path.display());

    Ok(())
}

/// Set a configuration value given as `key=value` and persist it to `path`
pub fn set_config(kv: &str, path: &Path) -> Result<Config> {
    let (key, value) = kv
        .split_once('=')
        .context("Invalid format. Use: key=value")?;

    let key = key.trim();
    let value = value.trim().trim_matches('"');

    let mut config = Config::load_from(path)?;
    config.set(key, value)?;
    config
        .save_to(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;

    tracing::info!(key, value, "updated configuration");
    Ok(config)
}
