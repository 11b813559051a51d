//! One-shot commands that run without the HTTP server

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::open_services;

/// Repair the route index and print what changed
pub async fn run_repair(config: &StaticConfig) -> Result<()> {
    let context = open_services(&config.database, &config.routes).await?;

    let report = context
        .bookmark_service
        .repair()
        .await
        .context("Repair failed")?;

    if report.is_clean() {
        println!("{} route index is consistent", "✓".green());
    } else {
        println!("{} {}", "repaired:".yellow().bold(), report);
    }

    if let Ok(storage) = std::sync::Arc::try_unwrap(context.storage) {
        storage.close().await;
    }
    Ok(())
}

/// Print a sample configuration, or write it to `output`
pub fn run_generate_config(output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            StaticConfig::default()
                .save_to_file(path)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("Failed to write {}", path))?;
            println!("{} sample configuration written to {}", "✓".green(), path);
        }
        None => print!("{}", StaticConfig::generate_sample_config()),
    }
    Ok(())
}
