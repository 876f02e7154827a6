//! CLI argument parsing and run orchestration

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dialoguer::Confirm;
use log::info;

use instance_patcher::config::{Config, Preview};
use instance_patcher::instance::GameInstance;

/// Instance Patcher - Push configuration patches into game instances
#[derive(Parser, Debug)]
#[command(name = "instance-patcher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Root directories to scan for game instances
    #[arg(required = true, value_name = "DIR")]
    instances: Vec<PathBuf>,

    /// Path to the patch config file
    #[arg(short, long, value_name = "PATH", default_value = "configs/config.jsonc")]
    config: PathBuf,

    /// Path to the template directory holding patch source files
    #[arg(short = 'd', long = "data", value_name = "PATH", default_value = "configs/")]
    data: PathBuf,

    /// Maximum recursion depth for instance discovery
    #[arg(short = 'r', long, value_name = "DEPTH", default_value_t = 2)]
    max_recursion: u32,

    /// Show pending changes and ask for confirmation before applying
    #[arg(short, long)]
    preview: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .init();

        let mut instances = Vec::new();
        for root in &self.instances {
            instances.extend(GameInstance::from_path(root, &[], self.max_recursion)?);
        }
        info!("discovered {} instance(s)", instances.len());

        let config = Config::from_file(&self.config, self.data.clone())?;

        let preview = config.preview(&instances)?;
        if !preview.has_changes() {
            println!("No changes detected");
            return Ok(());
        }
        print_preview(&preview);

        if self.preview {
            let confirmed = Confirm::new()
                .with_prompt("Apply changes?")
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Aborted");
                return Ok(());
            }
        }

        let report = config.apply(&instances)?;
        println!("Applied {} patch(es)", report.applied);

        if !report.is_success() {
            for failure in &report.failures {
                eprintln!(
                    "failed: {} in {}: {}",
                    failure.file,
                    failure.instance.display(),
                    failure.message
                );
            }
            anyhow::bail!("{} patch(es) failed", report.failures.len());
        }

        Ok(())
    }
}

fn print_preview(preview: &Preview) {
    for entry in &preview.entries {
        println!("Instance: {}", entry.instance.display());
        for pending in &entry.pending {
            println!(
                "  {} -> {} ({})",
                pending.file, pending.with_file, pending.method
            );
        }
    }
}
