//! `semtok` command-line driver
//!
//! Reads token files, runs the engine, and prints JSON reports on stdout.
//! Logs go to stderr, filtered by `RUST_LOG` or `--verbose`.

mod tokens;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use semtok_core::{EngineConfig, TokenIntelligence};
use semtok_migrate::{Approach, ExecutionOptions, ExecutionStatus};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "semtok", version)]
#[command(about = "Semantic design-token audit and migration planner")]
struct Cli {
    /// Engine configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Single-line JSON output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Audit a token file and print the health report
    Audit {
        /// Token file (JSON)
        tokens: PathBuf,
    },
    /// Generate and rank migration scenarios
    Plan {
        /// Token file (JSON)
        tokens: PathBuf,
    },
    /// Run one migration scenario (preview unless --apply)
    Migrate {
        /// Token file (JSON)
        tokens: PathBuf,

        /// Scenario template
        #[arg(short, long, default_value = "progressive")]
        approach: Approach,

        /// Mutate the tokens instead of previewing
        #[arg(long)]
        apply: bool,

        /// Run validation checks after each action
        #[arg(long)]
        validate: bool,

        /// Stop at the first failed action
        #[arg(long)]
        stop_on_error: bool,

        /// Where to write the migrated token file
        #[arg(short, long, requires = "apply")]
        output: Option<PathBuf>,
    },
    /// Compare a token file against a reference design system
    Compare {
        /// Token file (JSON)
        tokens: PathBuf,
        /// Reference token file (JSON)
        reference: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "semtok=debug" } else { "semtok=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{text}");
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = TokenIntelligence::new(config);

    match cli.command {
        Command::Audit { tokens } => {
            let store = tokens::load_store(&tokens)?;
            print_json(&engine.audit(&store), cli.compact)?;
        }
        Command::Plan { tokens } => {
            let store = tokens::load_store(&tokens)?;
            print_json(&engine.plan(&store), cli.compact)?;
        }
        Command::Migrate {
            tokens,
            approach,
            apply,
            validate,
            stop_on_error,
            output,
        } => {
            let mut store = tokens::load_store(&tokens)?;
            let options = ExecutionOptions::default()
                .with_dry_run(!apply)
                .with_validate(validate)
                .with_stop_on_error(stop_on_error)
                .with_snapshot(apply);

            let (_, execution) = engine
                .migrate(&mut store, approach, &options)
                .with_context(|| format!("{approach} migration failed"))?;
            print_json(&execution, cli.compact)?;

            if let Some(output) = output {
                tokens::save_store(&output, &store)?;
            }
            if execution.status == ExecutionStatus::Failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Compare { tokens, reference } => {
            let current = tokens::load_store(&tokens)?;
            let reference = tokens::load_store(&reference)?;
            print_json(&engine.compare_with_reference(&current, &reference), cli.compact)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
