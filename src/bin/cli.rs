//! catalog-diff CLI
//!
//! Local execution entry point for snapshot comparison.

use std::path::PathBuf;

use catalog_diff::{
    error::Result,
    models::Config,
    pipeline,
    storage::LocalStorage,
    utils::console,
};
use clap::{Parser, Subcommand};

/// catalog-diff - Catalog Snapshot Reconciler
#[derive(Parser, Debug)]
#[command(
    name = "catalog-diff",
    version,
    about = "Compare two catalog snapshots and classify every item"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "catalog-diff.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress the console summary
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a new snapshot against an old one
    Compare {
        /// New snapshot (default: paths.new_file)
        new: Option<String>,
        /// Old snapshot (default: paths.old_file)
        old: Option<String>,
        /// Diff report; the other reports are written beside it
        out: Option<String>,
    },

    /// List records that appear more than once, compared exactly
    FindDuplicates {
        /// JSON file holding a top-level array
        file: PathBuf,
    },

    /// Validate configuration and input snapshots
    Validate {
        /// New snapshot (default: paths.new_file)
        new: Option<String>,
        /// Old snapshot (default: paths.old_file)
        old: Option<String>,
    },
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Apply positional path overrides to the configuration.
fn override_paths(config: &mut Config, new: Option<String>, old: Option<String>) {
    if let Some(path) = new {
        config.paths.new_file = path;
    }
    if let Some(path) = old {
        config.paths.old_file = path;
    }
}

/// Execute one subcommand against the given storage.
async fn run(command: Command, mut config: Config, storage: &LocalStorage) -> Result<()> {
    match command {
        Command::Compare { new, old, out } => {
            override_paths(&mut config, new, old);
            if let Some(path) = out {
                config.paths.diff_file = path;
            }
            config.validate()?;

            pipeline::run_compare(&config, storage).await?;
        }

        Command::FindDuplicates { file } => {
            pipeline::run_find_duplicates(storage, &file).await?;
        }

        Command::Validate { new, old } => {
            override_paths(&mut config, new, old);
            pipeline::run_validate(&config, storage).await?;
        }
    }

    log::debug!("Done");
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A missing config file is normal; a broken one is reported once the
    // logger is up.
    let (mut config, load_error) = match Config::load(&cli.config) {
        Ok(config) => (config, None),
        Err(_) if !cli.config.exists() => (Config::default(), None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(cli.verbose, &config.logging.level);
    if let Some(e) = load_error {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
    }

    if cli.quiet {
        config.output.console_enabled = false;
    }
    console::init(config.output.console_enabled);

    let storage = LocalStorage::new(".").with_pretty(config.output.pretty);

    if let Err(e) = run(cli.command, config, &storage).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_diff::error::AppError;
    use tempfile::TempDir;

    #[test]
    fn test_parse_compare_positionals() {
        let cli = Cli::try_parse_from(["catalog-diff", "-q", "compare", "a.json", "b.json"]).unwrap();
        assert!(cli.quiet);
        match cli.command {
            Command::Compare { new, old, out } => {
                assert_eq!(new.as_deref(), Some("a.json"));
                assert_eq!(old.as_deref(), Some("b.json"));
                assert!(out.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_input_surfaces_display_message() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let command = Command::Compare {
            new: Some("nuevo.json".into()),
            old: Some("viejo.json".into()),
            out: None,
        };

        let err = run(command, Config::default(), &storage).await.unwrap_err();
        assert!(matches!(err, AppError::MissingInput { .. }));
        let expected = format!("Input file not found: {}", tmp.path().join("nuevo.json").display());
        assert_eq!(err.to_string(), expected);
        assert!(!tmp.path().join("diferencias.json").exists());
    }
}
