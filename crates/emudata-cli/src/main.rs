//! Emudata - emulator data fetcher
//!
//! Usage:
//!   emudata fetch                 # Clone or update, check out latest
//!   emudata fetch --version v1.0  # Check out a tagged release
//!   emudata versions              # List versions in the local clone
//!   emudata verify                # Check the large-file artifact only
//!   emudata config init           # Write a config file with the defaults

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emudata_core::config::{ConfigStore, EmuDataConfig, to_toml};
use emudata_core::git::GitCli;
use emudata_core::resolver::{StepOutcome, SyncReport, VersionResolver};
use emudata_core::version::VersionRequest;

#[derive(Parser)]
#[command(name = "emudata")]
#[command(about = "Fetch and select versions of emulator model data", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/emudata/emudata.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the data clone lives under (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone or update the data repository and check out a version
    Fetch {
        /// Version tag (case-insensitive) or "latest"
        #[arg(short, long, default_value = "latest")]
        version: VersionRequest,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List versions available in the local clone
    Versions {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Check that large files were downloaded, without touching the remote
    Verify,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emudata_core=info,emudata_cli=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run_cli(cli, &mut std::io::stdout().lock())
}

fn run_cli(cli: Cli, out: &mut impl Write) -> Result<()> {
    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::from_default_location()?,
    };

    match cli.command {
        Commands::Fetch { version, format } => {
            let (resolver, data_dir) = open_resolver(&store, cli.data_dir)?;
            run_fetch(&resolver, &data_dir, &version, format, out)
        }
        Commands::Versions { format } => {
            let (resolver, data_dir) = open_resolver(&store, cli.data_dir)?;
            run_versions(&resolver, &data_dir, format, out)
        }
        Commands::Verify => {
            let (resolver, data_dir) = open_resolver(&store, cli.data_dir)?;
            run_verify(&resolver, &data_dir, out)
        }
        Commands::Config {
            action: ConfigAction::Init { force },
        } => run_config_init(&store, cli.data_dir, force, out),
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            let mut config = load_config(&store)?;
            if let Some(dir) = cli.data_dir {
                config.data_dir = Some(dir);
            }
            run_config_show(&config, out)
        }
    }
}

fn load_config(store: &ConfigStore) -> Result<EmuDataConfig> {
    store
        .load()
        .with_context(|| format!("Failed to load {}", store.config_path().display()))
}

/// Resolver from the config file, with `--data-dir` taking precedence.
fn open_resolver(
    store: &ConfigStore,
    data_dir: Option<PathBuf>,
) -> Result<(VersionResolver, PathBuf)> {
    let config = load_config(store)?;
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    let resolver = VersionResolver::new(config.remote_spec()?, config.artifact.clone());
    Ok((resolver, data_dir))
}

fn run_fetch(
    resolver: &VersionResolver,
    data_dir: &Path,
    version: &VersionRequest,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    GitCli::ensure_git_version()?;

    let clone_dir = resolver.remote().clone_dir(data_dir)?;
    if !clone_dir.exists() && !GitCli::lfs_available() {
        tracing::warn!(
            "git-lfs does not appear to be installed; large files will be cloned as pointer stubs"
        );
    }

    let report = resolver.ensure_and_select_version(data_dir, version)?;

    match format {
        OutputFormat::Table => print_report(&report, out)?,
        OutputFormat::Json => print_json(&serde_json::to_value(&report)?, out)?,
    }
    Ok(())
}

fn run_versions(
    resolver: &VersionResolver,
    data_dir: &Path,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let versions = resolver.available_versions(data_dir)?;

    match format {
        OutputFormat::Table => {
            if versions.is_empty() {
                writeln!(out, "No versions tagged in {}", data_dir.display())?;
            }
            for version in &versions {
                writeln!(out, "{version}")?;
            }
        }
        OutputFormat::Json => print_json(&serde_json::json!({ "versions": versions }), out)?,
    }
    Ok(())
}

fn run_verify(resolver: &VersionResolver, data_dir: &Path, out: &mut impl Write) -> Result<()> {
    let size = resolver.verify(data_dir)?;
    writeln!(out, "OK: artifact is {} bytes", size)?;
    Ok(())
}

fn run_config_init(
    store: &ConfigStore,
    data_dir: Option<PathBuf>,
    force: bool,
    out: &mut impl Write,
) -> Result<()> {
    let path = store.config_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let config = EmuDataConfig {
        data_dir,
        ..EmuDataConfig::new()
    };
    config.validate()?;
    store.save(&config)?;

    tracing::info!(path = %path.display(), "Wrote config file");
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}

fn run_config_show(config: &EmuDataConfig, out: &mut impl Write) -> Result<()> {
    write!(out, "{}", to_toml(config)?)?;
    Ok(())
}

fn print_report(report: &SyncReport, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Clone:    {}", report.clone_dir.display())?;
    writeln!(
        out,
        "Acquired: {}",
        if report.cloned { "cloned" } else { "existing" }
    )?;
    writeln!(out, "Artifact: {} bytes", report.artifact_bytes)?;
    writeln!(out, "Pull:     {}", outcome_label(&report.pull))?;
    writeln!(
        out,
        "Checkout: {} ({})",
        report.target.name(),
        outcome_label(&report.checkout)
    )?;
    if !report.available_versions.is_empty() {
        writeln!(out, "Versions: {}", report.available_versions.join(", "))?;
    }
    Ok(())
}

fn outcome_label(outcome: &StepOutcome) -> &'static str {
    match outcome {
        StepOutcome::Done => "ok",
        StepOutcome::Skipped { .. } => "skipped",
    }
}

fn print_json(value: &serde_json::Value, out: &mut impl Write) -> Result<()> {
    // Wrap in versioned output
    let mut output = serde_json::json!({ "schema_version": 1 });
    if let (Some(target), Some(source)) = (output.as_object_mut(), value.as_object()) {
        target.extend(source.clone());
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
