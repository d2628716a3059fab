//! Autoprops CLI entry point.

use autoprops::cli::args::{Cli, Commands};
use autoprops::cli::output::Output;
use autoprops::cli::{apply, exclude, normalize, property};
use autoprops::config::{Settings, config_path};
use autoprops::error::{AutopropsError, ExitCode as AutopropsExitCode};
use autoprops::vault::Vault;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("autoprops={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<AutopropsExitCode, AutopropsError> {
    let config_path = config_path(cli.config.as_deref())?;
    let mut settings = Settings::load_from(&config_path)?;
    tracing::debug!(path = %config_path.display(), "settings loaded");

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Apply(args) => {
            let vault = open_vault(cli, &settings)?;
            apply::apply(&vault, &settings, args, &output)
        }
        Commands::CheckExcluded(args) => {
            let vault = open_vault(cli, &settings)?;
            apply::check_excluded(&vault, &settings, args, &output)
        }
        Commands::Normalize(args) => {
            normalize::run_normalize(args, &output)?;
            Ok(AutopropsExitCode::Success)
        }
        Commands::SanitizeTag(args) => {
            normalize::run_sanitize_tag(args, &output)?;
            Ok(AutopropsExitCode::Success)
        }
        Commands::Property(args) => {
            property::run(&mut settings, &config_path, args, &output)?;
            Ok(AutopropsExitCode::Success)
        }
        Commands::Exclude(args) => {
            exclude::run(&mut settings, &config_path, args, &output)?;
            Ok(AutopropsExitCode::Success)
        }
        Commands::Toggle => {
            property::toggle(&mut settings, &config_path, &output)?;
            Ok(AutopropsExitCode::Success)
        }
    }
}

fn open_vault(cli: &Cli, settings: &Settings) -> Result<Vault, AutopropsError> {
    let vault_path = settings.resolve_vault_path(cli.vault.as_deref())?;
    Vault::new(vault_path)
}
