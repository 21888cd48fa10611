mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;
use std::time::Duration;

use posterctl::config::{self, Config};
use posterctl::plex::PlexClient;
use posterctl::selector::{PosterSelector, ProviderPreference, RunOptions, Scope};
use posterctl::{logging, selector};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match config::load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("posterctl: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    config::apply_env(&mut config);

    if let Err(e) = logging::init(cli.verbose, config.log.path().as_deref()) {
        eprintln!("posterctl: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: Config) -> Result<()> {
    // Missing credentials are fatal before any connection is attempted
    let credentials = config::credentials(&config)?;

    tracing::debug!(
        rating_key = ?cli.rating_key,
        library = ?cli.library,
        include_locked = cli.include_locked,
        dry_run = cli.dry_run,
        "Arguments"
    );

    let scope = match (cli.rating_key, cli.library) {
        (Some(rating_key), _) => Scope::Item(rating_key),
        (None, Some(name)) => Scope::Library(name),
        (None, None) => {
            tracing::warn!("No --rating_key or --library specified. Exiting without changes.");
            return Ok(());
        }
    };

    if !config.server.verify_tls {
        tracing::warn!("TLS certificate verification is disabled");
    }

    let options = RunOptions {
        include_locked: cli.include_locked,
        dry_run: cli.dry_run,
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let client = PlexClient::new(
            &credentials.url,
            &credentials.token,
            config.server.verify_tls,
            Duration::from_secs(config.server.timeout_secs),
        )?;

        client
            .check_connection()
            .await
            .context("Failed to connect to Plex server")?;
        tracing::info!("Connected to Plex server at {}", credentials.url);

        let preference = ProviderPreference::from_config(&config.selection);
        let selector = PosterSelector::new(client, preference);
        let summary: selector::RunSummary = selector.run(&scope, options).await?;

        if summary.failed > 0 {
            tracing::warn!("{} item(s) failed; see log for details", summary.failed);
        }

        Ok(())
    })
}
