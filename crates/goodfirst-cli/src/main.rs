mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::Parser;
use goodfirst_cache::ResultsCache;
use goodfirst_core::{
    describe_error, detect_language, Config, Exporter, GitHubProvider, IssueFinder,
};
use goodfirst_term::TableRenderer;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, FindArgs};

/// Log filter for `--verbose`; everything outside the workspace stays at warn
const VERBOSE_FILTER: &str =
    "warn,good_first_issue=debug,goodfirst_api=debug,goodfirst_core=debug,goodfirst_cache=debug";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Find(args)) => find(args).await,
        Some(Commands::Open { index }) => open_issue(index),
        None => find(cli.find).await,
    }
}

async fn find(args: FindArgs) -> anyhow::Result<()> {
    let config = Config::load()?.with_process_env();
    debug!("Using API at {}", config.github.api_url);

    let params = args.to_params(&config.search, || {
        let cwd = std::env::current_dir().ok()?;
        detect_language(&cwd).map(str::to_string)
    });

    let provider = GitHubProvider::from_config(&config.github)?;
    let has_token = provider.has_token();
    let finder =
        IssueFinder::new(Arc::new(provider)).with_max_concurrency(config.search.max_concurrency);

    info!("Searching issues");
    let issues = finder
        .find(&params)
        .await
        .map_err(|err| anyhow!(describe_error(&err, has_token, Utc::now())))?;

    let cache = ResultsCache::new();
    if let Err(e) = cache.save(&Exporter::urls(&issues)) {
        warn!("Error writing search results: {}", e);
    }

    if args.json {
        println!("{}", Exporter::to_json(&issues)?);
    } else {
        let renderer = if args.no_color {
            TableRenderer::new(false)
        } else {
            TableRenderer::from_env()
        };
        println!("{}", renderer.render(&issues, Utc::now()));
    }

    Ok(())
}

fn open_issue(index: i64) -> anyhow::Result<()> {
    let cache = ResultsCache::new();
    debug!("Opening issue #{} from {}", index, cache.path().display());

    let url = cache.pick(index)?;
    println!("Opening {}", url);
    open::that(&url).with_context(|| format!("Could not open {} in a browser", url))?;

    Ok(())
}
