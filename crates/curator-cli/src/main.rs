//! # curator CLI Entry Point
//!
//! Assembles subcommands and dispatches into the library crates. Store
//! connection settings come from the environment (`CURATOR_SITE_URL`,
//! `CURATOR_API_KEY`, …); everything else is flags.

mod stdin_feed;

use std::sync::Arc;

use clap::Parser;

use curator_core::{Author, RecordKind};
use curator_liveness::UrlProbe;
use curator_reconcile::{
    run_feed, LivenessValidator, Reconciler, SchemaValidator, TopicFilter, Validate,
};
use curator_store::{ObjectStore, RemoteStore, StoreConfig};

use stdin_feed::StdinFeed;

/// Curator — schema and liveness checking for remote catalog records.
///
/// Validates datasets, organizations and accounts against their declared
/// schemas, probes resource URLs, and reconciles the resulting alert trees
/// with the remote store.
#[derive(Parser, Debug)]
#[command(name = "curator", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Check records against their declarative schemas.
    CheckDatasets(CheckArgs),
    /// Check the liveness of the URLs records point at.
    CheckUrls(CheckArgs),
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Consume change events from stdin (JSON lines with `topic` and
    /// `payload`) instead of sweeping the whole collection.
    #[arg(short, long)]
    feed: bool,

    /// Worker pool size for feed mode.
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Feed topic prefix (may contain dots).
    #[arg(long, default_value = "org.opendata")]
    topic_prefix: String,

    /// Feed environment segment.
    #[arg(long, default_value = "prod")]
    environment: String,

    /// Feed domain segment.
    #[arg(long, default_value = "catalog")]
    domain: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = StoreConfig::from_env()?;
    let store = RemoteStore::new(config.clone())?;

    match cli.command {
        Commands::CheckDatasets(args) => {
            let reconciler =
                Reconciler::new(store, SchemaValidator, Author::new("check-datasets"));
            run(reconciler, args).await
        }
        Commands::CheckUrls(args) => {
            let probe =
                UrlProbe::new(&config.user_agent, curator_liveness::probe::DEFAULT_TIMEOUT)?;
            let reconciler = Reconciler::new(
                store,
                LivenessValidator::new(probe),
                Author::new("check-urls"),
            );
            run(reconciler, args).await
        }
    }
}

async fn run<S, V>(reconciler: Reconciler<S, V>, args: CheckArgs) -> anyhow::Result<()>
where
    S: ObjectStore + 'static,
    V: Validate + 'static,
{
    if args.feed {
        let filter = TopicFilter::new(&args.topic_prefix, &args.environment, &args.domain);
        run_feed(Arc::new(reconciler), StdinFeed::new(), filter, args.workers).await;
        Ok(())
    } else {
        let report = reconciler.sweep(RecordKind::Dataset).await?;
        tracing::info!(
            checked = report.checked,
            unchanged = report.unchanged,
            published = report.published,
            conflicted = report.conflicted,
            failed = report.failed,
            "sweep finished",
        );
        Ok(())
    }
}
