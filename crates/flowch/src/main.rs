//! flowch - ipcad accounting collector
//!
//! Reads an `ipcad show ip accounting` dump from stdin, classifies each flow
//! against the user and network tables, and batch-inserts the result into
//! ClickHouse.
//!
//! # Usage
//!
//! ```bash
//! ipcad_dump | flowch --config configs/flowch.toml
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use flowch_classifier::{Classifier, LookupSource, TableSource};
use flowch_config::{Config, LookupTableConfig};
use flowch_pipeline::PipelineConfig;
use flowch_protocol::LineParser;
use flowch_sinks::{ClickHouseConfig, ClickHouseSink};

/// flowch - ipcad accounting collector
#[derive(Parser, Debug)]
#[command(name = "flowch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/flowch.toml")]
    config: std::path::PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_file(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    config.validate().context("validating config")?;

    init_logging(resolve_log_level(cli.log_level.as_deref(), &config))?;

    let classifier = build_classifier(&config).await?;
    info!(
        users = classifier.user_count(),
        local = classifier.network_counts().0,
        peering = classifier.network_counts().1,
        "classification tables loaded"
    );

    let mut sink = ClickHouseSink::new(clickhouse_config(&config));
    sink.ping().await.context("connecting to clickhouse")?;
    sink.ensure_schema()
        .await
        .context("creating clickhouse schema")?;

    let collected = match config.pipeline.collected_at()? {
        Some(at) => at,
        None => Utc::now(),
    };
    let parser = LineParser::new(collected);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, draining pipeline");
            signal_token.cancel();
        }
    });

    let pipeline_config = PipelineConfig::default()
        .with_queue_size(config.pipeline.queue_size)
        .with_batch_size(config.pipeline.batch_size);

    let snapshot = flowch_pipeline::run(
        BufReader::new(tokio::io::stdin()),
        parser,
        classifier,
        &mut sink,
        pipeline_config,
        shutdown,
    )
    .await
    .context("running pipeline")?;

    info!(
        lines_read = snapshot.lines_read,
        records_parsed = snapshot.records_parsed,
        lines_skipped = snapshot.lines_skipped,
        batches_flushed = snapshot.batches_flushed,
        records_flushed = snapshot.records_flushed,
        "collection complete"
    );

    Ok(())
}

/// Resolve both lookup tables and build the classifier.
async fn build_classifier(config: &Config) -> Result<Classifier> {
    let users = table_source(&config.users, "users")?
        .resolve()
        .await
        .context("loading user table")?;
    let networks = table_source(&config.networks, "networks")?
        .resolve()
        .await
        .context("loading network table")?;

    Ok(Classifier::new(users, networks))
}

/// Map a config section onto a resolvable table source.
fn table_source(cfg: &LookupTableConfig, section: &str) -> Result<TableSource> {
    let fetch = if cfg.has_fetch() {
        Some(LookupSource {
            url: cfg.url.clone(),
            file: cfg.file.clone(),
            key_field: cfg.key_field,
            value_field: cfg.value_field,
            delimiter: cfg.delimiter_char(section)?,
        })
    } else {
        None
    };

    Ok(TableSource {
        entries: cfg.entries.clone(),
        fetch,
    })
}

fn clickhouse_config(config: &Config) -> ClickHouseConfig {
    let ch = &config.clickhouse;
    let mut sink_config = ClickHouseConfig::default()
        .with_url(&ch.url)
        .with_database(&ch.database)
        .with_retry_attempts(ch.retry_attempts as usize);

    if let (Some(user), Some(pass)) = (&ch.username, &ch.password) {
        sink_config = sink_config.with_credentials(user, pass);
    }

    sink_config.retry_base_delay = Duration::from_millis(ch.retry_base_delay_ms);
    sink_config.retry_max_delay = Duration::from_millis(ch.retry_max_delay_ms);
    sink_config
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level<'a>(cli_level: Option<&'a str>, config: &'a Config) -> &'a str {
    match cli_level {
        Some(level) => level,
        None => config.log.level.as_str(),
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
