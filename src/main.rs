use anyhow::Context;
use clap::{Parser, Subcommand};
use kafka_provider::{Config, ProducerBootstrap};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "kafka-provider")]
#[command(about = "Kafka string producer bootstrap", long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", help = "TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Keep the producer open until Ctrl+C, then flush and exit
    Run,
    /// Publish a single message and exit
    Send {
        #[arg(short, long, help = "Target topic, defaults to kafka.default_topic")]
        topic: Option<String>,

        #[arg(short, long)]
        key: Option<String>,

        value: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    info!("Starting kafka-provider");

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Config::from_file(path)
        }
        None => Config::from_env(),
    };
    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e).context("loading configuration");
        }
    };

    info!(
        kafka_bootstrap_servers = %config.kafka.bootstrap_servers,
        kafka_client_id = ?config.kafka.client_id,
        kafka_default_topic = ?config.kafka.default_topic,
        kafka_extra_properties = config.kafka.properties.len(),
        "Configuration summary"
    );

    let bootstrap = ProducerBootstrap::from_config(&config).context("bootstrapping producer")?;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            info!("Producer ready, press Ctrl+C to stop");
            tokio::signal::ctrl_c()
                .await
                .context("waiting for shutdown signal")?;
            info!("Shutdown requested");
        }
        Command::Send { topic, key, value } => {
            let publisher = bootstrap.publisher();
            let delivery = match topic {
                Some(topic) => publisher.send(&topic, key.as_deref(), &value).await,
                None => publisher.send_default(key.as_deref(), &value).await,
            }
            .context("publishing message")?;

            println!(
                "{} partition={} offset={}",
                delivery.topic, delivery.partition, delivery.offset
            );
        }
    }

    bootstrap.shutdown().context("flushing producer")?;

    Ok(())
}

/// Target of this crate's log events, shared by the library and the binary.
const LOG_TARGET: &str = env!("CARGO_CRATE_NAME");

fn init_logging(json: bool, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new(format!("{}=debug,info", LOG_TARGET))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{}=info,warn", LOG_TARGET)))
    };

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
