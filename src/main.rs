use clap::{Parser, Subcommand};
use culture_bridge::{
    run_batch, AppConfig, BaiduTranslator, CompletionClient, CultureAdapter, CultureBridgeError,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "culture-bridge", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the cultural adaptation endpoint
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Translate the configured CSV files, resuming from existing output
    Batch {
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (mut config, load_error) = AppConfig::load_or_default(&cli.config);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("culture_bridge={}", config.logging.level)))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match load_error {
        Some(CultureBridgeError::FileNotFound(path)) => {
            tracing::info!(path = %path, "No configuration file, using defaults");
        }
        Some(e) => {
            tracing::warn!(path = %cli.config, error = %e, "Configuration file unusable, using defaults");
        }
        None => tracing::debug!(path = %cli.config, "Loaded configuration"),
    }

    match cli.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let adapter = CultureAdapter::new(BaiduTranslator::new(config.baidu.clone()));
            culture_bridge::server::serve(adapter, &host, port).await?;
        }
        Command::Batch { output_dir } => {
            if let Some(dir) = output_dir {
                config.batch.output_dir = dir;
            }
            let mut client = CompletionClient::from_config(&config)?;

            tokio::select! {
                summary = run_batch(&config.batch, &mut client) => {
                    let summary = summary?;
                    tracing::info!(
                        completed = summary.completed.len(),
                        failed = summary.failed.len(),
                        skipped = summary.skipped.len(),
                        "All files processed"
                    );
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!("Interrupted; flushed rows are kept and the next run resumes after them");
                }
            }
        }
    }

    Ok(())
}
