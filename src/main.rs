use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use lookout_core::config::Config;
use lookout_core::AlertStore;

#[derive(Parser)]
#[command(name = "lookout", about = "Security alert webhook receiver and triage board")]
struct Cli {
    /// Path to the config file (TOML). Defaults to ./lookout.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listen address: bare port or host:port. Overrides config and $PORT.
    #[arg(long)]
    listen: Option<String>,
    /// Active history snapshot path.
    #[arg(long)]
    history_file: Option<PathBuf>,
    /// Rolling-window capacity of the in-memory history.
    #[arg(long)]
    capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(history_file) = cli.history_file {
        config.server.history_file = history_file;
    }
    if let Some(capacity) = cli.capacity {
        config.server.capacity = capacity;
    }

    let addr = match cli.listen {
        Some(listen) => lookout_core::config::resolve_listen_addr(None, &listen),
        None => config.listen_addr(),
    };

    let store = Arc::new(AlertStore::new(
        &config.server.history_file,
        config.server.capacity,
    ));
    if let Err(err) = store.reload() {
        tracing::warn!("could not load history: {err}");
    }

    lookout_server::serve(&addr, store).await
}
