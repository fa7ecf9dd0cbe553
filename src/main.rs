//! Trendboard dashboard
//!
//! Interactive keyword dashboard. Reads one command per line from stdin and
//! renders to stdout; logs go to stderr.
//!
//! Run with: cargo run --bin trendboard -- --api-url http://127.0.0.1:5000

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use trendboard::api::HttpContentClient;
use trendboard::config::Config;
use trendboard::keywords::KeywordStore;
use trendboard::notifications::Notifications;
use trendboard::presenter::Dashboard;
use trendboard::storage::FileStorage;
use trendboard::sync::SyncController;
use trendboard::theme::ThemeStore;

#[derive(Parser)]
#[command(name = "trendboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track news and videos by keyword")]
struct Args {
    /// Config file (default: $CONFIG_DIR/trendboard/config.toml, then ./trendboard.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content service URL, overrides the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_default(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        config.server.base_url = url;
    }

    trendboard::logging::init(&config.logging);
    tracing::info!("Trendboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(api = %config.server.base_url, data_dir = %config.storage.data_dir, "Configuration");

    let api = Arc::new(HttpContentClient::new(config.server.client_config())?);
    let data_dir = config.data_dir();

    let keywords = KeywordStore::load(Box::new(FileStorage::new(&data_dir)), api.clone());
    let theme = ThemeStore::load(Box::new(FileStorage::new(&data_dir)));
    let sync = SyncController::new(api, config.sync.refresh_wait());
    let notices = Notifications::new(config.notifications.dismiss_after());

    println!("Trendboard - type `help` for commands");

    let dashboard = Dashboard::new(sync, keywords, theme, notices, !args.no_color, std::io::stdout());
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    dashboard.run(stdin, config.sync.timer_settings()).await?;

    Ok(())
}
