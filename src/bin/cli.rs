//! Trendboard CLI
//!
//! One-shot commands against the content service and local state:
//! - Print content for all keywords or one keyword
//! - Manage tracked keywords
//! - Show or toggle the theme
//! - Check service status
//! - Moderate content (blacklist)

use chrono::{DateTime, Local};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use trendboard::api::{BlockRequest, HttpContentClient};
use trendboard::config::{generate_default_config, Config};
use trendboard::content::{ContentBundle, ContentCache, TypeFilter};
use trendboard::keywords::KeywordStore;
use trendboard::notifications::Notifications;
use trendboard::storage::FileStorage;
use trendboard::sync::SyncController;
use trendboard::theme::ThemeStore;
use trendboard::view::sanitize;

#[derive(Parser)]
#[command(name = "trendboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keyword content tracking from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Content service URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print cached content
    Content {
        /// Only this keyword (default: all keywords)
        #[arg(short, long)]
        keyword: Option<String>,
        /// Ask the service to collect fresh content first
        #[arg(short, long)]
        refresh: bool,
        /// Content type filter (all, news, video)
        #[arg(short, long, default_value = "all")]
        filter: TypeFilter,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Manage tracked keywords
    Keywords {
        #[command(subcommand)]
        action: KeywordAction,
    },

    /// Show or toggle the theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Show service status
    Status,

    /// Manage the moderation blacklist
    Blacklist {
        #[command(subcommand)]
        action: BlacklistAction,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum KeywordAction {
    /// List tracked keywords
    List,
    /// Track a keyword
    Add { keyword: String },
    /// Stop tracking a keyword
    Remove {
        keyword: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Subcommand)]
pub enum BlacklistAction {
    /// List blocked ids and URLs
    List,
    /// Block an item
    Block(BlockArgs),
    /// Unblock an item
    Unblock(BlockArgs),
}

#[derive(clap::Args)]
pub struct BlockArgs {
    #[arg(long)]
    content_id: Option<String>,
    #[arg(long)]
    url: Option<String>,
    /// Title, used with --url to derive the content id
    #[arg(long)]
    title: Option<String>,
}

impl From<BlockArgs> for BlockRequest {
    fn from(args: BlockArgs) -> Self {
        BlockRequest {
            content_id: args.content_id,
            url: args.url,
            title: args.title,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, &content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = Config::load_default(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.server.base_url = url;
    }
    trendboard::logging::init(&config.logging);

    let client = Arc::new(HttpContentClient::new(config.server.client_config())?);
    let data_dir = config.data_dir();

    match cli.command {
        Commands::Content {
            keyword,
            refresh,
            filter,
            format,
        } => {
            let keywords = KeywordStore::load(Box::new(FileStorage::new(&data_dir)), client.clone());
            let tracked = keywords.keywords().to_vec();
            let sync = SyncController::new(client, config.sync.refresh_wait());
            let mut cache = ContentCache::new();
            let mut notices = Notifications::new(config.notifications.dismiss_after());

            let bundle = match &keyword {
                Some(keyword) => {
                    sync.load_one(&tracked, keyword, refresh, &mut cache, &mut notices)
                        .await?
                }
                None => {
                    sync.load_all(&tracked, refresh, &mut cache, &mut notices)
                        .await?;
                    cache.flattened_bundle()
                }
            };

            print_content(&bundle, filter, format)?;
        }

        Commands::Keywords { action } => {
            let mut store = KeywordStore::load(Box::new(FileStorage::new(&data_dir)), client);

            match action {
                KeywordAction::List => {
                    if store.keywords().is_empty() {
                        println!("No keywords tracked.");
                        println!();
                        println!("Track your first keyword with:");
                        println!("  trendboard-cli keywords add NewJeans");
                    } else {
                        for keyword in store.keywords() {
                            println!("{}", sanitize(keyword));
                        }
                    }
                }
                KeywordAction::Add { keyword } => {
                    let keyword = store.add(&keyword).await?;
                    println!("Now tracking '{}'", keyword);
                }
                KeywordAction::Remove { keyword, yes } => {
                    let removed = if yes {
                        store.remove(&keyword, &true).await?
                    } else {
                        store.remove(&keyword, &ask).await?
                    };
                    if removed {
                        println!("Stopped tracking '{}'", keyword);
                    } else {
                        println!("Cancelled");
                    }
                }
            }
        }

        Commands::Theme { action } => {
            let mut store = ThemeStore::load(Box::new(FileStorage::new(&data_dir)));
            match action {
                ThemeAction::Show => println!("{}", store.current()),
                ThemeAction::Toggle => println!("{}", store.toggle()?),
            }
        }

        Commands::Status => {
            let sync = SyncController::new(client, config.sync.refresh_wait());
            match sync.check_status().await {
                Ok(status) => {
                    println!("Trendboard v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("Service: {} ({})", status.status, config.server.base_url);
                    if let Some(minutes) = status.update_interval_minutes {
                        println!("Update interval: {} min", minutes);
                    }
                    println!("Cached keywords: {}", status.cached_keywords.join(", "));
                    if let Some(total) = status.total_cached_contents {
                        println!("Cached items: {}", total);
                    }
                    println!("Last update: {}", format_last_update(status.last_update));
                    println!();
                    println!("API keys:");
                    println!("  youtube:      {}", status.api_keys.youtube);
                    println!("  naver_id:     {}", status.api_keys.naver_id);
                    println!("  naver_secret: {}", status.api_keys.naver_secret);
                }
                Err(e) => {
                    eprintln!("Cannot reach the content service at {}", config.server.base_url);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Blacklist { action } => match action {
            BlacklistAction::List => {
                let blacklist = client.blacklist().await?;
                println!("Blocked ids ({}):", blacklist.blocked_ids.len());
                for id in &blacklist.blocked_ids {
                    println!("  {}", sanitize(id));
                }
                println!("Blocked URLs ({}):", blacklist.blocked_urls.len());
                for url in &blacklist.blocked_urls {
                    println!("  {}", sanitize(url));
                }
            }
            BlacklistAction::Block(args) => {
                let response = client.block(&args.into()).await?;
                println!("{}", response.message.as_deref().unwrap_or("Blocked"));
            }
            BlacklistAction::Unblock(args) => {
                let response = client.unblock(&args.into()).await?;
                println!("{}", response.message.as_deref().unwrap_or("Unblocked"));
            }
        },

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Interactive yes/no on stdin
fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn print_content(bundle: &ContentBundle, filter: TypeFilter, format: OutputFormat) -> anyhow::Result<()> {
    let items: Vec<_> = bundle
        .contents
        .iter()
        .filter(|item| filter.matches(item.kind))
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No content yet.");
                return Ok(());
            }

            println!("{:<8} {:<50} {:<20} {}", "Type", "Title", "Source", "Published");
            println!("{}", "-".repeat(100));
            for item in &items {
                println!(
                    "{:<8} {:<50} {:<20} {}",
                    item.kind.badge(),
                    truncate(&sanitize(&item.title), 50),
                    truncate(&sanitize(item.source_label()), 20),
                    sanitize(item.published_at_formatted.as_deref().unwrap_or(""))
                );
            }
            println!();
            println!("{} items", items.len());
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    }
}

fn format_last_update(last_update: Option<f64>) -> String {
    last_update
        .and_then(|secs| DateTime::from_timestamp(secs.trunc() as i64, 0))
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string())
}
