use anime_scroll_lib::{
    shared::{config::AppConfig, utils::init_logger},
    OutputFormat, RunOptions, ScrollMode,
};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "anime-scroll",
    version,
    about = "Scroll through the most popular anime on Shikimori, eight at a time"
)]
struct Cli {
    /// Fire this many sentinel crossings and exit (default: one per line on stdin)
    #[arg(long)]
    scrolls: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Viewport width in pixels, picks the column count
    #[arg(long)]
    width: Option<u32>,

    /// API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// User-Agent sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Ignore crossings while a page is still loading
    #[arg(long)]
    guard_in_flight: bool,

    /// Stop observing the sentinel after the first empty page
    #[arg(long)]
    stop_on_empty: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Html,
}

impl Cli {
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(width) = self.width {
            config.viewport_width = width;
        }
        config.guard_in_flight |= self.guard_in_flight;
        config.stop_on_empty |= self.stop_on_empty;
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = cli.apply(AppConfig::from_env().context("invalid environment configuration")?);
    let options = RunOptions {
        config,
        mode: cli
            .scrolls
            .map_or(ScrollMode::Interactive, ScrollMode::Scripted),
        format: match cli.format {
            Format::Text => OutputFormat::Text,
            Format::Html => OutputFormat::Html,
        },
    };

    if options.mode == ScrollMode::Interactive {
        eprintln!("Press Enter to scroll to the bottom, q to quit.");
    }

    let snapshot = anime_scroll_lib::run(options)
        .await
        .context("feed session failed")?;

    eprintln!(
        "Loaded {} titles across {} page(s)",
        snapshot.cards.len(),
        snapshot.page
    );
    Ok(())
}
