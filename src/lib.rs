pub mod modules;
pub mod shared;

use modules::{
    feed::{domain::LineVisibility, FeedOptions, FeedService, FeedSnapshot, ScriptedVisibility},
    provider::{PageSource, ShikimoriAdapter},
    render::{GridFrame, GridRenderer, HtmlGridRenderer, TextGridRenderer},
};
use shared::{AppConfig, AppResult};
use std::sync::Arc;
use tokio::io::BufReader;

/// How the output grid is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

/// Where sentinel crossings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// One crossing per line on stdin
    Interactive,
    /// A fixed number of crossings, fired back to back
    Scripted(usize),
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: AppConfig,
    pub mode: ScrollMode,
    pub format: OutputFormat,
}

/// Run one feed session against Shikimori and print the grid to stdout
pub async fn run(options: RunOptions) -> AppResult<FeedSnapshot> {
    let source: Arc<dyn PageSource> = Arc::new(ShikimoriAdapter::new(&options.config)?);
    run_with_source(source, options).await
}

/// Same as [`run`] with an explicit page source
pub async fn run_with_source(
    source: Arc<dyn PageSource>,
    options: RunOptions,
) -> AppResult<FeedSnapshot> {
    let RunOptions {
        config,
        mode,
        format,
    } = options;
    let width = config.viewport_width;
    let renderer: Arc<dyn GridRenderer> = match format {
        OutputFormat::Text => Arc::new(TextGridRenderer::default()),
        OutputFormat::Html => Arc::new(HtmlGridRenderer),
    };

    let mut service = FeedService::new(source, FeedOptions::from(&config));
    let mut updates = service.subscribe();

    // Text output re-renders after every append; HTML is printed once at the end
    let printer = {
        let renderer = Arc::clone(&renderer);
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                if format == OutputFormat::Text {
                    let snapshot = updates.borrow_and_update().clone();
                    println!("{}", render_snapshot(renderer.as_ref(), &snapshot, width));
                }
            }
        })
    };

    log::info!(
        "Starting feed session ({:?}, {:?} output, viewport {}px)",
        mode,
        format,
        width
    );
    let snapshot = match mode {
        ScrollMode::Scripted(count) => {
            service.run(&mut ScriptedVisibility::scrolls(count)).await
        }
        ScrollMode::Interactive => {
            let mut lines = LineVisibility::new(BufReader::new(tokio::io::stdin()));
            service.run(&mut lines).await
        }
    };
    service.unmount().await;
    drop(service);

    if let Err(e) = printer.await {
        log::warn!("Renderer task ended abnormally: {}", e);
    }
    if format == OutputFormat::Html {
        println!("{}", render_snapshot(renderer.as_ref(), &snapshot, width));
    }

    log::info!(
        "Feed session finished on page {} with {} cards",
        snapshot.page,
        snapshot.cards.len()
    );
    Ok(snapshot)
}

/// Render a snapshot with the given renderer
pub fn render_snapshot(renderer: &dyn GridRenderer, snapshot: &FeedSnapshot, width: u32) -> String {
    renderer.render(&GridFrame {
        cards: &snapshot.cards,
        observing: snapshot.observing,
        viewport_width: width,
    })
}
