//! Dashboard Bot
//!
//! One-shot client for the landing stats API: fetches every metric panel
//! concurrently, derives chart series, and hands them to the configured
//! render backend. A panel that fails renders its fallback message and
//! never disturbs its siblings.

mod chart;
mod config;
mod panel;
mod render;

use anyhow::Result;

use dashboard_metrics::debug::{debug_error_enabled, DEBUG};
use dashboard_metrics::metric::Metric;

use crate::config::Config;
use crate::panel::PanelOutcome;
use crate::render::Render;

/// The program's main entry point.
fn main() -> Result<()> {
    // Load configuration from arguments and environment variables
    let config = Config::load()?;

    // Start the main event loop
    async_std::task::block_on(run(config))
}

async fn run(config: Config) -> Result<()> {
    debug_error_enabled(config.debug);

    // Build the render backend and pin the shared pieces for the
    // lifetime of the process; panel tasks borrow them concurrently.
    let render: &'static dyn Render = Box::leak(render::from_config(&config)?);
    let palette: &'static [String] = Box::leak(config.palette.into_boxed_slice());
    let base_url: &'static str = Box::leak(config.base_url.into_boxed_str());
    let timeout = config.fetch_timeout;

    println!("Loading {} panels from {}", Metric::ALL.len(), base_url);

    // One supervised task per panel; a panel failure is rendered as its
    // fallback, so the join only exists for the end-of-run summary.
    let mut tasks = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL.iter().copied() {
        tasks.push(async_std::task::spawn(async move {
            panel::load_panel(render, palette, base_url, timeout, metric).await
        }));
    }
    let outcomes = futures::future::join_all(tasks).await;

    let rendered = outcomes
        .iter()
        .filter(|outcome| **outcome == PanelOutcome::Rendered)
        .count();
    println!("Loaded {}/{} panels", rendered, outcomes.len());
    DEBUG.publish();

    Ok(())
}
