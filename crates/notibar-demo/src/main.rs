//! Headless demo — drives the scheduler with a log-backed presenter.
//!
//! Walks through the common flows: a queued run of message bars, a
//! determinate progress bar updated in place, and manual dismissal.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use notibar::{BarKind, BarManager, BarSpec, DisplayListener, ShowDuration, TracingPresenter};

struct LogListener;

impl DisplayListener for LogListener {
    fn on_shown(&mut self, bar: &BarSpec, correlation_id: Option<u32>) {
        tracing::info!(message = %bar.message, ?correlation_id, "listener: shown");
    }

    fn on_dismissed(&mut self, bar: &BarSpec, correlation_id: Option<u32>) {
        tracing::info!(message = %bar.message, ?correlation_id, "listener: dismissed");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let manager = BarManager::builder()
        .presenter(TracingPresenter::new())
        .listener(LogListener)
        .spawn();

    // A short run of queued message bars.
    manager.show_with_id(
        &BarSpec::new(BarKind::Message, "File saved"),
        ShowDuration::Short,
        1,
    )?;

    let mut deleted = BarSpec::new(BarKind::Action, "Item deleted");
    deleted.action = Some("UNDO".to_string());
    deleted.on_action = Some(Arc::new(|| tracing::info!("undo requested")));
    manager.show_with_id(&deleted, ShowDuration::Long, 2)?;

    tokio::time::sleep(Duration::from_millis(4500)).await;

    // A determinate progress bar updated in place.
    let mut progress = BarSpec::new(BarKind::Horizontal, "Downloading 0%");
    progress.allow_user_input = false;
    manager.show_with_id(&progress, ShowDuration::Indefinite, 3)?;
    for pct in [25u32, 50, 75, 100] {
        tokio::time::sleep(Duration::from_millis(400)).await;
        progress.message = format!("Downloading {pct}%");
        manager.update(&progress)?;
        manager.set_progress(pct)?;
    }
    manager.dismiss()?;

    tokio::time::sleep(Duration::from_millis(200)).await;
    tracing::info!(showing = manager.is_showing(), "demo finished");
    Ok(())
}
