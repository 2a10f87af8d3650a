//! Rendering-side collaborator contract.
//!
//! The scheduler decides *what* occupies the slot and for how long; a
//! [`Presenter`] owns everything visual. Presenters report "finished
//! appearing" / "finished disappearing" back through [`PresenterSignals`],
//! tagged with the [`RenderToken`] they were handed, so signals from an
//! entry that is no longer active are discarded instead of driving a
//! transition.

use crate::bar::BarSpec;
use crate::scheduler::Command;

/// Identity tag for one occupancy of the slot.
///
/// Every `render`/`teardown` call carries the token of the entry it
/// belongs to; signals reported with an outdated token are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderToken(pub(crate) u64);

/// Handle a presenter uses to report presentation progress back to the
/// scheduler. Cloneable and safe to call from any thread; never blocks.
///
/// Holds only a weak reference to the scheduler's channel, so a presenter
/// keeping the handle does not keep a stopped scheduler alive.
#[derive(Debug, Clone)]
pub struct PresenterSignals {
    pub(crate) tx: tokio::sync::mpsc::WeakSender<Command>,
}

impl PresenterSignals {
    /// Report that the bar rendered under `token` became visible.
    pub fn shown(&self, token: RenderToken) {
        self.send(Command::Shown(token));
    }

    /// Report that the bar rendered under `token` finished hiding.
    pub fn hidden(&self, token: RenderToken) {
        self.send(Command::Hidden(token));
    }

    fn send(&self, cmd: Command) {
        let Some(tx) = self.tx.upgrade() else {
            tracing::debug!("presenter signal dropped, scheduler gone");
            return;
        };
        if tx.try_send(cmd).is_err() {
            tracing::debug!("presenter signal dropped, scheduler unavailable");
        }
    }
}

/// The rendering surface for the slot.
///
/// All methods are call-and-forget from the scheduler's point of view.
/// After `render`, the presenter must eventually call
/// [`PresenterSignals::shown`] with the same token; after `teardown`, it
/// must eventually call [`PresenterSignals::hidden`] — the scheduler only
/// promotes the next bar once the previous one reports it finished hiding.
pub trait Presenter: Send + 'static {
    /// Called once when the scheduler starts. Keep the handle for
    /// reporting shown/hidden.
    fn bind(&mut self, signals: PresenterSignals);

    /// Begin presenting `spec` in the slot. May be called again before a
    /// previous teardown finished (the slot content is simply replaced).
    fn render(&mut self, spec: &BarSpec, token: RenderToken);

    /// Toggle the input-blocking overlay.
    fn show_overlay(&mut self, block: bool);

    /// Update the progress display of the active bar.
    fn set_progress(&mut self, progress: u32);

    /// Begin hiding the slot content.
    fn teardown(&mut self, token: RenderToken);
}

/// Callback for bar lifecycle transitions, invoked by the scheduler with
/// the correlation id supplied at submission.
pub trait DisplayListener: Send + 'static {
    fn on_shown(&mut self, bar: &BarSpec, correlation_id: Option<u32>) {
        let _ = (bar, correlation_id);
    }

    fn on_dismissed(&mut self, bar: &BarSpec, correlation_id: Option<u32>) {
        let _ = (bar, correlation_id);
    }
}

/// Presenter that renders to the log and completes every transition
/// immediately. Useful for headless runs and as a reference
/// implementation of the signal protocol.
#[derive(Debug, Default)]
pub struct TracingPresenter {
    signals: Option<PresenterSignals>,
}

impl TracingPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for TracingPresenter {
    fn bind(&mut self, signals: PresenterSignals) {
        self.signals = Some(signals);
    }

    fn render(&mut self, spec: &BarSpec, token: RenderToken) {
        tracing::info!(
            kind = ?spec.kind,
            message = %spec.message,
            action = spec.action.as_deref().unwrap_or(""),
            "bar rendered"
        );
        if let Some(signals) = &self.signals {
            signals.shown(token);
        }
    }

    fn show_overlay(&mut self, block: bool) {
        tracing::debug!(block, "overlay toggled");
    }

    fn set_progress(&mut self, progress: u32) {
        tracing::debug!(progress, "progress updated");
    }

    fn teardown(&mut self, token: RenderToken) {
        tracing::info!("bar hidden");
        if let Some(signals) = &self.signals {
            signals.hidden(token);
        }
    }
}
